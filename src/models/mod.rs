//! Request and Response models for the cache shell
//!
//! Parsed input commands and the JSON bodies written back for them.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::Request;
pub use responses::{
    CapacityResponse, EmptyResponse, EntryResponse, ErrorResponse, KeysResponse, MessageResponse,
    PurgeResponse, RemoveResponse, Response, StatsResponse,
};
