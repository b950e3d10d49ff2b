//! Shell Module
//!
//! Line-oriented command interface over a shared cache.
//!
//! # Commands
//! - `put <key> <value> [ttl_ms]` - Store a value
//! - `get <key>` - Retrieve a value and mark it most recently used
//! - `peek <key>` - Retrieve a value without touching it
//! - `del <key>` - Remove a key
//! - `head` / `tail` - Most / least recently used entry
//! - `keys` - Keys from most to least recently used
//! - `purge` - Remove expired entries now
//! - `stats` / `capacity` / `clear` / `quit`

pub mod handlers;
pub mod session;

pub use handlers::{handle, AppState, SharedCache};
pub use session::run;
