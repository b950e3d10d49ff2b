//! Shell Session
//!
//! Reads commands line by line and writes one JSON response per line.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use super::handlers::{handle, AppState};
use crate::error::Result;
use crate::models::{ErrorResponse, Request, Response};

/// Runs a session until `quit`/`exit` or end of input.
///
/// Recoverable command errors (unknown command, bad arguments, missing key)
/// are written back as `{"error": ...}` and the session continues. I/O and
/// encoding failures end it.
///
/// Returns the number of commands executed.
pub async fn run<R, W>(reader: R, mut writer: W, state: AppState) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut executed = 0;

    while let Some(line) = lines.next_line().await? {
        let request = match Request::parse(&line) {
            Ok(Some(request)) => request,
            Ok(None) => continue,
            Err(err) => {
                debug!(error = %err, "rejected input line");
                write_response(&mut writer, &Response::Error(ErrorResponse::from(&err))).await?;
                continue;
            }
        };

        let quit = request == Request::Quit;
        let response = match handle(&state, request).await {
            Ok(response) => response,
            Err(err) if err.is_recoverable() => Response::Error(ErrorResponse::from(&err)),
            Err(err) => {
                warn!(error = %err, "command failed");
                return Err(err);
            }
        };

        write_response(&mut writer, &response).await?;
        executed += 1;

        if quit {
            info!("Session ended by client");
            break;
        }
    }

    writer.flush().await?;
    Ok(executed)
}

async fn write_response<W>(writer: &mut W, response: &Response) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(response)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}
