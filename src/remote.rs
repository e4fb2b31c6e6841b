//! Remote source: one blocking HTTP GET via libcurl's Easy2 interface.
//!
//! The destination is only touched once the response status is known to be
//! exactly 200. Redirects are not followed, so any 3xx is a failure. The body
//! is written to disk chunk by chunk as libcurl hands it over.

use crate::destination;
use crate::error::{AcquireError, FetchFailure};
use crate::options::AcquireOptions;
use curl::easy::{Easy2, Handler, WriteError};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str;

const HTTP_OK: u32 = 200;

/// Output side of a transfer.
#[derive(Debug)]
enum Sink {
    /// No body byte seen yet; destination untouched.
    Pending,
    /// Status was 200 and the destination file is open.
    Open(File),
    /// Status was not 200, or the destination could not be prepared.
    Refused,
}

/// Easy2 handler that persists a 200 response body to `destination`.
struct PersistHandler {
    destination: PathBuf,
    status: Option<u32>,
    sink: Sink,
    bytes_written: u64,
    /// Stage error raised inside a callback, surfaced after `perform`.
    failure: Option<AcquireError>,
}

impl PersistHandler {
    fn new(destination: &Path) -> Self {
        Self {
            destination: destination.to_path_buf(),
            status: None,
            sink: Sink::Pending,
            bytes_written: 0,
            failure: None,
        }
    }

    fn open_sink(&mut self) {
        if self.status != Some(HTTP_OK) {
            self.sink = Sink::Refused;
            return;
        }
        match destination::prepare(&self.destination) {
            Ok(file) => self.sink = Sink::Open(file),
            Err(e) => {
                self.failure = Some(e);
                self.sink = Sink::Refused;
            }
        }
    }
}

impl Handler for PersistHandler {
    fn header(&mut self, data: &[u8]) -> bool {
        if let Ok(line) = str::from_utf8(data) {
            // Each new status line (interim 1xx, proxy CONNECT) replaces the last.
            if let Some(code) = parse_status_line(line) {
                self.status = Some(code);
            }
        }
        true
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
        if matches!(self.sink, Sink::Pending) {
            self.open_sink();
        }
        let Sink::Open(file) = &mut self.sink else {
            return Ok(0); // abort transfer
        };
        match file.write_all(data) {
            Ok(()) => {
                self.bytes_written += data.len() as u64;
                Ok(data.len())
            }
            Err(e) => {
                self.failure = Some(AcquireError::Copy {
                    path: self.destination.clone(),
                    source: e,
                });
                Ok(0)
            }
        }
    }
}

/// Parses the code out of `HTTP/1.1 200 OK` or `HTTP/2 200`.
fn parse_status_line(line: &str) -> Option<u32> {
    let rest = line.trim_end().strip_prefix("HTTP/")?;
    rest.split_whitespace().nth(1)?.parse().ok()
}

/// Rejects anything that is not an http or https URL before any I/O.
fn check_url(url: &str) -> Result<(), AcquireError> {
    let parsed =
        url::Url::parse(url).map_err(|e| AcquireError::fetch(url, FetchFailure::InvalidUrl(e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(AcquireError::fetch(
            url,
            FetchFailure::UnsupportedScheme(other.to_string()),
        )),
    }
}

fn configure(
    easy: &mut Easy2<PersistHandler>,
    url: &str,
    opts: &AcquireOptions,
) -> Result<(), curl::Error> {
    easy.url(url)?;
    easy.get(true)?;
    easy.buffer_size(opts.curl_buffer_bytes())?;
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua)?;
    }
    Ok(())
}

/// Fetches `url` and streams the body into `destination`.
/// Returns the number of body bytes written.
pub(crate) fn fetch_to(
    url: &str,
    destination: &Path,
    opts: &AcquireOptions,
) -> Result<u64, AcquireError> {
    check_url(url)?;

    let mut easy = Easy2::new(PersistHandler::new(destination));
    configure(&mut easy, url, opts)
        .map_err(|e| AcquireError::fetch(url, FetchFailure::Transport(e)))?;

    let performed = easy.perform();
    let response_code = easy.response_code();
    let handler = easy.get_mut();

    if let Some(err) = handler.failure.take() {
        return Err(err);
    }

    if let Err(e) = performed {
        return Err(match handler.sink {
            Sink::Refused => {
                let code = handler.status.or(response_code.ok()).unwrap_or(0);
                AcquireError::fetch(url, FetchFailure::Status(code))
            }
            // Body had started flowing: this is a mid-stream failure.
            Sink::Open(_) => AcquireError::Copy {
                path: destination.to_path_buf(),
                source: io::Error::new(io::ErrorKind::Other, e),
            },
            Sink::Pending => AcquireError::fetch(url, FetchFailure::Transport(e)),
        });
    }

    let code = response_code.map_err(|e| AcquireError::fetch(url, FetchFailure::Transport(e)))?;
    if code != HTTP_OK {
        return Err(AcquireError::fetch(url, FetchFailure::Status(code)));
    }

    // 200 with an empty body: the destination still has to exist.
    if matches!(handler.sink, Sink::Pending) {
        handler.open_sink();
        if let Some(err) = handler.failure.take() {
            return Err(err);
        }
    }

    if let Sink::Open(file) = &mut handler.sink {
        file.flush().map_err(|e| AcquireError::Copy {
            path: destination.to_path_buf(),
            source: e,
        })?;
    }

    tracing::debug!("fetched {} bytes from {}", handler.bytes_written, url);
    Ok(handler.bytes_written)
}
