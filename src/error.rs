//! Failure taxonomy for the acquire-and-persist operation.
//!
//! Every variant names the stage that failed and carries the low-level error
//! so callers can tell bad input, network trouble and disk trouble apart.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error returned by [`crate::acquire_image`].
#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    /// Neither a remote URL nor a local path was supplied.
    #[error("no source specified: both remote URL and local path are empty")]
    NoSource,

    /// The remote request could not be made or did not answer 200 OK.
    #[error("error fetching {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchFailure,
    },

    /// The local source file could not be opened.
    #[error("error opening local file {}: {source}", .path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination's parent directories could not be created.
    #[error("error creating directory {}: {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The destination file could not be created or truncated.
    #[error("error creating file {}: {source}", .path.display())]
    DestinationCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the source or writing the destination failed partway.
    #[error("error saving image to {}: {source}", .path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Coarse kind of an [`AcquireError`], for callers that branch on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Fetch,
    SourceOpen,
    DirectoryCreation,
    DestinationCreate,
    Copy,
}

impl AcquireError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AcquireError::NoSource => ErrorKind::Configuration,
            AcquireError::Fetch { .. } => ErrorKind::Fetch,
            AcquireError::SourceOpen { .. } => ErrorKind::SourceOpen,
            AcquireError::DirectoryCreation { .. } => ErrorKind::DirectoryCreation,
            AcquireError::DestinationCreate { .. } => ErrorKind::DestinationCreate,
            AcquireError::Copy { .. } => ErrorKind::Copy,
        }
    }

    /// True when a caller-driven retry has a reasonable chance of succeeding:
    /// timeouts, connection failures, 408, 429 and 5xx responses.
    /// Nothing in this crate retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            AcquireError::Fetch { source, .. } => source.is_transient(),
            _ => false,
        }
    }

    pub(crate) fn fetch(url: &str, source: FetchFailure) -> Self {
        AcquireError::Fetch {
            url: url.to_string(),
            source,
        }
    }
}

/// Why a remote fetch failed.
#[derive(Debug)]
pub enum FetchFailure {
    /// The URL did not parse.
    InvalidUrl(url::ParseError),
    /// The URL parsed but is not http or https.
    UnsupportedScheme(String),
    /// libcurl reported a transport error (DNS, connect, TLS, ...).
    Transport(curl::Error),
    /// The server answered with something other than 200 OK.
    Status(u32),
}

impl FetchFailure {
    fn is_transient(&self) -> bool {
        match self {
            FetchFailure::Transport(e) => {
                e.is_operation_timedout()
                    || e.is_couldnt_connect()
                    || e.is_couldnt_resolve_host()
                    || e.is_couldnt_resolve_proxy()
                    || e.is_recv_error()
                    || e.is_send_error()
                    || e.is_got_nothing()
            }
            FetchFailure::Status(code) => matches!(*code, 408 | 429 | 500..=599),
            FetchFailure::InvalidUrl(_) | FetchFailure::UnsupportedScheme(_) => false,
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::InvalidUrl(e) => write!(f, "invalid URL: {}", e),
            FetchFailure::UnsupportedScheme(s) => write!(f, "unsupported protocol scheme \"{}\"", s),
            FetchFailure::Transport(e) => write!(f, "request failed: {}", e),
            FetchFailure::Status(code) => write!(f, "status code {}", code),
        }
    }
}

impl std::error::Error for FetchFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchFailure::InvalidUrl(e) => Some(e),
            FetchFailure::Transport(e) => Some(e),
            FetchFailure::UnsupportedScheme(_) | FetchFailure::Status(_) => None,
        }
    }
}
