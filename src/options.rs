use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Default chunk size for the bounded copy (64 KiB).
pub const DEFAULT_BUFFER_BYTES: usize = 64 * 1024;

// libcurl accepts receive buffers between 1 KiB and 512 KiB.
const CURL_MIN_BUFFER: usize = 1024;
const CURL_MAX_BUFFER: usize = 512 * 1024;

/// Tunables for [`crate::acquire_image_with`]. None of them change which
/// source is used or how failures are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquireOptions {
    /// Chunk size in bytes used when streaming source to destination.
    pub buffer_bytes: usize,
    /// `User-Agent` header for remote fetches (None = send none).
    pub user_agent: Option<String>,
}

impl Default for AcquireOptions {
    fn default() -> Self {
        Self {
            buffer_bytes: DEFAULT_BUFFER_BYTES,
            user_agent: Some(concat!("img-get/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

impl AcquireOptions {
    /// Parses options from a TOML table, e.g. a section of the embedding
    /// application's own config file. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let opts: AcquireOptions = toml::from_str(s)?;
        Ok(opts)
    }

    /// Buffer size for the local copy loop (never zero).
    pub(crate) fn local_buffer_bytes(&self) -> usize {
        self.buffer_bytes.max(1)
    }

    /// Buffer size handed to libcurl, clamped to the range it accepts.
    pub(crate) fn curl_buffer_bytes(&self) -> usize {
        self.buffer_bytes.clamp(CURL_MIN_BUFFER, CURL_MAX_BUFFER)
    }
}
