//! Source selection: exactly one of a remote URL or a local path.

use crate::error::AcquireError;
use std::path::PathBuf;

/// Where the image bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDescriptor {
    Remote(String),
    Local(PathBuf),
}

impl SourceDescriptor {
    /// Builds a descriptor from the two optional caller strings.
    ///
    /// The remote URL wins when both are non-empty. Both empty is an error.
    pub fn from_parts(remote_url: &str, local_path: &str) -> Result<Self, AcquireError> {
        if !remote_url.is_empty() {
            Ok(SourceDescriptor::Remote(remote_url.to_string()))
        } else if !local_path.is_empty() {
            Ok(SourceDescriptor::Local(PathBuf::from(local_path)))
        } else {
            Err(AcquireError::NoSource)
        }
    }
}
