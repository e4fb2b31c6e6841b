//! Fetch an image from a URL or copy it from a local path, and save it to a
//! destination file.
//!
//! ```no_run
//! // Download:
//! img_get::acquire_image("https://example.com/cat.jpg", "", "images/cat.jpg")?;
//! // Copy a local file:
//! img_get::acquire_image("", "/srv/pics/cat.jpg", "images/cat.jpg")?;
//! # Ok::<(), img_get::AcquireError>(())
//! ```
//!
//! The call blocks until the bytes are on disk or a stage fails. Missing parent
//! directories of the destination are created; an existing file is overwritten.
//! On a mid-copy failure the partially written destination is left in place.

pub mod error;
pub mod logging;
pub mod options;
pub mod source;

mod destination;
mod local;
mod remote;

use std::path::Path;

pub use error::{AcquireError, ErrorKind, FetchFailure};
pub use options::AcquireOptions;
pub use source::SourceDescriptor;

/// Acquires the image from `remote_url` (if non-empty) or else `local_path`,
/// and writes it to `destination` with default options.
pub fn acquire_image(
    remote_url: &str,
    local_path: &str,
    destination: impl AsRef<Path>,
) -> Result<(), AcquireError> {
    acquire_image_with(&AcquireOptions::default(), remote_url, local_path, destination)
}

/// Like [`acquire_image`] with explicit options.
pub fn acquire_image_with(
    opts: &AcquireOptions,
    remote_url: &str,
    local_path: &str,
    destination: impl AsRef<Path>,
) -> Result<(), AcquireError> {
    let source = SourceDescriptor::from_parts(remote_url, local_path)?;
    acquire_from(opts, &source, destination.as_ref())
}

/// Acquires from an already-built [`SourceDescriptor`].
pub fn acquire_from(
    opts: &AcquireOptions,
    source: &SourceDescriptor,
    destination: &Path,
) -> Result<(), AcquireError> {
    let written = match source {
        SourceDescriptor::Remote(url) => {
            tracing::debug!("fetching {} -> {}", url, destination.display());
            remote::fetch_to(url, destination, opts)?
        }
        SourceDescriptor::Local(path) => {
            tracing::debug!("copying {} -> {}", path.display(), destination.display());
            local::copy_local(path, destination, opts.local_buffer_bytes())?
        }
    };
    tracing::info!(bytes = written, "image saved as '{}'", destination.display());
    Ok(())
}
