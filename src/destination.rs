//! Destination preparation: parent directories, then the output file.

use crate::error::AcquireError;
use std::fs::{self, File};
use std::path::Path;

/// Returns the directory that must exist before `destination` can be created,
/// or `None` when it resolves to the current directory.
pub(crate) fn parent_dir(destination: &Path) -> Option<&Path> {
    destination.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Creates all missing parent directories of `destination`, then creates
/// (or truncates) the file itself.
pub(crate) fn prepare(destination: &Path) -> Result<File, AcquireError> {
    if let Some(dir) = parent_dir(destination) {
        fs::create_dir_all(dir).map_err(|source| AcquireError::DirectoryCreation {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    File::create(destination).map_err(|source| AcquireError::DestinationCreate {
        path: destination.to_path_buf(),
        source,
    })
}
