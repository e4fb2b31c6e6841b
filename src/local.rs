//! Local file source: open, then copy in fixed-size chunks.

use crate::destination;
use crate::error::AcquireError;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Copies `source` to `destination` and returns the number of bytes written.
pub(crate) fn copy_local(
    source: &Path,
    destination: &Path,
    buffer_bytes: usize,
) -> Result<u64, AcquireError> {
    let mut reader = File::open(source).map_err(|e| AcquireError::SourceOpen {
        path: source.to_path_buf(),
        source: e,
    })?;
    let mut writer = destination::prepare(destination)?;
    copy_chunked(&mut reader, &mut writer, buffer_bytes).map_err(|e| AcquireError::Copy {
        path: destination.to_path_buf(),
        source: e,
    })
}

/// Bounded-memory copy: one `buffer_bytes` chunk in flight at a time.
pub(crate) fn copy_chunked<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer_bytes: usize,
) -> io::Result<u64> {
    let mut buf = vec![0u8; buffer_bytes];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buf[..n])?;
        total += n as u64;
    }
    writer.flush()?;
    Ok(total)
}
