use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

// Maximum size accepted for a single session file: 10MB
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Validates that a file's size is within acceptable limits.
///
/// Takes the open file handle so the check and the subsequent read use the
/// same inode (no TOCTOU window).
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_FILE_SIZE_BYTES
        );
    }

    Ok(())
}

/// Read a session file into a string, replacing invalid UTF-8 rather than
/// failing. Encoding damage then surfaces as per-line decode skips instead
/// of a fatal read error; only opening/reading the file itself can fail.
pub fn read_to_string_lossy(path: &Path) -> Result<String> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open session file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read session file: {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
