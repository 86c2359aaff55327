use crate::error::{Result, TransfoError};
use std::fs;
use std::path::Path;

/// Reads the contents of a file at the given path
///
/// # Errors
///
/// - `TransfoError::SourceNotFound` if the path doesn't exist or isn't a file.
/// - `TransfoError::Io` if there's an error reading the file.
pub fn read_file_contents(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(TransfoError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }

    fs::read_to_string(path).map_err(std::convert::Into::into)
}

/// Writes `contents` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns `TransfoError::Destination` if the parent directories or the file
/// itself cannot be created or written.
pub fn write_file_contents(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| TransfoError::Destination {
            path: path.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, contents).map_err(|source| TransfoError::Destination {
        path: path.to_path_buf(),
        source,
    })
}
