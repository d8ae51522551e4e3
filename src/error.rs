use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that abort a scan. Each variant keeps the underlying
/// `io::Error` so its kind survives to the caller.
#[derive(Debug)]
pub enum ScanError {
    /// Listing a directory or inspecting one of its entries failed
    ReadDir { path: PathBuf, source: io::Error },
    /// Recursive walk of a category folder failed
    Walk { path: PathBuf, source: io::Error },
    /// Serializing or writing a manifest failed
    WriteManifest { path: PathBuf, source: io::Error },
}

impl ScanError {
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            ScanError::ReadDir { source, .. }
            | ScanError::Walk { source, .. }
            | ScanError::WriteManifest { source, .. } => source.kind(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ScanError::ReadDir { path, .. }
            | ScanError::Walk { path, .. }
            | ScanError::WriteManifest { path, .. } => path,
        }
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::ReadDir { path, source } => {
                write!(f, "failed to read directory {}: {}", path.display(), source)
            }
            ScanError::Walk { path, source } => {
                write!(f, "failed to walk {}: {}", path.display(), source)
            }
            ScanError::WriteManifest { path, source } => {
                write!(f, "failed to write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::ReadDir { source, .. } => Some(source),
            ScanError::Walk { source, .. } => Some(source),
            ScanError::WriteManifest { source, .. } => Some(source),
        }
    }
}
