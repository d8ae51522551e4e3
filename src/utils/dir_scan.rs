use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File extension identifying a patch, compared case-insensitively
pub const PATCH_EXTENSION: &str = ".ips";

/// Order in which directory entries are visited and recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingOrder {
    /// Whatever order the filesystem returns
    #[default]
    Filesystem,
    /// Ascending by name
    Sorted,
}

/// Options shared by the manifest and index commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanOptions {
    pub order: ListingOrder,
    /// Report what would be written without touching the filesystem
    pub dry_run: bool,
}

/// True if `name` ends in `.ips`, ignoring ASCII case.
pub fn is_patch_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(PATCH_EXTENSION)
}

/// Log a skipped non UTF-8 name, at `warn` when it would have been a patch.
/// Returns true if the dropped name looked like a patch.
pub fn warn_if_patch_like(path: &Path) -> bool {
    let lossy = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if is_patch_name(&lossy) {
        tracing::warn!(path = %path.display(), "skipping patch file with non UTF-8 name");
        true
    } else {
        tracing::debug!(path = %path.display(), "skipping non UTF-8 file name");
        false
    }
}

/// List the immediate subdirectories of `dir`.
/// Symlinks are followed; entries whose target cannot be inspected are skipped.
pub fn list_subfolders(dir: &Path, order: ListingOrder) -> io::Result<Vec<PathBuf>> {
    let mut folders = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            folders.push(path);
        } else {
            tracing::debug!(path = %path.display(), "skipping non-directory entry");
        }
    }

    if order == ListingOrder::Sorted {
        folders.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    }
    Ok(folders)
}

/// List the names (not paths) of patch files directly inside `dir`.
/// Only regular files count; a directory named `foo.ips` is ignored.
pub fn list_patch_files(dir: &Path, order: ListingOrder) -> io::Result<Vec<String>> {
    let mut patches = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn_if_patch_like(&entry.path());
            continue;
        };

        if is_patch_name(&name) && entry.path().is_file() {
            patches.push(name);
        }
    }

    if order == ListingOrder::Sorted {
        patches.sort();
    }
    Ok(patches)
}
