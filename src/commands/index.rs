use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ScanError;
use crate::utils::dir_scan::{ListingOrder, ScanOptions, is_patch_name, warn_if_patch_like};
use crate::utils::manifest::PatchManifest;

/// Category folders indexed when none are named
pub const DEFAULT_CATEGORIES: [&str; 4] = ["battle", "map", "portraits", "game"];
/// Extension of the index written next to each category folder
pub const INDEX_EXTENSION: &str = ".json";

/// Index of every patch below one category folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryIndex {
    pub category: String,
    /// Location of `<category>.json`
    pub path: PathBuf,
    /// Patch paths relative to the category folder, `/`-separated
    pub manifest: PatchManifest,
}

impl CategoryIndex {
    pub fn patch_count(&self) -> usize {
        self.manifest.len()
    }

    pub fn confirmation(&self) -> String {
        format!(
            "✓ Wrote index for '{}' with {} patch(es).",
            self.category,
            self.patch_count()
        )
    }
}

/// Walk `<patches_dir>/<category>` recursively and write
/// `<patches_dir>/<category>.json` for each category, even when empty.
/// An empty `categories` slice means [`DEFAULT_CATEGORIES`].
pub fn run<F>(
    patches_dir: &Path,
    categories: &[String],
    options: ScanOptions,
    mut report: F,
) -> Result<Vec<CategoryIndex>, ScanError>
where
    F: FnMut(&CategoryIndex),
{
    let categories: Vec<String> = if categories.is_empty() {
        DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
    } else {
        categories.to_vec()
    };

    tracing::info!(
        patches_dir = %patches_dir.display(),
        categories = categories.len(),
        "building category indexes"
    );

    let mut written = Vec::new();

    for category in categories {
        let category_dir = patches_dir.join(&category);
        let patches =
            collect_patches(&category_dir, options.order).map_err(|source| ScanError::Walk {
                path: category_dir.clone(),
                source,
            })?;
        tracing::debug!(category = %category, patches = patches.len(), "walked category");

        let entry = CategoryIndex {
            path: patches_dir.join(format!("{}{}", category, INDEX_EXTENSION)),
            category,
            manifest: PatchManifest::new(patches),
        };

        if !options.dry_run {
            entry.manifest.save(&entry.path).map_err(|source| ScanError::WriteManifest {
                path: entry.path.clone(),
                source,
            })?;
        }

        report(&entry);
        written.push(entry);
    }

    Ok(written)
}

/// Relative paths of every patch file at any depth below `root`.
/// Symlinks are not followed. `root` itself must be a directory.
pub fn collect_patches(root: &Path, order: ListingOrder) -> io::Result<Vec<String>> {
    if !fs::metadata(root)?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("{} is not a directory", root.display()),
        ));
    }

    let mut walker = WalkDir::new(root).min_depth(1);
    if order == ListingOrder::Sorted {
        walker = walker.sort_by_file_name();
    }

    let mut patches = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            warn_if_patch_like(entry.path());
            continue;
        };
        if !is_patch_name(name) {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        patches.push(to_slash_path(relative));
    }

    Ok(patches)
}

fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
