use std::path::{Path, PathBuf};

use crate::error::ScanError;
use crate::utils::dir_scan::{ScanOptions, list_patch_files, list_subfolders};
use crate::utils::manifest::{MANIFEST_FILENAME, PatchManifest};

/// A manifest written (or, in a dry run, due to be written) for one subfolder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderManifest {
    /// Subfolder name relative to the base directory
    pub folder: String,
    /// Location of the manifest.json file
    pub path: PathBuf,
    pub manifest: PatchManifest,
}

impl FolderManifest {
    pub fn patch_count(&self) -> usize {
        self.manifest.len()
    }

    pub fn confirmation(&self) -> String {
        format!(
            "✓ Wrote manifest for '{}' with {} patch(es).",
            self.folder,
            self.patch_count()
        )
    }
}

/// Write a manifest.json into every immediate subfolder of `base_dir` that
/// holds at least one `.ips` file, printing a confirmation after each write.
pub fn generate_manifests(base_dir: &Path) -> Result<Vec<FolderManifest>, ScanError> {
    run(base_dir, ScanOptions::default(), |written| {
        println!("{}", written.confirmation());
    })
}

/// Scan `base_dir` one level deep and write a manifest per patch folder.
///
/// `report` is called once per manifest, right after it is written. The first
/// filesystem error stops the run; manifests written before it stay on disk.
pub fn run<F>(
    base_dir: &Path,
    options: ScanOptions,
    mut report: F,
) -> Result<Vec<FolderManifest>, ScanError>
where
    F: FnMut(&FolderManifest),
{
    tracing::info!(
        base_dir = %base_dir.display(),
        dry_run = options.dry_run,
        "generating manifests"
    );

    let folders =
        list_subfolders(base_dir, options.order).map_err(|source| ScanError::ReadDir {
            path: base_dir.to_path_buf(),
            source,
        })?;

    let mut written = Vec::new();

    for folder_path in folders {
        let patches =
            list_patch_files(&folder_path, options.order).map_err(|source| ScanError::ReadDir {
                path: folder_path.clone(),
                source,
            })?;

        let folder = folder_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::debug!(folder = %folder, patches = patches.len(), "scanned folder");

        // Folders without patches keep whatever manifest they already have
        if patches.is_empty() {
            continue;
        }

        let entry = FolderManifest {
            folder,
            path: folder_path.join(MANIFEST_FILENAME),
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

    tracing::info!(manifests = written.len(), "finished generating manifests");
    Ok(written)
}
