use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Filename for the per-folder manifest
pub const MANIFEST_FILENAME: &str = "manifest.json";

/// Ordered list of patch names, stored on disk as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchManifest {
    pub patches: Vec<String>,
}

impl PatchManifest {
    pub fn new(patches: Vec<String>) -> Self {
        PatchManifest { patches }
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Pretty JSON with 2-space indentation and no trailing newline.
    pub fn to_json(&self) -> io::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn load(path: &Path) -> io::Result<PatchManifest> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Create or overwrite the file at `path`.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let content = self.to_json()?;
        fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn json_layout_uses_two_space_indent() {
        let manifest =
            PatchManifest::new(vec!["battle.ips".to_string(), "portrait.IPS".to_string()]);

        let json = manifest.to_json().unwrap();

        assert_eq!(json, "[\n  \"battle.ips\",\n  \"portrait.IPS\"\n]");
    }

    #[test]
    fn empty_manifest_is_empty_array() {
        let manifest = PatchManifest::default();

        assert_eq!(manifest.to_json().unwrap(), "[]");
        assert!(manifest.is_empty());
    }

    #[test]
    fn save_overwrites_existing_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "stale content that is longer than the new manifest").unwrap();

        PatchManifest::new(vec!["a.ips".to_string()]).save(temp_file.path()).unwrap();

        let content = fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "[\n  \"a.ips\"\n]");
    }

    #[test]
    fn load_reads_saved_manifest() {
        let manifest = PatchManifest::new(vec!["map.ips".to_string(), "Game.IPS".to_string()]);

        let temp_file = NamedTempFile::new().unwrap();
        manifest.save(temp_file.path()).unwrap();

        let loaded = PatchManifest::load(temp_file.path()).unwrap();
        assert_eq!(loaded, manifest);
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let result = PatchManifest::load(Path::new("/nonexistent/manifest.json"));
        assert!(result.is_err());
    }

    #[test]
    fn load_malformed_json_returns_invalid_data() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "{\"version\": 1}").unwrap();

        let err = PatchManifest::load(temp_file.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
