use std::path::{Path, PathBuf};

use anyhow::Context;
use rostercar_dag::ImportConfig;
use serde::{Deserialize, Serialize};

/// Settings for `rostercar pack`, read from a TOML file.
///
/// ```toml
/// output_dir = "exports"
///
/// [import]
/// max_leaf_size = 262144
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackConfig {
    /// Directory for archives written under their default name.
    pub output_dir: Option<PathBuf>,
    pub import: ImportConfig,
}

impl PackConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = PackConfig::default();
        assert!(c.output_dir.is_none());
        assert_eq!(c.import, ImportConfig::default());
    }

    #[test]
    fn load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rostercar.toml");
        std::fs::write(&path, "[import]\nmax_leaf_size = 1024\n").unwrap();

        let c = PackConfig::load(&path).unwrap();
        assert_eq!(c.import.max_leaf_size, 1024);
        assert!(c.output_dir.is_none());
    }

    #[test]
    fn load_missing_file_fails() {
        let err = PackConfig::load(Path::new("/nonexistent/rostercar.toml")).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
