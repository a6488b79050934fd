//! Registry configuration, optionally loaded from a TOML file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::naming::is_identifier;

/// Mapping configuration (TOML).
///
/// Every field has a default, so an empty file or no file at all yields the
/// conventional `FooToBarMapper` naming with first-match lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MappingConfig {
    /// What `register` does when a source/target pair is already bound.
    pub duplicates: DuplicatePolicy,

    pub naming: NamingConfig,
}

/// Pieces of the `<Source><separator><Target><suffix>` mapper name format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NamingConfig {
    pub separator: String,
    pub suffix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            separator: "To".to_string(),
            suffix: "Mapper".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Keep every binding; lookup returns the first one registered.
    #[default]
    Shadow,
    /// Refuse to register a second binding for the same pair.
    Reject,
}

impl MappingConfig {
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.naming.separator) {
            return Err(anyhow!(
                "naming.separator must be a non-empty identifier, got {:?}",
                self.naming.separator
            ));
        }
        if !is_identifier(&self.naming.suffix) {
            return Err(anyhow!(
                "naming.suffix must be a non-empty identifier, got {:?}",
                self.naming.suffix
            ));
        }
        let separator = &self.naming.separator;
        if !separator.starts_with(|c: char| c.is_ascii_uppercase()) {
            return Err(anyhow!(
                "naming.separator must start with an uppercase letter"
            ));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `MappingConfig::default()`.
pub fn load_config(path: &Path) -> Result<MappingConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no mapping config, using defaults");
        return Ok(MappingConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: MappingConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate().with_context(|| format!("validate {}", path.display()))?;
    debug!(path = %path.display(), duplicates = ?cfg.duplicates, "loaded mapping config");
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &MappingConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, buf)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, MappingConfig::default());
        assert_eq!(cfg.naming.separator, "To");
        assert_eq!(cfg.duplicates, DuplicatePolicy::Shadow);
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("objmap.toml");
        let cfg = MappingConfig {
            duplicates: DuplicatePolicy::Reject,
            naming: NamingConfig {
                separator: "Into".to_string(),
                suffix: "Converter".to_string(),
            },
        };
        write_config(&path, &cfg).expect("write");
        assert_eq!(load_config(&path).expect("load"), cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("objmap.toml");
        fs::write(&path, "duplicates = \"reject\"\n").expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.duplicates, DuplicatePolicy::Reject);
        assert_eq!(cfg.naming, NamingConfig::default());
    }

    #[test]
    fn invalid_naming_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("objmap.toml");
        fs::write(&path, "[naming]\nseparator = \"\"\n").expect("write");

        let err = load_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains("naming.separator"));
    }
}
