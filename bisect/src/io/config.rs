//! Optional run configuration (TOML).
//!
//! Every field has a default so the tool works from CLI flags alone; the file
//! exists for hardening knobs that do not merit their own flags. This file is
//! intended to be edited by humans and must remain stable and automatable.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BisectConfig {
    /// Kill the test command after this many seconds. 0 blocks indefinitely,
    /// which is the default: a hung test is the user's to interrupt.
    pub test_timeout_secs: u64,

    /// Truncate captured test output beyond this many bytes. Truncated stdout
    /// aborts the run since it cannot be compared byte-for-byte.
    pub output_limit_bytes: usize,

    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncConfig {
    /// Command used to sync the working copy; `{rev}` expands to the revision
    /// number, which is appended when no argument names it.
    pub command: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            command: vec![
                "svn".to_string(),
                "update".to_string(),
                "-r".to_string(),
                "{rev}".to_string(),
            ],
        }
    }
}

impl Default for BisectConfig {
    fn default() -> Self {
        Self {
            test_timeout_secs: 0,
            output_limit_bytes: 1_000_000,
            sync: SyncConfig::default(),
        }
    }
}

impl BisectConfig {
    pub fn validate(&self) -> Result<()> {
        if self.output_limit_bytes == 0 {
            return Err(anyhow!("output_limit_bytes must be > 0"));
        }
        if self.sync.command.is_empty() || self.sync.command[0].trim().is_empty() {
            return Err(anyhow!("sync.command must be a non-empty array"));
        }
        Ok(())
    }

    /// Test timeout as a duration; `None` means block indefinitely.
    pub fn test_timeout(&self) -> Option<Duration> {
        if self.test_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.test_timeout_secs))
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `BisectConfig::default()`.
pub fn load_config(path: &Path) -> Result<BisectConfig> {
    if !path.exists() {
        let cfg = BisectConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: BisectConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &BisectConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
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
        assert_eq!(cfg, BisectConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        let cfg = BisectConfig {
            test_timeout_secs: 120,
            ..BisectConfig::default()
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn zero_timeout_means_no_timeout() {
        let cfg = BisectConfig::default();
        assert_eq!(cfg.test_timeout(), None);
        let cfg = BisectConfig {
            test_timeout_secs: 30,
            ..BisectConfig::default()
        };
        assert_eq!(cfg.test_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let cfg = BisectConfig {
            output_limit_bytes: 0,
            ..BisectConfig::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = BisectConfig {
            sync: SyncConfig {
                command: Vec::new(),
            },
            ..BisectConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
