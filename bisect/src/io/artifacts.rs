//! Per-revision artifact files under the output directory.
//!
//! Every probed revision leaves its captured stdout (`.out`) and diagnostic
//! stderr (`.log`) on disk before classification happens, so runs that later
//! abort keep their evidence. A machine-readable summary is written next to
//! them once a boundary is found.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::types::{Range, RevisionId};

/// Locations of the files recorded for one probed revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionPaths {
    pub out_path: PathBuf,
    pub log_path: PathBuf,
}

/// Machine-readable result of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub test_name: String,
    pub initial: Range,
    pub boundary: Range,
    pub revisions_tested: u32,
}

/// Directory and naming scheme for run artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    test_name: String,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>, test_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            test_name: test_name.into(),
        }
    }

    pub fn test_name(&self) -> &str {
        &self.test_name
    }

    pub fn revision_paths(&self, rev: RevisionId) -> RevisionPaths {
        RevisionPaths {
            out_path: self.dir.join(format!("{}_{}.out", self.test_name, rev)),
            log_path: self.dir.join(format!("{}_{}.log", self.test_name, rev)),
        }
    }

    /// Persist the captured streams for `rev`.
    pub fn write_revision(
        &self,
        rev: RevisionId,
        stdout: &[u8],
        stderr: &[u8],
    ) -> Result<RevisionPaths> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create artifact dir {}", self.dir.display()))?;
        let paths = self.revision_paths(rev);
        fs::write(&paths.out_path, stdout)
            .with_context(|| format!("write {}", paths.out_path.display()))?;
        fs::write(&paths.log_path, stderr)
            .with_context(|| format!("write {}", paths.log_path.display()))?;
        Ok(paths)
    }

    pub fn write_summary(&self, summary: &RunSummary) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create artifact dir {}", self.dir.display()))?;
        let path = self.dir.join(format!("{}_summary.json", self.test_name));
        write_json(&path, summary)?;
        Ok(path)
    }
}

/// Serialize `value` to pretty-printed JSON with trailing newline.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut payload = serde_json::to_string_pretty(value).context("serialize json")?;
    payload.push('\n');
    fs::write(path, payload).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
