//! Working-copy sync adapter.
//!
//! The bisector needs exactly one operation from version control: bring the
//! working copy to an exact point in history. We keep a small, explicit
//! wrapper around the sync subprocess so the loop stays agnostic of the
//! actual VCS; sync must be idempotent and deterministic (same revision,
//! same tree contents).

use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument};

use crate::core::types::RevisionId;

/// Placeholder expanded to the revision number in the sync command.
pub const REV_PLACEHOLDER: &str = "{rev}";

/// Abstraction over working-copy synchronization.
pub trait Vcs {
    /// Sync the working copy to exactly `rev`. Failure is fatal to the run.
    fn sync(&self, rev: RevisionId) -> Result<()>;
}

/// Sync via a configurable subprocess, e.g. `svn update -r {rev}`.
///
/// Every argument containing [`REV_PLACEHOLDER`] gets the revision number
/// substituted; if no argument names it, the revision is appended as the
/// final argument. The rendered command line is echoed to stderr unless
/// quiet mode is set.
#[derive(Debug, Clone)]
pub struct CommandVcs {
    command: Vec<String>,
    workdir: PathBuf,
    quiet: bool,
}

impl CommandVcs {
    pub fn new(command: Vec<String>, workdir: impl Into<PathBuf>, quiet: bool) -> Result<Self> {
        if command.is_empty() || command[0].trim().is_empty() {
            return Err(anyhow!("sync command must not be empty"));
        }
        Ok(Self {
            command,
            workdir: workdir.into(),
            quiet,
        })
    }

    fn render(&self, rev: RevisionId) -> Vec<String> {
        let rev = rev.to_string();
        let mut argv: Vec<String> = self.command.clone();
        let mut substituted = false;
        for arg in &mut argv {
            if arg.contains(REV_PLACEHOLDER) {
                *arg = arg.replace(REV_PLACEHOLDER, &rev);
                substituted = true;
            }
        }
        if !substituted {
            argv.push(rev);
        }
        argv
    }
}

impl Vcs for CommandVcs {
    #[instrument(skip_all, fields(rev))]
    fn sync(&self, rev: RevisionId) -> Result<()> {
        let argv = self.render(rev);
        if !self.quiet {
            eprintln!("{}", argv.join(" "));
        }
        let output = Command::new(&argv[0])
            .args(&argv[1..])
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("spawn {}", argv.join(" ")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("{} failed: {}", argv.join(" "), stderr.trim()));
        }
        debug!(rev, "working copy synced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_the_placeholder() {
        let vcs = CommandVcs::new(
            vec!["svn".into(), "update".into(), "-r".into(), "{rev}".into()],
            ".",
            true,
        )
        .expect("vcs");
        assert_eq!(vcs.render(942), vec!["svn", "update", "-r", "942"]);
    }

    #[test]
    fn render_appends_when_no_placeholder() {
        let vcs = CommandVcs::new(vec!["sync-to".into()], ".", true).expect("vcs");
        assert_eq!(vcs.render(7), vec!["sync-to", "7"]);
    }

    #[test]
    fn empty_command_is_rejected() {
        assert!(CommandVcs::new(Vec::new(), ".", true).is_err());
        assert!(CommandVcs::new(vec!["  ".into()], ".", true).is_err());
    }

    #[test]
    fn successful_sync_returns_ok() {
        let vcs = CommandVcs::new(vec!["true".into()], ".", true).expect("vcs");
        vcs.sync(1).expect("sync");
    }

    #[test]
    fn failed_sync_surfaces_stderr() {
        let vcs = CommandVcs::new(
            vec!["sh".into(), "-c".into(), "echo no such revision >&2; exit 1".into()],
            ".",
            true,
        )
        .expect("vcs");
        let err = vcs.sync(9).unwrap_err();
        assert!(err.to_string().contains("no such revision"));
    }
}
