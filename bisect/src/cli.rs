//! Command-line surface and collaborator assembly.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::core::types::Range;
use crate::io::artifacts::ArtifactStore;
use crate::io::config::{BisectConfig, load_config};
use crate::io::tester::CommandTestRunner;
use crate::io::vcs::CommandVcs;
use crate::run::{RunOutcome, run_bisection};

/// Locate the revision pair where a test command's output changes.
#[derive(Debug, Parser)]
#[command(
    name = "bisect",
    version,
    about = "Bisect a linear revision range for a change in test output"
)]
pub struct Cli {
    /// Revision range to search, as LOW:HIGH (requires high - low >= 2).
    #[arg(short = 'r', value_name = "LOW:HIGH", value_parser = parse_revision_pair)]
    pub range: Range,

    /// Test command whose stdout is the comparison signal.
    #[arg(short = 'c', value_name = "COMMAND")]
    pub test_command: String,

    /// Base name for per-revision artifact files.
    #[arg(short = 'n', value_name = "NAME", default_value = "revision")]
    pub test_name: String,

    /// Directory for per-revision artifacts (defaults to the platform temp dir).
    #[arg(short = 'd', value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Suppress echo of sync command lines.
    #[arg(short = 'q')]
    pub quiet: bool,

    /// Optional TOML config with hardening knobs (sync command, timeout).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Parse `LOW:HIGH` and refuse degenerate ranges up front, before any sync
/// or test invocation can happen.
pub fn parse_revision_pair(raw: &str) -> Result<Range, String> {
    let (low, high) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected LOW:HIGH, got '{raw}'"))?;
    let low: u64 = low
        .trim()
        .parse()
        .map_err(|_| format!("invalid low revision '{low}'"))?;
    let high: u64 = high
        .trim()
        .parse()
        .map_err(|_| format!("invalid high revision '{high}'"))?;
    if high < low + 2 {
        return Err(format!(
            "range {low}:{high} leaves nothing to probe (need high - low >= 2)"
        ));
    }
    Ok(Range::new(low, high))
}

/// Assemble the collaborators from flags and config, then drive the run.
pub fn execute(cli: &Cli) -> Result<RunOutcome> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BisectConfig::default(),
    };
    let workdir = std::env::current_dir().context("resolve working directory")?;
    let outdir = cli.outdir.clone().unwrap_or_else(std::env::temp_dir);

    let store = ArtifactStore::new(outdir, cli.test_name.clone());
    let vcs = CommandVcs::new(config.sync.command.clone(), &workdir, cli.quiet)?;
    let tester = CommandTestRunner::from_command_line(
        &cli.test_command,
        &workdir,
        config.test_timeout(),
        config.output_limit_bytes,
    )?;

    run_bisection(&vcs, &tester, &store, cli.range)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_flag_set() {
        let cli = Cli::parse_from([
            "bisect", "-r", "920:967", "-c", "./regress.sh", "-n", "regress", "-d", "/tmp/out",
            "-q",
        ]);
        assert_eq!(cli.range, Range::new(920, 967));
        assert_eq!(cli.test_command, "./regress.sh");
        assert_eq!(cli.test_name, "regress");
        assert_eq!(cli.outdir, Some(PathBuf::from("/tmp/out")));
        assert!(cli.quiet);
    }

    #[test]
    fn optional_flags_have_defaults() {
        let cli = Cli::parse_from(["bisect", "-r", "10:20", "-c", "true"]);
        assert_eq!(cli.test_name, "revision");
        assert_eq!(cli.outdir, None);
        assert!(!cli.quiet);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn missing_required_flags_fail_parsing() {
        assert!(Cli::try_parse_from(["bisect", "-c", "true"]).is_err());
        assert!(Cli::try_parse_from(["bisect", "-r", "10:20"]).is_err());
    }

    #[test]
    fn revision_pair_accepts_gap_of_two() {
        assert_eq!(parse_revision_pair("10:12"), Ok(Range::new(10, 12)));
    }

    #[test]
    fn revision_pair_rejects_degenerate_ranges() {
        assert!(parse_revision_pair("5:6").is_err());
        assert!(parse_revision_pair("5:5").is_err());
        assert!(parse_revision_pair("6:5").is_err());
    }

    #[test]
    fn revision_pair_rejects_malformed_input() {
        assert!(parse_revision_pair("10").is_err());
        assert!(parse_revision_pair("a:b").is_err());
        assert!(parse_revision_pair("-3:10").is_err());
    }

    #[test]
    fn degenerate_range_is_a_parse_error_not_a_run_error() {
        // Scenario: `-r 5:6` must fail before any sync or test happens.
        assert!(Cli::try_parse_from(["bisect", "-r", "5:6", "-c", "true"]).is_err());
    }
}
