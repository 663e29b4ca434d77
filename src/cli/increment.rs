//! `increment_version`: print the next release-candidate tag

use std::path::PathBuf;

use crate::analyzer::VersionIncrementer;
use crate::config;
use crate::error::Result;
use crate::git::Git2Repository;

#[derive(clap::Parser, Debug, Clone, PartialEq)]
#[command(
    name = "increment_version",
    about = "Print the next release-candidate tag computed from the repository's version tags",
    version
)]
pub struct IncrementArgs {
    #[arg(long, help = "Add debug printing")]
    pub debug: bool,

    #[arg(long, help = "Use local tags only, do not fetch from the remote")]
    pub offline: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = ".", help = "Path to the git repository")]
    pub repo: PathBuf,
}

impl IncrementArgs {
    /// Log level for this run
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "warn"
        }
    }
}

/// Compute the next tag for the repository at `args.repo`
pub fn run(args: &IncrementArgs) -> Result<String> {
    let config = config::load_config(args.config.as_deref())?;
    let repo = Git2Repository::open(&args.repo)?;
    let incrementer = VersionIncrementer::new(config.increment);

    let next = incrementer.next_for_repository(&repo, !args.offline)?;
    Ok(next.tag())
}
