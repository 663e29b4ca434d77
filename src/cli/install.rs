//! `install_version`: download and install a release

use std::path::PathBuf;

use crate::config;
use crate::error::{ReleaseError, Result};
use crate::hosting::{GitHubClient, VersionSelector};
use crate::installer::{EnvVars, InstallOptions, InstallOutcome, Installer};
use crate::logging;
use crate::ui::{AssumeYes, Confirm, TerminalPrompt};
use tracing::debug;

const EXAMPLES: &str = "\
Examples:
  install_version latest
  install_version v1.8.5
  LOGLEVEL=DEBUG install_version --skip-dump v1.8.5";

#[derive(clap::Parser, Debug, Clone, PartialEq)]
#[command(
    name = "install_version",
    about = "Download, extract and install a release of the package",
    after_help = EXAMPLES,
    version
)]
pub struct InstallArgs {
    #[arg(short, long, help = "Log at debug level regardless of LOGLEVEL")]
    pub verbose: bool,

    #[arg(short = 'y', long, help = "Answer every question positively")]
    pub yes: bool,

    #[arg(long, help = "Do not dump the database")]
    pub skip_dump: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(id = "release_version", value_name = "VERSION", help = "Release tag to install, or 'latest'")]
    pub version: VersionSelector,
}

impl InstallArgs {
    /// Log level for this run, from `-v`, then `$LOGLEVEL`, then `info`
    pub fn log_level(&self) -> String {
        let from_env = std::env::var(logging::LOG_LEVEL_ENV).ok();
        logging::resolve_level(self.verbose, from_env.as_deref(), "info")
    }
}

/// Install the selected release
///
/// The env file is loaded before anything else so that the API token and
/// database settings may live in it.
pub fn run(args: &InstallArgs) -> Result<InstallOutcome> {
    let config = config::load_config(args.config.as_deref())?;

    let env_path = config.install.env_file();
    let env = EnvVars::load(&env_path)?;
    debug!("loaded {} variables from {}", env.len(), env_path.display());

    let token = env
        .get(&config.install.token_env)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ReleaseError::MissingCredential(config.install.token_env.clone()))?;

    let source = GitHubClient::new(&config.install, token)?;
    let options = InstallOptions {
        skip_dump: args.skip_dump,
        show_progress: true,
    };
    let confirm: &dyn Confirm = if args.yes { &AssumeYes } else { &TerminalPrompt };

    Installer::new(
        &config.install,
        &config.database,
        &env,
        source,
        confirm,
        options,
    )
    .run(&args.version)
}
