use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "release.toml";

/// Represents the complete configuration for the release tools.
///
/// Every section has defaults, so an empty file (or no file) is valid.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub increment: IncrementConfig,

    #[serde(default)]
    pub install: InstallConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

fn default_candidate_branch() -> String {
    "develop".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Settings for computing the next version tag.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IncrementConfig {
    /// The only branch allowed to cut release candidates
    #[serde(default = "default_candidate_branch")]
    pub branch: String,

    /// Remote to fetch tags from
    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for IncrementConfig {
    fn default() -> Self {
        IncrementConfig {
            branch: default_candidate_branch(),
            remote: default_remote(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_repo() -> String {
    "ninja-syndicate/passport-server".to_string()
}

fn default_package() -> String {
    "passport-api".to_string()
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("/usr/share/ninja_syndicate")
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_token_env() -> String {
    "GITHUB_PAT".to_string()
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Settings for downloading and unpacking a release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct InstallConfig {
    /// Base URL of the release-hosting REST API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Repository in `owner/name` form
    #[serde(default = "default_repo")]
    pub repo: String,

    /// Package name; drives the env file and dump file names
    #[serde(default = "default_package")]
    pub package: String,

    /// Root of the installation; database dumps go below it
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Directory the archive is downloaded to and extracted in
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// Environment variable holding the API token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        InstallConfig {
            api_base: default_api_base(),
            repo: default_repo(),
            package: default_package(),
            base_dir: default_base_dir(),
            work_dir: default_work_dir(),
            token_env: default_token_env(),
            user_agent: default_user_agent(),
        }
    }
}

impl InstallConfig {
    /// The package env file, `<package>_online/init/<package>.env`
    pub fn env_file(&self) -> PathBuf {
        self.work_dir
            .join(format!("{}_online", self.package))
            .join("init")
            .join(format!("{}.env", self.package))
    }

    /// Directory database dumps are written to
    pub fn dump_dir(&self) -> PathBuf {
        self.base_dir
            .join(format!("{}_online", self.package))
            .join("db_copy")
    }
}

fn default_env_prefix() -> String {
    "PASSPORT_DATABASE".to_string()
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_dump_command() -> String {
    "pg_dump".to_string()
}

fn default_min_dump_bytes() -> u64 {
    50_000
}

/// Settings for the pre-install database dump.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Prefix of the `_NAME`, `_HOST` and `_PORT` variables
    #[serde(default = "default_env_prefix")]
    pub env_prefix: String,

    #[serde(default = "default_db_user")]
    pub user: String,

    /// Dump executable, looked up on PATH
    #[serde(default = "default_dump_command")]
    pub dump_command: String,

    /// Dumps at or below this size are treated as failed
    #[serde(default = "default_min_dump_bytes")]
    pub min_dump_bytes: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            env_prefix: default_env_prefix(),
            user: default_db_user(),
            dump_command: default_dump_command(),
            min_dump_bytes: default_min_dump_bytes(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in current directory
/// 3. `.release.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user_path.exists() {
            fs::read_to_string(user_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
