//! Package env file: loading its variables and copying it into a release.

use crate::error::{ReleaseError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Variables read from the package env file, layered over the process
/// environment. File values win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    file: HashMap<String, String>,
}

impl EnvVars {
    /// Load `KEY=VALUE` lines from an env file
    ///
    /// Values are taken literally: no `$VAR` expansion and no escapes.
    /// Blank lines and `#` comments are skipped, an `export ` prefix and
    /// surrounding double quotes are stripped. A missing file is reported
    /// with its path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ReleaseError::FileNotFound(path.to_path_buf()),
            _ => ReleaseError::Io(e),
        })?;

        let mut file = HashMap::new();
        for (index, line) in content.lines().enumerate() {
            if let Some((key, value)) = parse_line(line).map_err(|reason| {
                ReleaseError::config(format!("{}:{}: {}", path.display(), index + 1, reason))
            })? {
                file.insert(key, value);
            }
        }

        info!("loaded env vars from {}", path.display());
        Ok(EnvVars { file })
    }

    /// Build from explicit pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        EnvVars {
            file: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look a variable up in the file first, then the process environment
    pub fn get(&self, key: &str) -> Option<String> {
        self.file
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
    }

    /// Number of variables read from the file
    pub fn len(&self) -> usize {
        self.file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_empty()
    }
}

/// Split one env-file line into a key and its literal value
///
/// Returns `Ok(None)` for blank lines and comments.
fn parse_line(line: &str) -> std::result::Result<Option<(String, String)>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", line))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing variable name in '{}'", line));
    }

    Ok(Some((key.to_string(), value.trim().trim_matches('"').to_string())))
}

/// Copy the env file to `<release_dir>/init/<file name>`
///
/// Both the source and the destination directory must already exist.
pub fn copy_env(src: &Path, release_dir: &Path) -> Result<PathBuf> {
    let file_name = src
        .file_name()
        .ok_or_else(|| ReleaseError::config(format!("Not a file: {}", src.display())))?;
    let dest = release_dir.join("init").join(file_name);

    debug!("src: {}", src.display());
    debug!("target: {}", release_dir.display());
    debug!("dest: {}", dest.display());

    if !src.is_file() {
        return Err(ReleaseError::FileNotFound(src.to_path_buf()));
    }
    let dest_dir = release_dir.join("init");
    if !dest_dir.is_dir() {
        return Err(ReleaseError::FileNotFound(dest_dir));
    }

    fs::copy(src, &dest)?;
    info!("Copied {} to {}", src.display(), dest.display());
    Ok(dest)
}
