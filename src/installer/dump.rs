//! Gzip-compressed database dumps taken before an install.

use crate::config::DatabaseConfig;
use crate::error::{ReleaseError, Result};
use crate::installer::env_file::EnvVars;
use chrono::{DateTime, Local};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Connection parameters passed to the dump tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpTarget {
    pub name: String,
    pub host: String,
    pub port: String,
    pub user: String,
}

impl DumpTarget {
    /// Read `<PREFIX>_NAME`, `<PREFIX>_HOST` and `<PREFIX>_PORT`
    pub fn from_env(config: &DatabaseConfig, env: &EnvVars) -> Result<Self> {
        let lookup = |suffix: &str| {
            let key = format!("{}_{}", config.env_prefix, suffix);
            env.get(&key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| ReleaseError::config(format!("{} is not set", key)))
        };

        Ok(DumpTarget {
            name: lookup("NAME")?,
            host: lookup("HOST")?,
            port: lookup("PORT")?,
            user: config.user.clone(),
        })
    }

    /// Command-line arguments for `pg_dump`
    pub fn args(&self) -> Vec<String> {
        vec![
            format!("--dbname={}", self.name),
            format!("--host={}", self.host),
            format!("--port={}", self.port),
            format!("--username={}", self.user),
        ]
    }
}

/// `<dir>/<package>_<YYYYmmddHHMMSS>.sql.gz`
pub fn dump_file_path(dir: &Path, package: &str, now: DateTime<Local>) -> PathBuf {
    dir.join(format!("{}_{}.sql.gz", package, now.format("%Y%m%d%H%M%S")))
}

/// Run the dump tool, gzip its output into `dest`, and check the result
///
/// Returns the size of the compressed dump.
pub fn run_dump(config: &DatabaseConfig, target: &DumpTarget, dest: &Path) -> Result<u64> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    info!("Starting database dump");
    debug!("{} {}", config.dump_command, target.args().join(" "));

    let mut child = Command::new(&config.dump_command)
        .args(target.args())
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ReleaseError::DumpToolMissing(config.dump_command.clone()),
            _ => ReleaseError::Io(e),
        })?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| ReleaseError::dump("dump tool stdout was not captured"))?;

    if let Err(e) = write_compressed(&mut stdout, dest) {
        // the tool may still be running
        drop(stdout);
        let _ = child.kill();
        let _ = child.wait();
        return Err(e);
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(ReleaseError::dump(format!(
            "{} exited with {}",
            config.dump_command, status
        )));
    }

    info!("Dumped database {} into {}", target.name, dest.display());
    verify_dump(dest, config.min_dump_bytes)
}

fn write_compressed(source: &mut impl Read, dest: &Path) -> Result<u64> {
    let mut encoder = GzEncoder::new(BufWriter::new(File::create(dest)?), Compression::default());
    let copied = io::copy(source, &mut encoder)?;
    encoder.finish()?.into_inner().map_err(|e| e.into_error())?;
    Ok(copied)
}

/// Fail if the dump is missing or not larger than `min_bytes`
pub fn verify_dump(path: &Path, min_bytes: u64) -> Result<u64> {
    let size = match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ReleaseError::dump(format!(
                "Dump file doesn't exist: {}",
                path.display()
            )))
        }
        Err(e) => return Err(e.into()),
    };

    if size <= min_bytes {
        return Err(ReleaseError::dump(format!(
            "Dump file smaller than expected: {} is {} bytes",
            path.display(),
            size
        )));
    }
    Ok(size)
}
