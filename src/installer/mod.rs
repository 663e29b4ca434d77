//! Release installation workflow
//!
//! Download an asset, extract it, copy the package env file into it and
//! optionally dump the database first. Steps run in order; the first
//! failure aborts the run and leaves earlier files on disk.

pub mod archive;
pub mod download;
pub mod dump;
pub mod env_file;

pub use env_file::EnvVars;

use crate::boundary::BoundaryWarning;
use crate::config::{DatabaseConfig, InstallConfig};
use crate::error::Result;
use crate::hosting::{resolve_asset, Asset, ReleaseSource, VersionSelector};
use crate::ui::{self, Confirm, Question};
use std::path::{Path, PathBuf};
use tracing::info;

/// Flags that change which steps run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstallOptions {
    /// Do not dump the database or ask about it
    pub skip_dump: bool,
    /// Draw a progress bar while downloading
    pub show_progress: bool,
}

/// What a finished run left behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub archive: PathBuf,
    pub release_dir: PathBuf,
    pub env_file: PathBuf,
    pub dump_file: Option<PathBuf>,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The user chose to stop after the download
    Stopped { archive: PathBuf },
    Installed(InstallReport),
}

/// Runs the install steps against a release source
pub struct Installer<'a, S, C> {
    config: &'a InstallConfig,
    database: &'a DatabaseConfig,
    env: &'a EnvVars,
    source: S,
    confirm: C,
    options: InstallOptions,
}

impl<'a, S: ReleaseSource, C: Confirm> Installer<'a, S, C> {
    pub fn new(
        config: &'a InstallConfig,
        database: &'a DatabaseConfig,
        env: &'a EnvVars,
        source: S,
        confirm: C,
        options: InstallOptions,
    ) -> Self {
        Installer {
            config,
            database,
            env,
            source,
            confirm,
            options,
        }
    }

    /// Run every step for the selected version
    pub fn run(&self, selector: &VersionSelector) -> Result<InstallOutcome> {
        let asset = resolve_asset(&self.source, selector)?;
        let archive = self.download(&asset)?;

        let question = Question::with_answers(
            format!("Extract {} or exit?", archive.display()),
            "extract",
            "exit",
        );
        if !self.confirm.confirm(&question)? {
            info!("exiting");
            return Ok(InstallOutcome::Stopped { archive });
        }

        let release_dir = self.extract(&archive)?;
        let env_file = env_file::copy_env(&self.config.env_file(), &release_dir)?;
        let dump_file = self.dump_database()?;

        Ok(InstallOutcome::Installed(InstallReport {
            archive,
            release_dir,
            env_file,
            dump_file,
        }))
    }

    /// Download an asset into the work dir, asking before overwriting
    pub fn download(&self, asset: &Asset) -> Result<PathBuf> {
        info!("Getting asset: {}", asset.name);
        let download = self.source.download_asset(asset)?;
        let dest = download::target_path(
            &self.config.work_dir,
            download.file_name.as_deref(),
            &asset.name,
        )?;

        if dest.exists() {
            let question = Question::yes_no(format!("{} exists, overwrite?", dest.display()));
            if !self.confirm.confirm(&question)? {
                ui::display_boundary_warning(&BoundaryWarning::KeptExistingDownload {
                    path: dest.clone(),
                });
                return Ok(dest);
            }
        }

        info!("Downloading: {}", dest.display());
        let written = download::write_download(download, &dest, self.options.show_progress)?;
        info!("Downloaded: {} ({} bytes)", dest.display(), written);
        Ok(dest)
    }

    /// Extract the archive next to itself, asking before overwriting
    pub fn extract(&self, archive: &Path) -> Result<PathBuf> {
        let dest = archive::extraction_dir(archive)?;

        if dest.exists() {
            let question = Question::yes_no("Destination exists, overwrite?");
            if !self.confirm.confirm(&question)? {
                ui::display_boundary_warning(&BoundaryWarning::KeptExistingDirectory {
                    path: dest.clone(),
                });
                return Ok(dest);
            }
        }

        let into = archive
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.work_dir.clone());
        archive::unpack(archive, &into)?;
        Ok(dest)
    }

    /// Dump the database unless skipped or declined
    pub fn dump_database(&self) -> Result<Option<PathBuf>> {
        if self.options.skip_dump {
            info!("Skipping database dump");
            return Ok(None);
        }

        let question = Question::yes_no("Dump database before continuing?");
        if !self.confirm.confirm(&question)? {
            info!("Skipping database dump");
            return Ok(None);
        }

        let target = dump::DumpTarget::from_env(self.database, self.env)?;
        let dest = dump::dump_file_path(
            &self.config.dump_dir(),
            &self.config.package,
            chrono::Local::now(),
        );
        dump::run_dump(self.database, &target, &dest)?;
        Ok(Some(dest))
    }
}
