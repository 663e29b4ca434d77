//! `.tar.gz` release archives.

use crate::error::{ReleaseError, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

const ARCHIVE_SUFFIX: &str = ".tar.gz";

/// Directory a release archive extracts to: the archive path without its
/// `.tar.gz` suffix
pub fn extraction_dir(archive: &Path) -> Result<PathBuf> {
    let file_name = archive
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ReleaseError::archive(format!("Invalid archive path {}", archive.display())))?;

    let stem = file_name
        .strip_suffix(ARCHIVE_SUFFIX)
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| {
            ReleaseError::archive(format!("Unsupported archive format: {}", file_name))
        })?;

    Ok(archive.with_file_name(stem))
}

/// Unpack a gzip-compressed tarball into `into`
pub fn unpack(archive: &Path, into: &Path) -> Result<()> {
    info!("Extract: {}", archive.display());

    let file = File::open(archive).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ReleaseError::FileNotFound(archive.to_path_buf()),
        _ => ReleaseError::Io(e),
    })?;

    let mut tarball = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
    tarball.unpack(into).map_err(|e| {
        ReleaseError::archive(format!("Failed to extract {}: {}", archive.display(), e))
    })?;

    Ok(())
}
