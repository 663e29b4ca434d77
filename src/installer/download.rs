//! Streaming an asset to disk with a progress bar.

use crate::error::{ReleaseError, Result};
use crate::hosting::AssetDownload;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const BAR_TEMPLATE: &str = "{bytes}/{total_bytes} [{bar:40}] {bytes_per_sec} {eta}";
const SPINNER_TEMPLATE: &str = "{spinner} {bytes} {bytes_per_sec}";

/// Local path for a downloaded asset
///
/// Uses the server-announced name when there is one, else the asset name.
/// Only the final path component is kept, so a hostile name cannot escape
/// `dir`.
pub fn target_path(dir: &Path, announced: Option<&str>, asset_name: &str) -> Result<PathBuf> {
    let name = announced.unwrap_or(asset_name);
    let file_name = Path::new(name)
        .file_name()
        .ok_or_else(|| ReleaseError::api(format!("Invalid asset file name '{}'", name)))?;

    Ok(dir.join(file_name))
}

fn progress_bar(total: Option<u64>, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    match total {
        Some(len) => ProgressBar::new(len).with_style(
            ProgressStyle::with_template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        ),
        None => ProgressBar::new_spinner().with_style(
            ProgressStyle::with_template(SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        ),
    }
}

/// Stream the download body into `dest`, returning the number of bytes written
pub fn write_download(download: AssetDownload, dest: &Path, show_progress: bool) -> Result<u64> {
    let bar = progress_bar(download.content_length, show_progress);

    let mut reader = bar.wrap_read(download.body);
    let mut writer = BufWriter::new(File::create(dest)?);
    let written = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;

    bar.finish_and_clear();
    Ok(written)
}
