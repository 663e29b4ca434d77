use crate::error::{ReleaseError, Result};
use crate::hosting::{Asset, AssetDownload, Release, ReleaseId, ReleaseSource};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Cursor;

/// Mock release source for testing without network access
pub struct MockReleaseSource {
    releases: Vec<Release>,
    contents: HashMap<u64, Vec<u8>>,
    file_names: HashMap<u64, String>,
    downloads: RefCell<Vec<u64>>,
}

impl MockReleaseSource {
    /// Create an empty source
    pub fn new() -> Self {
        MockReleaseSource {
            releases: Vec::new(),
            contents: HashMap::new(),
            file_names: HashMap::new(),
            downloads: RefCell::new(Vec::new()),
        }
    }

    /// Add a release; the first one added is the latest
    pub fn add_release(&mut self, release: Release) {
        self.releases.push(release);
    }

    /// Set the bytes served for an asset
    pub fn set_content(&mut self, asset_id: u64, bytes: Vec<u8>) {
        self.contents.insert(asset_id, bytes);
    }

    /// Announce a Content-Disposition file name for an asset
    pub fn set_file_name(&mut self, asset_id: u64, name: impl Into<String>) {
        self.file_names.insert(asset_id, name.into());
    }

    /// Asset ids downloaded so far
    pub fn downloads(&self) -> Vec<u64> {
        self.downloads.borrow().clone()
    }
}

impl Default for MockReleaseSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseSource for MockReleaseSource {
    fn list_releases(&self) -> Result<Vec<Release>> {
        Ok(self.releases.clone())
    }

    fn get_release(&self, id: ReleaseId) -> Result<Release> {
        let found = match id {
            ReleaseId::Latest => self.releases.first(),
            ReleaseId::Id(id) => self.releases.iter().find(|r| r.id == id),
        };
        found
            .cloned()
            .ok_or_else(|| ReleaseError::api(format!("404 Not Found: release {}", id)))
    }

    fn download_asset(&self, asset: &Asset) -> Result<AssetDownload> {
        let bytes = self
            .contents
            .get(&asset.id)
            .cloned()
            .ok_or_else(|| ReleaseError::api(format!("404 Not Found: asset {}", asset.id)))?;
        self.downloads.borrow_mut().push(asset.id);

        Ok(AssetDownload {
            file_name: self.file_names.get(&asset.id).cloned(),
            content_length: Some(bytes.len() as u64),
            body: Box::new(Cursor::new(bytes)),
        })
    }
}
