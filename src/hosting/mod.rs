//! Release-hosting API abstraction
//!
//! The installer talks to the hosting service through [ReleaseSource]:
//!
//! - [github::GitHubClient]: the GitHub REST API over a blocking `reqwest` client
//! - [mock::MockReleaseSource]: in-memory releases for tests

pub mod github;
pub mod mock;

pub use github::GitHubClient;
pub use mock::MockReleaseSource;

use crate::error::{ReleaseError, Result};
use serde::Deserialize;
use std::fmt;
use std::io::Read;
use std::str::FromStr;
use tracing::debug;

/// A published release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// A file attached to a release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub id: u64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// Which release to fetch by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseId {
    Latest,
    Id(u64),
}

impl fmt::Display for ReleaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseId::Latest => write!(f, "latest"),
            ReleaseId::Id(id) => write!(f, "{}", id),
        }
    }
}

/// The version the user asked to install
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    Latest,
    Tag(String),
}

impl FromStr for VersionSelector {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ReleaseError::config("Version must not be empty"));
        }
        if s == "latest" {
            Ok(VersionSelector::Latest)
        } else {
            Ok(VersionSelector::Tag(s.to_string()))
        }
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionSelector::Latest => write!(f, "latest"),
            VersionSelector::Tag(tag) => write!(f, "{}", tag),
        }
    }
}

/// An asset body being streamed from the hosting service
pub struct AssetDownload {
    /// File name announced by the server, if any
    pub file_name: Option<String>,
    pub content_length: Option<u64>,
    pub body: Box<dyn Read>,
}

/// Read-only access to a repository's releases
pub trait ReleaseSource {
    /// All releases, newest first
    fn list_releases(&self) -> Result<Vec<Release>>;

    /// One release, by id or the latest
    fn get_release(&self, id: ReleaseId) -> Result<Release>;

    /// Start downloading an asset's binary content
    fn download_asset(&self, asset: &Asset) -> Result<AssetDownload>;
}

impl<S: ReleaseSource + ?Sized> ReleaseSource for &S {
    fn list_releases(&self) -> Result<Vec<Release>> {
        (**self).list_releases()
    }

    fn get_release(&self, id: ReleaseId) -> Result<Release> {
        (**self).get_release(id)
    }

    fn download_asset(&self, asset: &Asset) -> Result<AssetDownload> {
        (**self).download_asset(asset)
    }
}

/// Resolve a version selector to the asset to install
///
/// `latest` asks the service for its latest release; a tag is looked up in
/// the release list and then fetched by id. The first asset is used.
pub fn resolve_asset<S: ReleaseSource>(source: &S, selector: &VersionSelector) -> Result<Asset> {
    let release_id = match selector {
        VersionSelector::Latest => ReleaseId::Latest,
        VersionSelector::Tag(tag) => {
            debug!("Getting releases metadata");
            let releases = source.list_releases()?;
            let release = releases
                .iter()
                .find(|r| &r.tag_name == tag)
                .ok_or_else(|| ReleaseError::api(format!("No release tagged '{}'", tag)))?;
            ReleaseId::Id(release.id)
        }
    };

    debug!("Getting asset metadata for release {}", release_id);
    let release = source.get_release(release_id)?;
    let asset = release.assets.into_iter().next().ok_or_else(|| {
        ReleaseError::api(format!("Release '{}' has no assets", release.tag_name))
    })?;

    debug!("asset.id: {}", asset.id);
    debug!("asset.name: {}", asset.name);
    debug!("asset.url: {}", asset.url);
    Ok(asset)
}
