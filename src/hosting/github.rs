use crate::config::InstallConfig;
use crate::error::Result;
use crate::hosting::{Asset, AssetDownload, Release, ReleaseId, ReleaseSource};
use regex::Regex;
use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_DISPOSITION};
use tracing::debug;

const JSON_MEDIA_TYPE: &str = "application/vnd.github.v3+json";
const BINARY_MEDIA_TYPE: &str = "application/octet-stream";

/// Client for the GitHub releases REST API
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    /// Create a client for the repository named in the config
    pub fn new(config: &InstallConfig, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(GitHubClient {
            client,
            base_url: repo_url(&config.api_base, &config.repo),
            token: token.into(),
        })
    }

    fn get(&self, path: &str, accept: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, accept)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .send()?
            .error_for_status()?;

        debug!("code: {}", response.status());
        Ok(response)
    }
}

impl ReleaseSource for GitHubClient {
    fn list_releases(&self) -> Result<Vec<Release>> {
        Ok(self.get("/releases", JSON_MEDIA_TYPE)?.json()?)
    }

    fn get_release(&self, id: ReleaseId) -> Result<Release> {
        Ok(self
            .get(&format!("/releases/{}", id), JSON_MEDIA_TYPE)?
            .json()?)
    }

    fn download_asset(&self, asset: &Asset) -> Result<AssetDownload> {
        let response = self.get(
            &format!("/releases/assets/{}", asset.id),
            BINARY_MEDIA_TYPE,
        )?;
        debug!("headers: {:?}", response.headers());

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_disposition);

        Ok(AssetDownload {
            file_name,
            content_length: response.content_length(),
            body: Box::new(response),
        })
    }
}

/// `https://api.github.com` + `owner/name` -> `https://api.github.com/repos/owner/name`
pub fn repo_url(api_base: &str, repo: &str) -> String {
    format!(
        "{}/repos/{}",
        api_base.trim_end_matches('/'),
        repo.trim_matches('/')
    )
}

/// Extract the `filename=` parameter from a Content-Disposition header
pub fn parse_content_disposition(header: &str) -> Option<String> {
    let re = Regex::new(r#"filename=("?)([^";]+)"#).ok()?;
    let captures = re.captures(header)?;
    let name = captures.get(2)?.as_str().trim();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
