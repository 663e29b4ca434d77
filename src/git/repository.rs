use crate::error::{ReleaseError, Result};
use git2::{Cred, CredentialType, FetchOptions, RemoteCallbacks, Repository as Git2Repo};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

/// SSH keys tried in order before falling back to the agent
fn ssh_key_candidates() -> Vec<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    ["id_ed25519", "id_rsa", "id_ecdsa"]
        .iter()
        .map(|name| home.join(".ssh").join(name))
        .collect()
}

fn credential_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            for key_path in ssh_key_candidates() {
                if key_path.exists() {
                    if let Ok(cred) = Cred::ssh_key(username, None, &key_path, None) {
                        return Ok(cred);
                    }
                }
            }

            if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        Cred::default()
    });
    callbacks
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        Ok(tags.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;

        if !head.is_branch() {
            return Ok("HEAD".to_string());
        }

        head.shorthand()
            .map(|name| name.to_string())
            .ok_or_else(|| ReleaseError::config("Branch name is not valid UTF-8"))
    }

    fn fetch_tags(&self, remote: &str) -> Result<()> {
        let mut remote_handle = self.repo.find_remote(remote)?;

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(credential_callbacks());
        fetch_options.download_tags(git2::AutotagOption::All);

        debug!("fetching tags from {}", remote);
        remote_handle.fetch(
            &["+refs/tags/*:refs/tags/*"],
            Some(&mut fetch_options),
            None,
        )?;

        Ok(())
    }
}
