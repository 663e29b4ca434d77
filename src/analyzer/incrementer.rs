use crate::boundary::BoundaryWarning;
use crate::config::IncrementConfig;
use crate::domain::{BranchContext, PreRelease, Version};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use tracing::debug;

/// Computes the next release-candidate tag from existing tags and the
/// current branch
pub struct VersionIncrementer {
    config: IncrementConfig,
}

impl VersionIncrementer {
    /// Create a new incrementer
    pub fn new(config: IncrementConfig) -> Self {
        VersionIncrementer { config }
    }

    /// Fetch tags, read the branch and compute the next version
    ///
    /// A failed fetch aborts the run; pass `fetch = false` to work from
    /// local tags only.
    pub fn next_for_repository<R: Repository>(&self, repo: &R, fetch: bool) -> Result<Version> {
        if fetch {
            repo.fetch_tags(&self.config.remote)?;
        }

        let tags = repo.list_tags()?;
        let branch = repo.current_branch()?;

        let sorted = sort_version_tags(&tags);
        for (tag, _) in sorted.iter().take(3) {
            debug!("{}", tag);
        }

        let versions: Vec<Version> = sorted.into_iter().map(|(_, v)| v).collect();
        self.next_version(&versions, &branch)
    }

    /// Compute the next version from versions sorted highest first
    pub fn next_version(&self, versions: &[Version], branch: &str) -> Result<Version> {
        let current = versions.first().ok_or(ReleaseError::NoVersionTags)?;
        debug!("selected version: {}", current);

        let base = current.candidate_base()?;

        let candidate_branch = self.config.branch.as_str();
        BranchContext::new(branch, candidate_branch).ensure_candidate_branch(candidate_branch)?;

        let pre = match &current.pre {
            Some(pre) => pre.next_candidate()?,
            None => PreRelease::first_candidate(),
        };

        let next = base.with_pre(pre);
        debug!("{} -> {}", current, next);
        Ok(next)
    }

    /// Compute the next tag from raw tag names in any order
    pub fn next_tag(&self, tags: &[String], branch: &str) -> Result<String> {
        let versions: Vec<Version> = sort_version_tags(tags).into_iter().map(|(_, v)| v).collect();
        self.next_version(&versions, branch).map(|v| v.tag())
    }
}

/// Parse tags and order them by version precedence, highest first
///
/// Tags that are not versions are skipped.
pub fn sort_version_tags(tags: &[String]) -> Vec<(String, Version)> {
    let mut parsed: Vec<(String, Version)> = tags
        .iter()
        .filter_map(|tag| match Version::parse(tag) {
            Ok(version) => Some((tag.clone(), version)),
            Err(e) => {
                debug!("{}", BoundaryWarning::UnparsableTag {
                    tag: tag.clone(),
                    reason: e.to_string(),
                });
                None
            }
        })
        .collect();

    parsed.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
    parsed
}
