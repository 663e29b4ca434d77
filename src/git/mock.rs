use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use std::cell::RefCell;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    tags: Vec<String>,
    branch: String,
    fetch_fails: bool,
    fetched: RefCell<Vec<String>>,
}

impl MockRepository {
    /// Create a mock repository checked out on `branch`
    pub fn new(branch: impl Into<String>) -> Self {
        MockRepository {
            tags: Vec::new(),
            branch: branch.into(),
            fetch_fails: false,
            fetched: RefCell::new(Vec::new()),
        }
    }

    /// Add a tag
    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    /// Make every fetch fail, as if the remote were unreachable
    pub fn fail_fetches(&mut self) {
        self.fetch_fails = true;
    }

    /// Remotes fetched so far
    pub fn fetched_remotes(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn fetch_tags(&self, remote: &str) -> Result<()> {
        self.fetched.borrow_mut().push(remote.to_string());
        if self.fetch_fails {
            return Err(ReleaseError::Git(git2::Error::from_str(&format!(
                "remote '{}' unreachable",
                remote
            ))));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_tags() {
        let mut mock = MockRepository::new("develop");
        mock.add_tag("v1.0.0");
        mock.add_tag("v1.1.0");

        assert_eq!(mock.list_tags().unwrap().len(), 2);
        assert_eq!(mock.current_branch().unwrap(), "develop");
    }

    #[test]
    fn test_mock_repository_fetch_records_remote() {
        let mut mock = MockRepository::new("develop");
        assert!(mock.fetch_tags("origin").is_ok());
        mock.fail_fetches();
        assert!(mock.fetch_tags("upstream").is_err());
        assert_eq!(mock.fetched_remotes(), vec!["origin", "upstream"]);
    }
}
