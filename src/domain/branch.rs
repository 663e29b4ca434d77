use crate::error::{ReleaseError, Result};

/// Represents the checked-out git branch with the policy it is judged by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: String,
    pub is_candidate_branch: bool,
}

impl BranchContext {
    /// Create a branch context, comparing against the branch allowed to cut
    /// release candidates
    pub fn new(name: impl Into<String>, candidate_branch: &str) -> Self {
        let name = name.into();
        let is_candidate_branch = name == candidate_branch;

        BranchContext {
            name,
            is_candidate_branch,
        }
    }

    /// Fail unless this branch may compute a next version
    pub fn ensure_candidate_branch(&self, candidate_branch: &str) -> Result<()> {
        if self.is_candidate_branch {
            Ok(())
        } else {
            Err(ReleaseError::InvalidBranch {
                expected: candidate_branch.to_string(),
                actual: self.name.clone(),
            })
        }
    }
}
