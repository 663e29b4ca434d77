use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met while computing versions or installing a
/// release. These are reported to the user and the run continues.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Tag exists but cannot be parsed as a version
    UnparsableTag { tag: String, reason: String },
    /// The archive is already on disk and the user kept it
    KeptExistingDownload { path: PathBuf },
    /// The extraction directory already exists and the user kept it
    KeptExistingDirectory { path: PathBuf },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::KeptExistingDownload { path } => {
                write!(f, "Skipping download, keeping {}", path.display())
            }
            BoundaryWarning::KeptExistingDirectory { path } => {
                write!(f, "Skipping extraction, keeping {}", path.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparsable_tag_names_tag() {
        let warning = BoundaryWarning::UnparsableTag {
            tag: "nightly".to_string(),
            reason: "not a version".to_string(),
        };
        assert_eq!(warning.to_string(), "Cannot parse tag 'nightly': not a version");
    }

    #[test]
    fn test_kept_download_names_path() {
        let warning = BoundaryWarning::KeptExistingDownload {
            path: PathBuf::from("./passport-api_v1.8.5.tar.gz"),
        };
        assert!(warning.to_string().contains("./passport-api_v1.8.5.tar.gz"));
    }
}
