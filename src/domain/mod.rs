//! Domain logic - pure version and branch rules independent of git operations

pub mod branch;
pub mod prerelease;
pub mod version;

pub use branch::BranchContext;
pub use prerelease::{PreRelease, PreReleaseType};
pub use version::Version;
