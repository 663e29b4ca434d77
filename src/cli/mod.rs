//! Command-line workflows
//!
//! Each binary parses its arguments with clap and hands them to a workflow
//! here, keeping argument parsing apart from the release logic.

pub mod increment;
pub mod install;

pub use increment::IncrementArgs;
pub use install::InstallArgs;
