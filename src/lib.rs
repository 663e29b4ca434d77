//! Release tooling: compute the next release-candidate tag from git tags,
//! and install published releases from the hosting service.

pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod hosting;
pub mod installer;
pub mod logging;
pub mod ui;

pub use error::{ReleaseError, Result};
