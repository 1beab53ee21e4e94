mod configurator;

pub use configurator::{Outcome, SigningConfigurator}; // Engine

use std::path::PathBuf;

/// Project file CI checks out, relative to the repository root.
pub const PROJECT_FILE: &str = "macos/Runner.xcodeproj/project.pbxproj";

/// Environment variable carrying the signing team to inject.
pub const TEAM_ID_ENV: &str = "APPLE_TEAM_ID";

use thiserror::Error as ThisError;
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("Project file not found: {}", .0.display())]
    ProjectFileMissing(PathBuf),
    #[error("APPLE_TEAM_ID environment variable not set")]
    TeamIdMissing,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
