//! Utility functions and helpers.

pub mod preflight;
pub mod settings;

pub use preflight::{check_ai_command_prerequisites, check_git_installed, check_git_repository};
pub use settings::Settings;
