//! Command implementations for the CLI.

/// Converts every video under a folder to 720p WebM.
pub mod convert;
