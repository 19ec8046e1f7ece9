// webmify-cli/src/lib.rs
//
// Library portion of the Webmify CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::convert::{build_core_config, run_convert, validate_folder};
pub use error::{CliErrorContext, CliResult};
