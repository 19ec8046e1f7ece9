// webmify-cli/src/main.rs
//
// Entry point for the `webmify` executable.
//
// Responsibilities:
// - Parsing arguments and setting up logging.
// - Turning a missing FOLDER into exit code 1 with a usage hint.
// - Running the conversion and mapping pre-flight errors to exit code 1.
//   Per-file failures are reported in the summary and still exit 0.

use clap::{CommandFactory, Parser};
use webmify_cli::logging::init_logging;
use webmify_cli::terminal::print_error;
use webmify_cli::{Cli, run_convert};

use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        print_error(&e.to_string());
        process::exit(1);
    }

    let Some(folder) = cli.folder.clone() else {
        print_error("missing FOLDER argument");
        eprintln!("{}", Cli::command().render_usage());
        process::exit(1);
    };

    if let Err(e) = run_convert(&cli, &folder) {
        print_error(&e.to_string());
        process::exit(1);
    }
}
