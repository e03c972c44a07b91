use clap::Parser;
use foldersort::cli::{Cli, init_logging, run_cli};
use foldersort::output::OutputFormatter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run_cli(cli.organize_command(), &cli.folder) {
        Ok(outcome) if outcome.is_success(cli.strict) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            OutputFormatter::error(&format!("Error: {}", e));
            ExitCode::FAILURE
        }
    }
}
