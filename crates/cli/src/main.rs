use std::process::ExitCode;

use clap::Parser;
use log::info;
use vzcmd_core::error::{Error, Result};
use vzcmd_cli::cli_args::Args;
use vzcmd_cli::dispatch::{build_commander, dispatch};

fn execute() -> Result<()> {
    let args = Args::parse();

    let commander = build_commander(&args)?;
    let output = dispatch(&commander, &args.action)?;

    info!("Operation completed with {}", output.status);
    print!("{}", output.stdout);

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // stdout captured from a child that exited non-zero
            if let Error::Execution(execution_error) = &e {
                if let Some(stdout) = execution_error.stdout() {
                    print!("{stdout}");
                }
            }
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
