use bisect::cli::Cli;
use bisect::core::state::ObservationError;
use bisect::{cli, exit_codes, logging};
use clap::Parser;

fn main() {
    logging::init();
    let args = Cli::parse();
    match cli::execute(&args) {
        Ok(outcome) => {
            println!(
                "test case changed between r{} and r{}",
                outcome.boundary.low, outcome.boundary.high
            );
        }
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_code_for(&err));
        }
    }
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ObservationError>() {
        Some(ObservationError::Inconsistent { .. }) => exit_codes::INCONSISTENT,
        _ => exit_codes::INVALID,
    }
}
