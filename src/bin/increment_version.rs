use std::process::ExitCode;

use clap::Parser;

use release_scripts::cli::{increment, IncrementArgs};
use release_scripts::{logging, ui};

fn main() -> ExitCode {
    let args = IncrementArgs::parse();

    if let Err(e) = logging::init(args.log_level()) {
        ui::display_error(&format!("Failed to initialise logging: {:#}", e));
        return ExitCode::FAILURE;
    }

    match increment::run(&args) {
        Ok(tag) => {
            println!("{}", tag);
            ExitCode::SUCCESS
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}
