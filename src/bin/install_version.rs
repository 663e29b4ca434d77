use std::process::ExitCode;

use clap::Parser;

use release_scripts::cli::{install, InstallArgs};
use release_scripts::installer::InstallOutcome;
use release_scripts::{logging, ui};

fn main() -> ExitCode {
    let args = InstallArgs::parse();

    if let Err(e) = logging::init(&args.log_level()) {
        ui::display_error(&format!("Failed to initialise logging: {:#}", e));
        return ExitCode::FAILURE;
    }

    match install::run(&args) {
        Ok(InstallOutcome::Stopped { archive }) => {
            ui::display_status(&format!("Stopped after downloading {}", archive.display()));
            ExitCode::SUCCESS
        }
        Ok(InstallOutcome::Installed(report)) => {
            ui::display_success(&format!(
                "Installed {} into {}",
                args.version,
                report.release_dir.display()
            ));
            if let Some(dump) = report.dump_file {
                ui::display_status(&format!("Database dump: {}", dump.display()));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}
