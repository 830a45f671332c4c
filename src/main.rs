use std::process::ExitCode;

use env_logger::Env;
use log::error;

use maxent_unigram::verification::{HarnessConfig, run_selfcheck};

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    match run_selfcheck(HarnessConfig::default()) {
        Ok(report) => {
            println!("{report}");
            ExitCode::from(report.exit_code())
        }
        Err(e) => {
            error!("self-check could not run: {e}");
            ExitCode::FAILURE
        }
    }
}
