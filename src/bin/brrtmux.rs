use brrtmux::cli::run_cli;
use brrtmux::logging::{init_logging_with_config, LogConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = init_logging_with_config(&LogConfig::from_env()) {
        eprintln!("warning: logging disabled: {err:#}");
    }
    match run_cli() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
