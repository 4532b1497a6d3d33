use std::io;
use std::process::ExitCode;

use crossterm::tty::IsTty;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let stderr = io::stderr();
    let err_is_tty = stderr.is_tty();
    let result = tilestar::run(
        std::env::args(),
        &mut io::stdout().lock(),
        &mut stderr.lock(),
        err_is_tty,
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("{e:?}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
