use std::process::ExitCode;

use clap::Parser;

mod args;
mod cmd;
mod io;
mod logging;
mod output;

fn main() -> ExitCode {
    let cli = args::Cli::parse();
    logging::init(cli.verbose);
    output::init(cli.json);

    match cmd::dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&err);
            ExitCode::FAILURE
        }
    }
}
