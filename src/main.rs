use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use boggler::app;
use boggler::config::{Cli, Config};
use boggler::input::InputLoader;
use boggler::log::init_logger;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let config = Config::from(cli);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = app::run(&config, &mut InputLoader::new(), &mut out).and_then(|()| Ok(out.flush()?));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
