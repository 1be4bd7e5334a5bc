//! Interactive contact book entry point.
//!
//! # Responsibility
//! - Resolve startup configuration and initialize logging.
//! - Open the contact store and hand it to the console session.

mod render;
mod session;

use contactbook_core::{
    core_version, init_logging, ContactBookConfig, ContactStore, JsonFileContactRepository,
};
use log::info;
use session::Session;
use std::error::Error;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run(ContactBookConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("contactbook: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: ContactBookConfig) -> Result<(), Box<dyn Error>> {
    let config = config.resolve_against(&std::env::current_dir()?)?;
    init_logging(&config.log_level, &config.log_dir)?;
    info!(
        "event=cli_start module=cli status=ok version={} data_file={}",
        core_version(),
        config.data_file.display()
    );

    let store = ContactStore::open(JsonFileContactRepository::new(&config.data_file));
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(store, stdin.lock(), stdout.lock()).run()?;
    Ok(())
}
