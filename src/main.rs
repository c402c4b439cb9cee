use std::io;
use std::process;

use env_logger::{Builder, Env, Target};
use log::error;

use bitmouse::engine::{Engine, EngineSettings};
use bitmouse::uci::run_uci_loop;

/// `BITMOUSE_LOG` takes env_logger filters, warnings by default. Logs go to
/// stderr so stdout stays clean for the GUI.
fn init_logging() {
    Builder::from_env(Env::new().filter_or("BITMOUSE_LOG", "warn"))
        .target(Target::Stderr)
        .init();
}

fn main() {
    init_logging();

    let engine = match Engine::try_new(EngineSettings::default()) {
        Ok(engine) => engine,
        Err(err) => {
            error!("{err}");
            eprintln!("bitmouse: {err}");
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    if let Err(err) = run_uci_loop(engine, stdin.lock(), io::stdout()) {
        error!("input error: {err}");
        process::exit(1);
    }
}
