use anyhow::Result;
use std::env;
use std::io;

use slcsp::{run, Config};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    // Optional: path to a JSON config file, otherwise the data/ defaults
    let config = match args.get(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    log::debug!("slcsp {} with {:?}", slcsp::VERSION, config);

    let stdout = io::stdout();
    run(&config, stdout.lock())?;

    Ok(())
}
