use std::error::Error;
use std::fs::File;
use std::io;
use std::process;

use clap::Parser;
use log::error;

use clockify_condense::{build_report, run, Error as ConvertError};

mod config;

use config::{Args, Config};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run_app() {
        error!("{}", err);
        let mut source = err.source();
        while let Some(cause) = source {
            error!("  caused by: {}", cause);
            source = cause.source();
        }
        process::exit(1);
    }
}

fn run_app() -> Result<(), Box<dyn Error>> {
    let config = Config::from_args(Args::parse())?;

    if config.print {
        let file = File::open(&config.input).map_err(|source| ConvertError::InputRead {
            path: config.input.clone(),
            source,
        })?;
        let report = build_report(file)?;
        report.write(io::stdout().lock())?;
    } else {
        let output_path = run(&config.input)?;
        println!("{}", output_path.display());
    }
    Ok(())
}
