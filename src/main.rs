//! Native viewer binary.
//!
//! ```text
//! vantage [options.toml]
//! vantage --write-options <path>
//! ```
//!
//! Without an argument, `vantage.toml` in the working directory is used if
//! present, otherwise built-in defaults.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use vantage::{Options, VantageError, Viewer};

const DEFAULT_OPTIONS_FILE: &str = "vantage.toml";

fn load_options(path: Option<PathBuf>) -> Result<Options, VantageError> {
    match path {
        Some(path) => {
            log::info!("loading options from {}", path.display());
            Options::load(&path)
        }
        None if Path::new(DEFAULT_OPTIONS_FILE).exists() => {
            log::info!("loading options from {DEFAULT_OPTIONS_FILE}");
            Options::load(Path::new(DEFAULT_OPTIONS_FILE))
        }
        None => Ok(Options::default()),
    }
}

fn run() -> Result<(), VantageError> {
    let mut args = std::env::args().skip(1);
    let first = args.next();

    if first.as_deref() == Some("--write-options") {
        let Some(path) = args.next() else {
            return Err(VantageError::OptionsParse(
                "usage: vantage --write-options <path>".into(),
            ));
        };
        Options::default().save(Path::new(&path))?;
        log::info!("wrote default options to {path}");
        return Ok(());
    }

    let options = load_options(first.map(PathBuf::from))?;
    Viewer::builder().with_options(options).build().run()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
