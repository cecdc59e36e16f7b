use std::fs::OpenOptions;
use std::path::Path;

mod config;

use config::fetch_options;
use levlog::{destination, Config, Destination, LeveledLogger, Severity};

fn main() {
    let diagnostics = diagnostics_logger();
    let options = match fetch_options() {
        Ok(options) => options,
        Err(e) => {
            diagnostics.error(format_args!("{}", e));
            std::process::exit(1)
        }
    };
    let (severity, message) = match options.entry() {
        Ok(entry) => entry,
        Err(e) => e.exit(),
    };
    let destination = match &options.output {
        Some(path) => match open_output(path) {
            Ok(out) => Some(out),
            Err(e) => {
                diagnostics.error(format_args!(
                    "Unable to open output file: {}\n{}",
                    path.display(),
                    e
                ));
                std::process::exit(1)
            }
        },
        None => None,
    };
    let logger = options.config().build(destination);
    logger.log(severity, format_args!("{}", message));
}

// Startup problems of the command itself, on stderr
fn diagnostics_logger() -> LeveledLogger {
    Config {
        tag: "levlog: ".to_string(),
        threshold: Severity::Error,
        ..Config::default()
    }
    .build(None)
}

fn open_output(path: &Path) -> std::io::Result<Destination> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(destination(file))
}
