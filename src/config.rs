use clap::{AppSettings, CommandFactory, Parser};
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use levlog::{Config, Flags, Severity};

const OPTIONS_PATH_ENV: &str = "LEVLOG_OPTIONS_PATH";

// Version label including the target the binary was built for
const LONG_VERSION: &str = concat!(
    clap::crate_version!(),
    "\n",
    env!("LEVLOG_BUILD_TARGET_TRIPLE")
);

#[derive(Parser, Debug)]
#[clap(
    name = "levlog",
    version,
    long_version = LONG_VERSION,
    verbatim_doc_comment,
    setting(AppSettings::DeriveDisplayOrder)
)]
/**
Write a message through a leveled logger.

## Usage examples

    levlog info "service started"
      Write "All: service started" to stdout.

    levlog --threshold warning debug "cache miss"
      Write nothing, debug messages are above the warning threshold.

    levlog --threshold error error "failed: disk full"
      Write "Error: failed: disk full" to stderr.

    levlog --flags date,time,shortfile trace "entering loop"
      Write a timestamped line with the caller location to stdout.

    levlog --output app.log --tag "[app] " fatal "shutting down"
      Append "[app] All: shutting down" to app.log.

## Options file

    Use an options file to add defaults to every levlog call. Configure the
    options file path with the `LEVLOG_OPTIONS_PATH` system environment
    variable. Options given on the command line override the options file.

         # levlog default options
         --tag [svc]
         --flags standard

         # Or all on one line
         --threshold info --no-prefix
*/
pub struct Options {
    /// Most permissive severity that is still written:
    /// none, fatal, error, warning, info, debug, trace or all [default: all]
    #[clap(long, overrides_with = "threshold", help_heading = "FILTER")]
    pub threshold: Option<Severity>,

    /// Don't start lines with the threshold name
    #[clap(
        long = "no-prefix",
        help_heading = "OUTPUT",
        parse(from_flag = std::ops::Not::not)
    )]
    pub prefix_severity: bool,

    /// Text to start every line with
    #[clap(long, overrides_with = "tag", help_heading = "OUTPUT")]
    pub tag: Option<String>,

    /// Comma separated fields to add to every line:
    /// date, time, microseconds, longfile, shortfile, utc, msgprefix or standard
    #[clap(long, overrides_with = "flags", help_heading = "OUTPUT")]
    pub flags: Option<Flags>,

    /// Append all output to this file instead of stdout and stderr
    #[clap(
        long,
        parse(from_os_str),
        overrides_with = "output",
        help_heading = "OUTPUT"
    )]
    pub output: Option<PathBuf>,

    /// Severity of the message
    #[clap(name = "severity")]
    pub severity: Option<Severity>,

    /// Message to write. Multiple words are joined with a space.
    #[clap(name = "message")]
    pub message: Vec<String>,
}

impl Options {
    pub fn config(&self) -> Config {
        Config {
            tag: self.tag.clone().unwrap_or_default(),
            flags: self.flags.unwrap_or_else(Flags::empty),
            threshold: self.threshold.unwrap_or(Severity::All),
            prefix_severity: self.prefix_severity,
        }
    }

    /// Severity and text of the message to write.
    ///
    /// Both may come from the options file, so they're only checked once all options are
    /// merged.
    pub fn entry(&self) -> Result<(Severity, String), clap::Error> {
        match self.severity {
            Some(severity) if !self.message.is_empty() => Ok((severity, self.message.join(" "))),
            _ => Err(Options::command().error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "A <severity> and a <message> are required",
            )),
        }
    }
}

/// Parse the options file, if configured, and apply the command line options on top of it.
pub fn fetch_options() -> Result<Options, String> {
    let args = command_line();
    match read_options_file(env::var_os(OPTIONS_PATH_ENV))? {
        Some(file) => {
            let mut opts = file.parse()?;
            opts.update_from(args);
            Ok(opts)
        }
        None => Ok(Options::parse_from(args)),
    }
}

// Arguments that aren't valid UTF-8 are converted lossily
fn command_line() -> Vec<String> {
    env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

#[derive(Debug, PartialEq)]
struct OptionsFile {
    path: PathBuf,
    args: Vec<String>,
}

impl OptionsFile {
    // Options are whitespace separated, any number per line. Lines starting with `#` are
    // comments.
    fn from_contents(path: PathBuf, contents: &str) -> Self {
        let args = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#'))
            .flat_map(str::split_whitespace)
            .map(String::from)
            .collect();
        Self { path, args }
    }

    fn parse(&self) -> Result<Options, String> {
        let args = std::iter::once("levlog").chain(self.args.iter().map(String::as_str));
        Options::try_parse_from(args).map_err(|e| {
            format!(
                "Unable to parse options file '{}':\n{}",
                self.path.display(),
                e
            )
        })
    }
}

fn read_options_file(path: Option<OsString>) -> Result<Option<OptionsFile>, String> {
    let path = match path {
        Some(path) => PathBuf::from(path),
        None => return Ok(None),
    };
    if !path.is_file() {
        return Err(format!(
            "Configured {} does not exist or is not a file. Path: '{}'",
            OPTIONS_PATH_ENV,
            path.display()
        ));
    }
    let contents = fs::read_to_string(&path)
        .map_err(|e| format!("Unable to read options file '{}': {}", path.display(), e))?;
    Ok(Some(OptionsFile::from_contents(path, &contents)))
}

#[cfg(test)]
mod tests {
    use super::{read_options_file, Options, OptionsFile};
    use clap::Parser;
    use levlog::{Flags, Severity};
    use std::fs;
    use std::path::{Path, PathBuf};

    const TEST_DIR: &str = "tmp/tests/config";

    fn options_file(args: &[&str]) -> OptionsFile {
        OptionsFile {
            path: PathBuf::from("options.txt"),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn defaults() {
        let opts = Options::parse_from(["levlog", "info", "service", "started"]);
        assert_eq!(
            opts.entry().expect("No entry"),
            (Severity::Info, "service started".to_string())
        );
        assert_eq!(opts.output, None);
        assert_eq!(opts.config(), levlog::Config::default());
    }

    #[test]
    fn all_options() {
        let opts = Options::parse_from([
            "levlog",
            "--threshold",
            "Warning",
            "--no-prefix",
            "--tag",
            "[svc] ",
            "--flags",
            "date,shortfile",
            "--output",
            "out.log",
            "error",
            "failed",
        ]);
        assert_eq!(opts.output, Some(PathBuf::from("out.log")));
        let config = opts.config();
        assert_eq!(config.threshold, Severity::Warning);
        assert!(!config.prefix_severity);
        assert_eq!(config.tag, "[svc] ");
        assert_eq!(config.flags, Flags::DATE | Flags::SHORT_FILE);
    }

    #[test]
    fn invalid_values() {
        assert!(Options::try_parse_from(["levlog", "loud", "message"]).is_err());
        assert!(Options::try_parse_from(["levlog", "--flags", "colour", "info", "hi"]).is_err());
    }

    #[test]
    fn missing_entry() {
        assert!(Options::parse_from(["levlog"]).entry().is_err());
        assert!(Options::parse_from(["levlog", "info"]).entry().is_err());
    }

    #[test]
    fn command_line_overrides_options_file() {
        let mut opts = options_file(&["--tag", "file", "--threshold", "debug", "--no-prefix"])
            .parse()
            .expect("Invalid options file");
        opts.update_from(["levlog", "--tag", "cli", "--no-prefix", "info", "hello"]);
        assert_eq!(opts.tag, Some("cli".to_string()));
        assert_eq!(opts.threshold, Some(Severity::Debug));
        assert!(!opts.prefix_severity);
        assert_eq!(
            opts.entry().expect("No entry"),
            (Severity::Info, "hello".to_string())
        );
    }

    #[test]
    fn options_file_values_kept() {
        let mut opts = options_file(&["--no-prefix", "--flags", "date"])
            .parse()
            .expect("Invalid options file");
        opts.update_from(["levlog", "--tag", "cli", "warning", "hi"]);
        assert!(!opts.prefix_severity);
        assert_eq!(opts.flags, Some(Flags::DATE));
        assert_eq!(opts.tag, Some("cli".to_string()));
        assert_eq!(opts.config().threshold, Severity::All);
    }

    #[test]
    fn options_file_parse_error() {
        let error = options_file(&["--threshold", "loud"])
            .parse()
            .expect_err("Parsed an invalid options file");
        assert!(error.starts_with("Unable to parse options file 'options.txt':"));
    }

    #[test]
    fn options_file_contents() {
        let file = OptionsFile::from_contents(
            PathBuf::from("options.txt"),
            "# Set tag\n--tag app\n\n  # Quiet\n--threshold error --no-prefix",
        );
        assert_eq!(
            file.args,
            vec!["--tag", "app", "--threshold", "error", "--no-prefix"]
        );
    }

    #[test]
    fn options_file_valid() {
        let dir = Path::new(TEST_DIR).join("options_file_valid");
        fs::create_dir_all(&dir).expect("Could not create test dir");
        let path = dir.join("options.txt");
        fs::write(&path, "--no-prefix\n--threshold info").expect("Could not write file");

        let file = read_options_file(Some(path.clone().into_os_string()))
            .expect("Unreadable options file")
            .expect("No options file");
        assert_eq!(file.path, path);
        assert_eq!(file.args, vec!["--no-prefix", "--threshold", "info"]);
    }

    #[test]
    fn options_file_missing() {
        let error = read_options_file(Some("test_options.txt".into()))
            .expect_err("Missing options file accepted");
        assert_eq!(
            error,
            "Configured LEVLOG_OPTIONS_PATH does not exist or is not a file. \
            Path: 'test_options.txt'"
        );
    }

    #[test]
    fn options_file_not_configured() {
        assert_eq!(read_options_file(None), Ok(None));
    }
}
