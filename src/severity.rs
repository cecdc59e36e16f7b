use std::fmt;
use std::str::FromStr;

/// Logging severity, ordered from least to most permissive.
///
/// A logger configured with threshold `T` emits a message of severity `S` when `T >= S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    None = 0,
    Fatal = 1,
    Error = 2,
    Warning = 3,
    Info = 4,
    Debug = 5,
    Trace = 6,
    All = 7,
}

impl Severity {
    pub const ALL_LEVELS: [Severity; 8] = [
        Severity::None,
        Severity::Fatal,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Debug,
        Severity::Trace,
        Severity::All,
    ];

    /// Severities a message can be emitted at. `None` and `All` are thresholds only.
    pub const EMITTING: [Severity; 6] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
        Severity::Debug,
        Severity::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Fatal => "Fatal",
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
            Severity::Debug => "Debug",
            Severity::Trace => "Trace",
            Severity::All => "All",
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL_LEVELS.get(value as usize).copied()
    }

    /// Returns true when a logger with this threshold emits messages of `severity`.
    pub fn permits(&self, severity: Severity) -> bool {
        *self >= severity
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warning,
            log::Level::Info => Severity::Info,
            log::Level::Debug => Severity::Debug,
            log::Level::Trace => Severity::Trace,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, PartialEq)]
pub struct ParseSeverityError {
    pub value: String,
}

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown severity: '{}'. \
            Expected one of: none, fatal, error, warning, info, debug, trace, all",
            self.value
        )
    }
}

impl std::error::Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let severity = match value.to_ascii_lowercase().as_str() {
            "none" => Severity::None,
            "fatal" => Severity::Fatal,
            "error" => Severity::Error,
            "warning" | "warn" => Severity::Warning,
            "info" => Severity::Info,
            "debug" => Severity::Debug,
            "trace" => Severity::Trace,
            "all" => Severity::All,
            _ => {
                return Err(ParseSeverityError {
                    value: value.to_string(),
                })
            }
        };
        Ok(severity)
    }
}
