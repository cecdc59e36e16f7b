//! Route records from the `log` crate's macros into a [`LeveledLogger`].

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::logger::LeveledLogger;
use crate::severity::Severity;
use crate::sink::Caller;

impl log::Log for LeveledLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        LeveledLogger::enabled(self, Severity::from(metadata.level()))
    }

    fn log(&self, record: &Record) {
        let caller = match (record.file(), record.line()) {
            (Some(file), Some(line)) => Caller { file, line },
            _ => Caller::UNKNOWN,
        };
        self.log_at(Severity::from(record.level()), &caller, *record.args());
    }

    fn flush(&self) {
        self.flush_sinks()
    }
}

/// Install `logger` as the global `log` logger.
///
/// Filtering is left to the logger's threshold, so later threshold changes apply to `log`
/// macros too. Fails when a global logger was already set.
pub fn init(logger: LeveledLogger) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(logger)).map(|()| log::set_max_level(LevelFilter::Trace))
}
