//! Process-wide default logger.
//!
//! Prefer building a [`LeveledLogger`] from a [`Config`] and passing it to the code that needs
//! it. The functions here are for call sites that have no logger at hand.

use std::fmt;

use crate::logger::{Config, LeveledLogger};

lazy_static! {
    static ref DEFAULT: LeveledLogger = Config::default().build(None);
}

/// Logger writing to stdout and stderr, with every severity enabled and prefixed.
pub fn default_logger() -> &'static LeveledLogger {
    &DEFAULT
}

#[track_caller]
pub fn fatal(args: fmt::Arguments<'_>) {
    DEFAULT.fatal(args)
}

#[track_caller]
pub fn error(args: fmt::Arguments<'_>) {
    DEFAULT.error(args)
}

#[track_caller]
pub fn warning(args: fmt::Arguments<'_>) {
    DEFAULT.warning(args)
}

#[track_caller]
pub fn info(args: fmt::Arguments<'_>) {
    DEFAULT.info(args)
}

#[track_caller]
pub fn debug(args: fmt::Arguments<'_>) {
    DEFAULT.debug(args)
}

#[track_caller]
pub fn trace(args: fmt::Arguments<'_>) {
    DEFAULT.trace(args)
}
