//! Leveled logging facade.
//!
//! A [`LeveledLogger`] drops messages above its severity threshold and routes the rest to one
//! of three channels: fatal and error messages to stderr, warning, info and debug messages to
//! stdout, and trace messages to stdout annotated with the caller's file and line. When a
//! single destination is given every channel writes to it.
//!
//! ```
//! use levlog::{Config, Severity};
//!
//! let logger = Config {
//!     threshold: Severity::Warning,
//!     ..Config::default()
//! }
//! .build(None);
//! levlog::error!(logger: logger, "failed: {}", "disk full");
//! levlog::info!(logger: logger, "not written");
//! ```

#[macro_use]
extern crate lazy_static;

mod macros;

pub mod bridge;
pub mod flags;
pub mod global;
pub mod logger;
pub mod severity;
pub mod sink;

#[cfg(test)]
mod test;

pub use flags::Flags;
pub use global::{debug, default_logger, error, fatal, info, trace, warning};
pub use logger::{Channel, Config, LeveledLogger};
pub use severity::Severity;
pub use sink::{destination, Destination, Sink};
