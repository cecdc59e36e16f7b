use chrono::{Local, NaiveDateTime, Utc};
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::flags::Flags;

/// A writable stream that one or more sinks write lines to.
///
/// Sinks sharing a destination take the same lock, so their lines never interleave.
pub type Destination = Arc<Mutex<Box<dyn Write + Send>>>;

pub fn destination<W: Write + Send + 'static>(writer: W) -> Destination {
    Arc::new(Mutex::new(Box::new(writer)))
}

/// Source location of a log call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Caller<'a> {
    pub file: &'a str,
    pub line: u32,
}

impl Caller<'static> {
    pub const UNKNOWN: Caller<'static> = Caller {
        file: "???",
        line: 0,
    };

    #[track_caller]
    pub fn here() -> Self {
        std::panic::Location::caller().into()
    }
}

impl From<&'static std::panic::Location<'static>> for Caller<'static> {
    fn from(location: &'static std::panic::Location<'static>) -> Self {
        Caller {
            file: location.file(),
            line: location.line(),
        }
    }
}

/// Line oriented text output: every call writes one line made of the sink's
/// header fields followed by the message.
pub struct Sink {
    prefix: String,
    flags: Flags,
    out: Destination,
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink")
            .field("prefix", &self.prefix)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}

impl Sink {
    pub fn new(out: Destination, prefix: &str, flags: Flags) -> Self {
        Self {
            prefix: prefix.to_string(),
            flags,
            out,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn shares_destination(&self, other: &Sink) -> bool {
        Arc::ptr_eq(&self.out, &other.out)
    }

    /// Write a single line to the destination.
    pub fn output(&self, caller: &Caller<'_>, message: fmt::Arguments<'_>) -> io::Result<()> {
        let line = self.render_line(self.now(), caller, message)?;
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(&line)
    }

    pub fn flush(&self) -> io::Result<()> {
        self.out
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }

    fn now(&self) -> NaiveDateTime {
        if self.flags.contains(Flags::UTC) {
            Utc::now().naive_utc()
        } else {
            Local::now().naive_local()
        }
    }

    pub(crate) fn render_line(
        &self,
        now: NaiveDateTime,
        caller: &Caller<'_>,
        message: fmt::Arguments<'_>,
    ) -> io::Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(64);
        self.format_header(&mut buf, now, caller)?;
        let message_start = buf.len();
        buf.write_fmt(message)?;
        if buf.len() == message_start || buf[buf.len() - 1] != b'\n' {
            buf.push(b'\n');
        }
        Ok(buf)
    }

    fn format_header(
        &self,
        buf: &mut Vec<u8>,
        now: NaiveDateTime,
        caller: &Caller<'_>,
    ) -> io::Result<()> {
        let flags = self.flags;
        if !flags.contains(Flags::MSG_PREFIX) {
            buf.extend_from_slice(self.prefix.as_bytes());
        }
        if flags.contains(Flags::DATE) {
            write!(buf, "{} ", now.format("%Y/%m/%d"))?;
        }
        if flags.intersects(Flags::TIME | Flags::MICROSECONDS) {
            write!(buf, "{}", now.format("%H:%M:%S"))?;
            if flags.contains(Flags::MICROSECONDS) {
                write!(buf, "{}", now.format("%.6f"))?;
            }
            buf.push(b' ');
        }
        if flags.intersects(Flags::SHORT_FILE | Flags::LONG_FILE) {
            let file = if flags.contains(Flags::SHORT_FILE) {
                short_file(caller.file)
            } else {
                caller.file
            };
            write!(buf, "{}:{}: ", file, caller.line)?;
        }
        if flags.contains(Flags::MSG_PREFIX) {
            buf.extend_from_slice(self.prefix.as_bytes());
        }
        Ok(())
    }
}

fn short_file(file: &str) -> &str {
    match file.rfind(|c: char| c == '/' || c == '\\') {
        Some(index) => &file[index + 1..],
        None => file,
    }
}
