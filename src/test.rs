use chrono::{NaiveDate, NaiveDateTime};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::sink::{destination, Destination};

/// In-memory writer whose contents stay readable after it's handed to a logger.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destination(&self) -> Destination {
        destination(self.clone())
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock().unwrap()).to_string()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .map(std::string::ToString::to_string)
            .collect::<Vec<String>>()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that fails every write, like a closed pipe.
pub struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }
}

pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2009, 1, 23)
        .and_then(|date| date.and_hms_micro_opt(1, 23, 23, 123_123))
        .expect("Invalid test time")
}
