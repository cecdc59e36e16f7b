use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// Auxiliary fields a [`Sink`](crate::sink::Sink) adds to every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Flags(u32);

impl Flags {
    /// Date in the local time zone: 2009/01/23
    pub const DATE: Flags = Flags(1);
    /// Time in the local time zone: 01:23:23
    pub const TIME: Flags = Flags(1 << 1);
    /// Microsecond resolution: 01:23:23.123123. Implies TIME.
    pub const MICROSECONDS: Flags = Flags(1 << 2);
    /// Full file path and line number: src/main.rs:23
    pub const LONG_FILE: Flags = Flags(1 << 3);
    /// Final file name element and line number: main.rs:23. Overrides LONG_FILE.
    pub const SHORT_FILE: Flags = Flags(1 << 4);
    /// Use UTC rather than the local time zone
    pub const UTC: Flags = Flags(1 << 5);
    /// Move the tag from the beginning of the line to before the message
    pub const MSG_PREFIX: Flags = Flags(1 << 6);
    pub const STANDARD: Flags = Flags(Self::DATE.0 | Self::TIME.0);

    const NAMES: [(&'static str, Flags); 8] = [
        ("date", Flags::DATE),
        ("time", Flags::TIME),
        ("microseconds", Flags::MICROSECONDS),
        ("longfile", Flags::LONG_FILE),
        ("shortfile", Flags::SHORT_FILE),
        ("utc", Flags::UTC),
        ("msgprefix", Flags::MSG_PREFIX),
        ("standard", Flags::STANDARD),
    ];
    const MASK: u32 = (1 << 7) - 1;

    pub const fn empty() -> Self {
        Flags(0)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn from_bits_truncate(bits: u32) -> Self {
        Flags(bits & Self::MASK)
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(&self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(&self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, other: Flags) -> Flags {
        Flags(self.0 | other.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, other: Flags) {
        self.0 |= other.0
    }
}

#[derive(Debug, PartialEq)]
pub struct ParseFlagsError {
    pub name: String,
}

impl fmt::Display for ParseFlagsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown flag: '{}'. \
            Expected a comma separated list of: \
            date, time, microseconds, longfile, shortfile, utc, msgprefix, standard",
            self.name
        )
    }
}

impl std::error::Error for ParseFlagsError {}

impl FromStr for Flags {
    type Err = ParseFlagsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut flags = Flags::empty();
        for name in value.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let lowercase = name.to_ascii_lowercase();
            match Self::NAMES.iter().find(|(n, _)| *n == lowercase) {
                Some((_, flag)) => flags |= *flag,
                None => {
                    return Err(ParseFlagsError {
                        name: name.to_string(),
                    })
                }
            }
        }
        Ok(flags)
    }
}
