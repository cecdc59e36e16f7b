use std::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use crate::flags::Flags;
use crate::severity::Severity;
use crate::sink::{self, Caller, Destination, Sink};

/// Output channel a severity is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Standard,
    Error,
    /// Standard output with the caller's file and line on every line.
    Trace,
}

impl Channel {
    // Indexed by severity ordinal. `None` and `All` are thresholds, never message severities.
    const ROUTES: [Option<Channel>; 8] = [
        None,
        Some(Channel::Error),
        Some(Channel::Error),
        Some(Channel::Standard),
        Some(Channel::Standard),
        Some(Channel::Standard),
        Some(Channel::Trace),
        None,
    ];

    pub fn for_severity(severity: Severity) -> Option<Channel> {
        Self::ROUTES[severity as usize]
    }
}

/// Construction settings for a [`LeveledLogger`].
///
/// The default matches the process-wide logger: no tag, no auxiliary fields, every severity
/// emitted and prefixed.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub tag: String,
    pub flags: Flags,
    pub threshold: Severity,
    pub prefix_severity: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tag: String::new(),
            flags: Flags::empty(),
            threshold: Severity::All,
            prefix_severity: true,
        }
    }
}

impl Config {
    pub fn build(&self, destination: Option<Destination>) -> LeveledLogger {
        LeveledLogger::new(
            destination,
            &self.tag,
            self.flags,
            self.threshold,
            self.prefix_severity,
        )
    }
}

/// Severity filter in front of three output channels.
pub struct LeveledLogger {
    standard: Arc<Sink>,
    error: Arc<Sink>,
    trace: Sink,
    threshold: AtomicU8,
    prefix_severity: AtomicBool,
}

impl LeveledLogger {
    /// Create a logger writing to `destination`.
    ///
    /// Without a destination standard and trace output go to stdout and error output goes to
    /// stderr. With a destination every channel writes to it, so fatal and error lines are no
    /// longer separated from the rest. The trace channel always adds the caller's file and line.
    pub fn new(
        destination: Option<Destination>,
        tag: &str,
        flags: Flags,
        threshold: Severity,
        prefix_severity: bool,
    ) -> Self {
        let trace_flags = flags | Flags::LONG_FILE;
        let (standard, error, trace) = match destination {
            None => {
                let stdout = sink::destination(io::stdout());
                let standard = Arc::new(Sink::new(stdout.clone(), tag, flags));
                let error = Arc::new(Sink::new(sink::destination(io::stderr()), tag, flags));
                (standard, error, Sink::new(stdout, tag, trace_flags))
            }
            Some(out) => {
                let standard = Arc::new(Sink::new(out.clone(), tag, flags));
                (standard.clone(), standard, Sink::new(out, tag, trace_flags))
            }
        };
        Self {
            standard,
            error,
            trace,
            threshold: AtomicU8::new(threshold as u8),
            prefix_severity: AtomicBool::new(prefix_severity),
        }
    }

    pub fn from_config(config: &Config, destination: Option<Destination>) -> Self {
        config.build(destination)
    }

    pub fn threshold(&self) -> Severity {
        Severity::from_u8(self.threshold.load(Ordering::Relaxed)).unwrap_or(Severity::All)
    }

    pub fn set_threshold(&self, threshold: Severity) {
        self.threshold.store(threshold as u8, Ordering::Relaxed)
    }

    pub fn prefix_severity(&self) -> bool {
        self.prefix_severity.load(Ordering::Relaxed)
    }

    pub fn set_prefix_severity(&self, prefix_severity: bool) {
        self.prefix_severity.store(prefix_severity, Ordering::Relaxed)
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        self.threshold().permits(severity)
    }

    pub fn sink(&self, channel: Channel) -> &Sink {
        match channel {
            Channel::Standard => &self.standard,
            Channel::Error => &self.error,
            Channel::Trace => &self.trace,
        }
    }

    pub fn sink_for(&self, severity: Severity) -> Option<&Sink> {
        Channel::for_severity(severity).map(|channel| self.sink(channel))
    }

    /// True when error output is written to the same sink as standard output.
    pub fn errors_aliased(&self) -> bool {
        Arc::ptr_eq(&self.standard, &self.error)
    }

    #[track_caller]
    pub fn fatal(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Fatal, args)
    }

    #[track_caller]
    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, args)
    }

    #[track_caller]
    pub fn warning(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Warning, args)
    }

    #[track_caller]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Info, args)
    }

    #[track_caller]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, args)
    }

    #[track_caller]
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Trace, args)
    }

    /// Write `args` to the channel of `severity` if the threshold permits it.
    ///
    /// Logging at `None` or `All` writes nothing.
    #[track_caller]
    pub fn log(&self, severity: Severity, args: fmt::Arguments<'_>) {
        self.log_at(severity, &Caller::here(), args)
    }

    pub(crate) fn log_at(
        &self,
        severity: Severity,
        caller: &Caller<'_>,
        args: fmt::Arguments<'_>,
    ) {
        let threshold = self.threshold();
        if !threshold.permits(severity) {
            return;
        }
        let sink = match self.sink_for(severity) {
            Some(sink) => sink,
            None => return,
        };
        // Write errors are dropped, callers never see them.
        if self.prefix_severity() {
            // The prefix names the threshold, not the severity of the call.
            let _ = sink.output(caller, format_args!("{}: {}", threshold, args));
        } else {
            let _ = sink.output(caller, args);
        }
    }

    pub(crate) fn flush_sinks(&self) {
        for sink in [&*self.standard, &*self.error, &self.trace] {
            let _ = sink.flush();
        }
    }
}

impl fmt::Debug for LeveledLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeveledLogger")
            .field("standard", &self.standard)
            .field("error", &self.error)
            .field("trace", &self.trace)
            .field("threshold", &self.threshold())
            .field("prefix_severity", &self.prefix_severity())
            .finish()
    }
}
