/// Log at a [`Severity`](crate::Severity) with `format!` style arguments.
///
/// Writes to the process-wide default logger, or to the logger given with `logger:`.
///
/// ```
/// use levlog::{emit, Severity};
///
/// emit!(Severity::Info, "listening on port {}", 8080);
///
/// let logger = levlog::Config::default().build(None);
/// emit!(logger: logger, Severity::Debug, "config: {:?}", levlog::Config::default());
/// ```
#[macro_export]
macro_rules! emit {
    (logger: $logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log($severity, format_args!($($arg)+))
    };
    ($severity:expr, $($arg:tt)+) => {
        $crate::default_logger().log($severity, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! fatal {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::emit!(logger: $logger, $crate::Severity::Fatal, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::emit!($crate::Severity::Fatal, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::emit!(logger: $logger, $crate::Severity::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::emit!($crate::Severity::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! warning {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::emit!(logger: $logger, $crate::Severity::Warning, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::emit!($crate::Severity::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::emit!(logger: $logger, $crate::Severity::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::emit!($crate::Severity::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::emit!(logger: $logger, $crate::Severity::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::emit!($crate::Severity::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! trace {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::emit!(logger: $logger, $crate::Severity::Trace, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::emit!($crate::Severity::Trace, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::flags::Flags;
    use crate::logger::LeveledLogger;
    use crate::severity::Severity;
    use crate::test::SharedBuffer;

    #[test]
    fn macros_write_to_given_logger() {
        let buffer = SharedBuffer::new();
        let logger = LeveledLogger::new(
            Some(buffer.destination()),
            "",
            Flags::empty(),
            Severity::Info,
            false,
        );
        crate::fatal!(logger: logger, "fatal {}", 1);
        crate::error!(logger: &logger, "error {}", 2);
        crate::warning!(logger: logger, "warning {}", 3);
        crate::info!(logger: logger, "info {value}", value = 4);
        crate::debug!(logger: logger, "debug {}", 5);
        crate::trace!(logger: logger, "trace {}", 6);
        crate::emit!(logger: logger, Severity::Warning, "emit {}", 7);
        assert_eq!(
            buffer.lines(),
            vec!["fatal 1", "error 2", "warning 3", "info 4", "emit 7"]
        );
    }

    #[test]
    fn trace_reports_macro_call_site() {
        let buffer = SharedBuffer::new();
        let logger = LeveledLogger::new(
            Some(buffer.destination()),
            "",
            Flags::SHORT_FILE,
            Severity::Trace,
            true,
        );
        crate::trace!(logger: logger, "step {}", "one");
        let line = line!() - 1;
        assert_eq!(
            buffer.contents(),
            format!("macros.rs:{}: Trace: step one\n", line)
        );
    }
}
