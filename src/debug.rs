// Copyright 2025 The atmega-uart Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Logging and Diagnostics
//!
//! Driver code logs through the `log` facade using the internal
//! `log_trace!`, `log_info!` and `log_warn!` macros, which compile to nothing
//! without the `log` feature.
//!
//! [`UartLogger`] is a `log::Log` backend that prints one line per record
//! through a sink function, normally the blocking UART output:
//!
//! ```text
//! [INFO] atmega_uart::dev::uart::atmega328: USART0: 9600 baud (ubrr=103, u2x=false), actual 9615
//! ```
//!
//! Interrupt handlers only emit trace records. The firmware installs the
//! logger before handing the port to interrupt context and then lowers the
//! level, so nothing writes to the data register behind the echo service.

/// Log a trace message
macro_rules! log_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    };
}

/// Log an info message
macro_rules! log_info {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        ::log::info!($($arg)*);
    };
}

/// Log a warning message
macro_rules! log_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
    };
}

#[cfg(feature = "log")]
pub use self::logger::*;

#[cfg(feature = "log")]
mod logger {
    use core::fmt::{self, Write};

    use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

    /// Output function for formatted log text
    pub type LogSink = fn(&str);

    /// ANSI color for a log level
    pub fn level_color(level: Level) -> &'static str {
        match level {
            Level::Trace => "\x1b[36m", // Cyan
            Level::Debug => "\x1b[34m", // Blue
            Level::Info => "\x1b[32m",  // Green
            Level::Warn => "\x1b[33m",  // Yellow
            Level::Error => "\x1b[31m", // Red
        }
    }

    const ANSI_RESET: &str = "\x1b[0m";

    /// Line-oriented logger writing through a [`LogSink`]
    pub struct UartLogger {
        sink: LogSink,
        colors: bool,
    }

    impl UartLogger {
        pub const fn new(sink: LogSink) -> Self {
            Self {
                sink,
                colors: false,
            }
        }

        /// Wrap the level tag in ANSI colors
        pub const fn with_colors(mut self, colors: bool) -> Self {
            self.colors = colors;
            self
        }

        /// Format one record: `[LEVEL] target: message\n`
        pub fn write_record<W: Write>(&self, out: &mut W, record: &Record<'_>) -> fmt::Result {
            let level = record.level();
            if self.colors {
                write!(out, "{}[{}]{} ", level_color(level), level.as_str(), ANSI_RESET)?;
            } else {
                write!(out, "[{}] ", level.as_str())?;
            }
            writeln!(out, "{}: {}", record.target(), record.args())
        }
    }

    struct SinkWriter(LogSink);

    impl Write for SinkWriter {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            (self.0)(s);
            Ok(())
        }
    }

    impl Log for UartLogger {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record<'_>) {
            if self.enabled(record.metadata()) {
                let _ = self.write_record(&mut SinkWriter(self.sink), record);
            }
        }

        fn flush(&self) {}
    }

    /// Install `logger` as the global logger
    ///
    /// Targets without pointer-sized atomics (AVR) use the racy setter; the
    /// firmware calls this once with interrupts still disabled.
    pub fn init(logger: &'static UartLogger, level: LevelFilter) -> Result<(), SetLoggerError> {
        #[cfg(target_has_atomic = "ptr")]
        log::set_logger(logger)?;

        // SAFETY: called once during single-threaded start-up, before
        // interrupts are enabled.
        #[cfg(not(target_has_atomic = "ptr"))]
        unsafe {
            log::set_logger_racy(logger)?
        };

        log::set_max_level(level);
        log_info!("logging initialized at {}", level);
        Ok(())
    }

}
