#![deny(missing_docs)]

//! Installs the stderr log formatter for the quizdesk binary.
//!
//! Libraries in this workspace only emit `tracing` events; nothing is printed
//! until [`init`] is called with a level.

use std::io;

pub use tracing_core::Level;
use tracing_subscriber::fmt;

/// possible log levels
pub const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// How much context each log line carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Verbosity {
    /// Level and message only
    Terse,
    /// Timestamps and targets
    Normal,
    /// Timestamps, targets and thread ids
    Chatty,
}

impl Verbosity {
    /// The formatter usually wanted for a given level
    pub fn for_level(level: Level) -> Verbosity {
        if level <= Level::WARN {
            // lower `Level`s are less verbose: ERROR < WARN < ... < TRACE
            Verbosity::Terse
        } else if level == Level::TRACE {
            Verbosity::Chatty
        } else {
            Verbosity::Normal
        }
    }
}

/// Initializes a global tracing subscriber that writes to stderr.
///
/// By default, no logs are printed.
pub fn init(level: Option<Level>) {
    if let Some(level) = level {
        init_with(level, Verbosity::for_level(level));
    }
}

/// Like [`init`], with an explicit [`Verbosity`]
pub fn init_with(level: Level, verbosity: Verbosity) {
    let builder = fmt().with_max_level(level).with_writer(io::stderr);
    match verbosity {
        Verbosity::Terse => builder
            .event_format(fmt::format().without_time().with_target(false).compact())
            .init(),
        Verbosity::Normal => builder.init(),
        Verbosity::Chatty => builder.with_thread_ids(true).init(),
    }
}
