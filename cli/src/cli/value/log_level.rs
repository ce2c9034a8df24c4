use clap::ValueEnum;
use log::LevelFilter;

/// Level of diagnostics written to stderr.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, ValueEnum)]
pub(crate) enum LogLevel {
    /// Nothing, not even errors
    Off,
    Error,
    /// Also skipped card chunks and failed verification
    #[default]
    Warn,
    Info,
    /// Also dropped and written chunks
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    #[inline]
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => Self::Off,
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}
