use serde::{Deserialize, Serialize};

/// Severity levels of the sink contract, ordered from least to most
/// severe, with `Off` as the terminal sentinel.
///
/// The numeric value of each level doubles as the event category on the
/// reported record, so the discriminants are part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Critical = 5,
    Off = 6,
}

impl Level {
    /// All levels, in severity order.
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Critical,
        Level::Off,
    ];

    /// Raw numeric value, used as the category of the reported event.
    pub fn category(self) -> u16 {
        self as u16
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Critical => "critical",
            Level::Off => "off",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three entry types the Event Log distinguishes, with their wire
/// codes (`EVENTLOG_ERROR_TYPE`, `EVENTLOG_WARNING_TYPE`,
/// `EVENTLOG_INFORMATION_TYPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum EventType {
    Error = 0x0001,
    Warning = 0x0002,
    Informational = 0x0004,
}

impl EventType {
    /// Wire code passed to the OS report call and used in the
    /// `TypesSupported` registry bitmask.
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// Total severity-to-entry-type mapping. A `match` over the closed enum,
/// so adding or reordering levels is a compile error here rather than an
/// out-of-range read.
impl From<Level> for EventType {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace | Level::Debug | Level::Info | Level::Off => EventType::Informational,
            Level::Warn => EventType::Warning,
            Level::Error | Level::Critical => EventType::Error,
        }
    }
}
