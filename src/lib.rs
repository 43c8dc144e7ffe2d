//! Windows Event Log sink for structured logging pipelines.
//!
//! The crate splits into a platform-independent core (severity model,
//! sink contract, trait ports to the OS, resolution and configuration
//! policies) and adapters: [`EventLogSink`] fulfils the sink contract
//! over the ports, `adapters::winapi` implements the ports with real OS
//! calls, and [`SinkLogger`] bridges the `log` facade.
//!
//! ```no_run
//! # #[cfg(windows)]
//! # fn main() -> winevent_sink::Result<()> {
//! use winevent_sink::{EventLogSink, SinkLogger};
//!
//! let sink = EventLogSink::new("MyService")?;
//! SinkLogger::new(sink).install().expect("logger already set");
//! log::set_max_level(log::LevelFilter::Info);
//!
//! log::warn!("cache directory missing, recreating");
//! # Ok(())
//! # }
//! # #[cfg(not(windows))]
//! # fn main() {}
//! ```
//!
//! Emission is best-effort by design: losing one diagnostic record never
//! takes the host application down. Construction is the opposite — a sink
//! that cannot register its event source is never handed out.

pub mod adapters;
pub mod core;

pub use crate::adapters::eventlog::sink::EventLogSink;
pub use crate::adapters::log_bridge::SinkLogger;
pub use crate::core::errors::{Result, SinkError};
pub use crate::core::models::level::{EventType, Level};
pub use crate::core::models::record::Record;
pub use crate::core::models::sid::Sid;
pub use crate::core::services::identity::resolve_current_user;
pub use crate::core::services::source_config::{DEFAULT_TYPES_SUPPORTED, add_event_source};
pub use crate::core::traits::sink::{ErrorHandler, Sink};

#[cfg(windows)]
pub use crate::adapters::winapi::{WinEventLog, WinIdentity, WinRegistry};
