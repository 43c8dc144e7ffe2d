use crate::core::errors::{Result, SinkError};
use crate::core::models::record::Record;

/// Contract every output adapter fulfils.
///
/// Implementations live in `adapters` (e.g. EventLogSink). Sinks hold no
/// mutable state after construction, so one instance may be shared across
/// threads directly or behind whatever lock the host already uses around
/// its dispatch path.
pub trait Sink: Send + Sync {
    /// Deliver one record to the destination.
    ///
    /// A failure here is soft: the caller routes it to its error handler
    /// (or drops it) and keeps running. Implementations must not panic.
    fn emit(&self, record: &Record) -> Result<()>;

    /// Drain any internal buffer. Destinations that write synchronously
    /// return `Ok(())` immediately.
    fn flush(&self) -> Result<()>;
}

/// Callback a host installs to observe soft sink failures.
pub type ErrorHandler = Box<dyn Fn(&SinkError) + Send + Sync>;
