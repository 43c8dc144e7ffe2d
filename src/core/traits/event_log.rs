use crate::core::errors::Result;
use crate::core::models::level::EventType;
use crate::core::models::sid::Sid;

/// Port for the OS event-log service.
///
/// The Windows implementation lives in `adapters::winapi`; tests use
/// in-memory doubles. The core layer only depends on this trait.
pub trait EventLog: Send + Sync {
    /// Register a named event source and hand back its handle.
    ///
    /// Fails if the OS refuses the registration; no handle is allocated
    /// in that case.
    fn register_source(&self, source_name: &str) -> Result<Box<dyn EventSource>>;
}

/// A registered event source.
///
/// Owned exclusively by one sink. Dropping the source deregisters it
/// exactly once; deregistration failures are swallowed (best-effort
/// cleanup, nothing useful can be done with them at teardown).
pub trait EventSource: Send + Sync {
    /// Report exactly one event record: entry type, numeric category, a
    /// single message string, and an optional user identity. No event id,
    /// no raw data.
    fn report(
        &self,
        event_type: EventType,
        category: u16,
        message: &str,
        user: Option<&Sid>,
    ) -> Result<()>;
}
