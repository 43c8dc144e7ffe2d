use crate::core::models::level::Level;
use crate::core::models::record::Record;
use crate::core::traits::sink::{ErrorHandler, Sink};

/// Bridge exposing any [`Sink`] as a `log::Log` backend.
///
/// This is how an application on the `log` facade routes its records into
/// the Event Log. Sink failures never reach the logging macros: they go
/// to the installed error handler, or are dropped when none is set —
/// best-effort logging must not disturb the host.
pub struct SinkLogger {
    sink: Box<dyn Sink>,
    error_handler: Option<ErrorHandler>,
}

impl SinkLogger {
    pub fn new(sink: impl Sink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            error_handler: None,
        }
    }

    /// Install a callback observing soft sink failures.
    pub fn with_error_handler(mut self, handler: ErrorHandler) -> Self {
        self.error_handler = Some(handler);
        self
    }

    /// Register this bridge as the global logger.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))
    }

    fn forward(&self, record: &Record) {
        if let Err(err) = self.sink.emit(record)
            && let Some(handler) = &self.error_handler
        {
            handler(&err);
        }
    }
}

impl log::Log for SinkLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let record = Record::new(level_from_facade(record.level()), record.args().to_string())
            .with_source(record.target());
        self.forward(&record);
    }

    fn flush(&self) {
        let _ = self.sink.flush();
    }
}

/// The facade knows five levels; `Critical` and `Off` have no facade
/// counterpart and are only produced by hosts speaking the sink contract
/// directly.
fn level_from_facade(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug => Level::Debug,
        log::Level::Trace => Level::Trace,
    }
}
