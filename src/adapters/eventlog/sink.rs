use std::sync::Arc;

use crate::core::errors::Result;
use crate::core::models::level::EventType;
use crate::core::models::record::Record;
use crate::core::services::identity::resolve_current_user;
use crate::core::traits::event_log::{EventLog, EventSource};
use crate::core::traits::identity::IdentityProvider;
use crate::core::traits::sink::Sink;

/// The OS rejects report calls whose message exceeds this many UTF-16
/// units; longer payloads are truncated rather than lost.
const MAX_MESSAGE_UTF16: usize = 31_839;

/// Sink that delivers records to the Windows Event Log.
///
/// Construction registers a named event source and fails hard if the OS
/// refuses it. After that the sink is immutable: one borrowed record in,
/// one reported event out, with the calling user's SID attached when it
/// can be resolved. Dropping the sink deregisters the source.
pub struct EventLogSink {
    source: Box<dyn EventSource>,
    identity: Arc<dyn IdentityProvider>,
}

impl std::fmt::Debug for EventLogSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLogSink").finish_non_exhaustive()
    }
}

impl EventLogSink {
    /// Register `source_name` against the given backend.
    ///
    /// This is the construction path tests and non-Windows hosts use; on
    /// Windows, [`EventLogSink::new`] wires in the real OS adapters.
    pub fn with_backend(
        event_log: &dyn EventLog,
        identity: Arc<dyn IdentityProvider>,
        source_name: &str,
    ) -> Result<Self> {
        let source = event_log.register_source(source_name)?;
        Ok(Self { source, identity })
    }

    /// Register `source_name` with the local Event Log service.
    #[cfg(windows)]
    pub fn new(source_name: &str) -> Result<Self> {
        use crate::adapters::winapi::{WinEventLog, WinIdentity};
        Self::with_backend(&WinEventLog, Arc::new(WinIdentity), source_name)
    }
}

impl Sink for EventLogSink {
    fn emit(&self, record: &Record) -> Result<()> {
        let event_type = EventType::from(record.level);
        // Fresh per emission, never cached; absent identity is fine.
        let user = resolve_current_user(self.identity.as_ref());
        let message = clamp_payload(&record.payload);
        self.source
            .report(event_type, record.level.category(), message, user.as_ref())
    }

    fn flush(&self) -> Result<()> {
        // Every report call is synchronous; there is nothing to drain.
        Ok(())
    }
}

/// Cut the payload at the last character boundary that fits the OS
/// message limit.
fn clamp_payload(payload: &str) -> &str {
    let mut units = 0usize;
    for (idx, ch) in payload.char_indices() {
        units += ch.len_utf16();
        if units > MAX_MESSAGE_UTF16 {
            return &payload[..idx];
        }
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::SinkError;
    use crate::core::models::level::Level;
    use crate::core::models::sid::Sid;
    use crate::core::traits::identity::SidLookup;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Reported {
        type_code: u16,
        category: u16,
        message: String,
        sid_len: Option<usize>,
    }

    #[derive(Default)]
    struct LogState {
        registered: Vec<String>,
        live_sources: usize,
        deregistered: usize,
        reports: Vec<Reported>,
        fail_report: bool,
    }

    /// Event-log double: counts registrations, records reports, counts
    /// deregistrations through `Drop`.
    #[derive(Clone, Default)]
    struct FakeEventLog {
        state: Arc<Mutex<LogState>>,
        reject_registration: bool,
    }

    struct FakeSource {
        state: Arc<Mutex<LogState>>,
    }

    impl EventLog for FakeEventLog {
        fn register_source(&self, source_name: &str) -> Result<Box<dyn EventSource>> {
            if self.reject_registration {
                return Err(SinkError::Registration {
                    source_name: source_name.to_owned(),
                    code: 5,
                });
            }
            let mut state = self.state.lock().unwrap();
            state.registered.push(source_name.to_owned());
            state.live_sources += 1;
            Ok(Box::new(FakeSource {
                state: Arc::clone(&self.state),
            }))
        }
    }

    impl EventSource for FakeSource {
        fn report(
            &self,
            event_type: EventType,
            category: u16,
            message: &str,
            user: Option<&Sid>,
        ) -> Result<()> {
            let mut state = self.state.lock().unwrap();
            if state.fail_report {
                return Err(SinkError::Emission {
                    detail: "event log full".into(),
                });
            }
            state.reports.push(Reported {
                type_code: event_type.code(),
                category,
                message: message.to_owned(),
                sid_len: user.map(Sid::len),
            });
            Ok(())
        }
    }

    impl Drop for FakeSource {
        fn drop(&mut self) {
            let mut state = self.state.lock().unwrap();
            state.live_sources -= 1;
            state.deregistered += 1;
        }
    }

    /// Identity double with a fixed answer.
    struct FixedIdentity {
        available: bool,
    }

    impl IdentityProvider for FixedIdentity {
        fn current_user_name(&self) -> Option<String> {
            self.available.then(|| "svc".to_owned())
        }

        fn lookup_account_sid(&self, _account: &str, buffer: &mut Vec<u8>) -> SidLookup {
            buffer.truncate(12);
            SidLookup::Found
        }

        fn is_valid_sid(&self, _sid: &[u8]) -> bool {
            true
        }
    }

    fn sink_with(log: &FakeEventLog, identity_available: bool) -> EventLogSink {
        EventLogSink::with_backend(
            log,
            Arc::new(FixedIdentity {
                available: identity_available,
            }),
            "TestSource",
        )
        .unwrap()
    }

    #[test]
    fn rejected_registration_fails_construction_without_a_handle() {
        let log = FakeEventLog {
            reject_registration: true,
            ..Default::default()
        };
        let err = EventLogSink::with_backend(
            &log,
            Arc::new(FixedIdentity { available: true }),
            "Nope",
        )
        .expect_err("registration rejected");

        assert!(matches!(err, SinkError::Registration { ref source_name, code: 5 } if source_name == "Nope"));
        assert_eq!(log.state.lock().unwrap().live_sources, 0);
    }

    #[test]
    fn emit_reports_mapped_type_and_raw_category() {
        let log = FakeEventLog::default();
        let sink = sink_with(&log, true);

        for level in Level::ALL {
            sink.emit(&Record::new(level, format!("message at {level}")))
                .unwrap();
        }

        let state = log.state.lock().unwrap();
        let seen: Vec<(u16, u16)> = state
            .reports
            .iter()
            .map(|r| (r.type_code, r.category))
            .collect();
        assert_eq!(
            seen,
            vec![
                (0x0004, 0), // trace
                (0x0004, 1), // debug
                (0x0004, 2), // info
                (0x0002, 3), // warn
                (0x0001, 4), // error
                (0x0001, 5), // critical
                (0x0004, 6), // off
            ]
        );
    }

    #[test]
    fn emit_attaches_the_resolved_sid() {
        let log = FakeEventLog::default();
        let sink = sink_with(&log, true);

        sink.emit(&Record::new(Level::Info, "attributed")).unwrap();

        let state = log.state.lock().unwrap();
        assert_eq!(state.reports[0].sid_len, Some(12));
    }

    #[test]
    fn emit_without_identity_still_reports() {
        let log = FakeEventLog::default();
        let sink = sink_with(&log, false);

        sink.emit(&Record::new(Level::Error, "unattributed"))
            .unwrap();

        let state = log.state.lock().unwrap();
        assert_eq!(state.reports.len(), 1);
        assert_eq!(state.reports[0].sid_len, None);
    }

    #[test]
    fn emit_surfaces_report_failure_as_emission_error() {
        let log = FakeEventLog::default();
        let sink = sink_with(&log, true);
        log.state.lock().unwrap().fail_report = true;

        let err = sink
            .emit(&Record::new(Level::Info, "dropped"))
            .expect_err("report fails");
        assert!(matches!(err, SinkError::Emission { .. }));
    }

    #[test]
    fn drop_deregisters_exactly_once() {
        let log = FakeEventLog::default();
        let sink = sink_with(&log, true);
        {
            let state = log.state.lock().unwrap();
            assert_eq!(state.registered, vec!["TestSource"]);
            assert_eq!(state.live_sources, 1);
        }

        drop(sink);

        let state = log.state.lock().unwrap();
        assert_eq!(state.live_sources, 0);
        assert_eq!(state.deregistered, 1);
    }

    #[test]
    fn flush_is_a_no_op() {
        let log = FakeEventLog::default();
        let sink = sink_with(&log, true);
        sink.flush().unwrap();
        sink.flush().unwrap();
        assert!(log.state.lock().unwrap().reports.is_empty());
    }

    #[test]
    fn oversized_payload_is_clamped_on_a_char_boundary() {
        let log = FakeEventLog::default();
        let sink = sink_with(&log, true);

        // 'é' is one UTF-16 unit but two UTF-8 bytes; an odd byte cut
        // would split it.
        let payload = "é".repeat(MAX_MESSAGE_UTF16 + 10);
        sink.emit(&Record::new(Level::Info, payload)).unwrap();

        let state = log.state.lock().unwrap();
        let message = &state.reports[0].message;
        assert_eq!(message.chars().count(), MAX_MESSAGE_UTF16);
        assert!(message.chars().all(|c| c == 'é'));
    }

    #[test]
    fn short_payload_is_passed_through_untouched() {
        assert_eq!(clamp_payload("hello"), "hello");
    }

    #[test]
    fn sink_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EventLogSink>();
    }
}
