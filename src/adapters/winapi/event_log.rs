use std::ffi::c_void;
use std::ptr;

use windows_sys::Win32::Foundation::{GetLastError, HANDLE};
use windows_sys::Win32::System::EventLog::{
    DeregisterEventSource, RegisterEventSourceW, ReportEventW,
};

use super::wide::to_wide_null;
use crate::core::errors::{Result, SinkError};
use crate::core::models::level::EventType;
use crate::core::models::sid::Sid;
use crate::core::traits::event_log::{EventLog, EventSource};

/// The local Event Log service.
pub struct WinEventLog;

impl EventLog for WinEventLog {
    fn register_source(&self, source_name: &str) -> Result<Box<dyn EventSource>> {
        let name = to_wide_null(source_name);
        // SAFETY: `name` is NUL-terminated and outlives the call; a null
        // server means the local machine.
        let handle = unsafe { RegisterEventSourceW(ptr::null(), name.as_ptr()) };
        if handle.is_null() {
            return Err(SinkError::Registration {
                source_name: source_name.to_owned(),
                code: unsafe { GetLastError() },
            });
        }
        Ok(Box::new(WinEventSource { handle }))
    }
}

struct WinEventSource {
    handle: HANDLE,
}

// The handle is written once at registration and only read afterwards;
// the Event Log service serializes concurrent report calls itself.
unsafe impl Send for WinEventSource {}
unsafe impl Sync for WinEventSource {}

impl EventSource for WinEventSource {
    fn report(
        &self,
        event_type: EventType,
        category: u16,
        message: &str,
        user: Option<&Sid>,
    ) -> Result<()> {
        let message = to_wide_null(message);
        let strings = [message.as_ptr()];
        let sid = user
            .map(|sid| sid.as_bytes().as_ptr() as *mut c_void)
            .unwrap_or(ptr::null_mut());
        // SAFETY: `strings` holds one NUL-terminated string and, like the
        // SID buffer, outlives the call.
        let ok = unsafe {
            ReportEventW(
                self.handle,
                event_type.code(),
                category,
                0, // no event id
                sid,
                strings.len() as u16,
                0, // no raw data
                strings.as_ptr(),
                ptr::null(),
            )
        };
        if ok == 0 {
            return Err(SinkError::Emission {
                detail: format!("ReportEventW failed (os error {})", unsafe {
                    GetLastError()
                }),
            });
        }
        Ok(())
    }
}

impl Drop for WinEventSource {
    fn drop(&mut self) {
        // Nothing actionable on a failed deregistration at teardown.
        unsafe {
            DeregisterEventSource(self.handle);
        }
    }
}
