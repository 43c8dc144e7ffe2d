use crate::core::errors::Result;

/// Port for the machine registry hive holding event-log configuration.
///
/// Used only by the administrative `add_event_source` helper, never on
/// the per-message path. The registry tree is an external system of
/// record; nothing is cached in-process.
pub trait RegistryHive: Send + Sync {
    /// Create or open `path` under the local-machine hive.
    fn create_key(&self, path: &str) -> Result<Box<dyn RegistryKey>>;
}

/// An open registry key.
///
/// The key is released when the value is dropped, on every exit path,
/// including mid-sequence write failures.
pub trait RegistryKey {
    /// Write an expandable-string value.
    fn set_expand_string(&self, name: &str, value: &str) -> Result<()>;

    /// Write a 32-bit integer value.
    fn set_dword(&self, name: &str, value: u32) -> Result<()>;
}
