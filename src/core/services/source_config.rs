use crate::core::errors::Result;
use crate::core::models::level::EventType;
use crate::core::traits::registry::RegistryHive;

/// Registry subtree holding per-application event-log configuration.
pub const APPLICATION_KEY_PREFIX: &str =
    r"System\CurrentControlSet\Services\EventLog\Application\";

/// Value name pointing the Event Viewer at the message resource file.
pub const EVENT_MESSAGE_FILE_VALUE: &str = "EventMessageFile";

/// Value name for the supported-entry-types bitmask.
pub const TYPES_SUPPORTED_VALUE: &str = "TypesSupported";

/// Default `TypesSupported` bitmask: error, warning and informational.
pub const DEFAULT_TYPES_SUPPORTED: u32 = EventType::Error as u32
    | EventType::Warning as u32
    | EventType::Informational as u32;

/// Register `application` under the event-log registry tree.
///
/// Administrative, out-of-band: run once at install time, typically
/// elevated. Writes the message-file path and the supported-types bitmask
/// under `...\EventLog\Application\<application>`. The opened key is
/// released on every exit path, including a failed second write.
pub fn add_event_source(
    hive: &dyn RegistryHive,
    application: &str,
    message_file: &str,
    types_supported: u32,
) -> Result<()> {
    let path = format!("{APPLICATION_KEY_PREFIX}{application}");
    let key = hive.create_key(&path)?;
    key.set_expand_string(EVENT_MESSAGE_FILE_VALUE, message_file)?;
    key.set_dword(TYPES_SUPPORTED_VALUE, types_supported)?;
    Ok(())
}
