/// All failure modes of this crate.
///
/// Construction-time failures are hard: a sink that cannot register its
/// event source is never handed out. Per-message failures are soft: the
/// host decides whether to route them to an error handler or drop them,
/// but losing one diagnostic record must never take the application down.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error(
        "Failed to register event source '{source_name}' (os error {code})\n\n  \
         The Event Log service refused the registration. Check that the\n  \
         service is running and that the process is allowed to register\n  \
         the source name."
    )]
    Registration { source_name: String, code: u32 },

    #[error("Failed to configure event source: {detail} (os error {code})")]
    Configuration { detail: String, code: u32 },

    #[error("Failed to report event: {detail}")]
    Emission { detail: String },
}

impl SinkError {
    /// The OS error code carried by this error, when one exists.
    pub fn os_code(&self) -> Option<u32> {
        match self {
            SinkError::Registration { code, .. } | SinkError::Configuration { code, .. } => {
                Some(*code)
            }
            SinkError::Emission { .. } => None,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SinkError>;
