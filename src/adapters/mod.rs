pub mod eventlog;
pub mod log_bridge;
#[cfg(windows)]
pub mod winapi;
