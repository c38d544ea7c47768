//! Process-wide logging setup shared by the gate's binaries.

/// Initialize tracing/logging for the process, format taken from `LOG_FORMAT`.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing subscriber configuration (filters, formatting).
pub mod tracing;

pub use tracing::LogFormat;
