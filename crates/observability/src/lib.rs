//! Shared tracing/logging setup for binaries and tests.

/// Tracing configuration (filters, output format).
pub mod tracing;

/// Initialize process-wide observability.
///
/// Safe to call multiple times; subsequent calls become no-ops, so tests
/// and the server binary can both call it unconditionally.
pub fn init() {
    tracing::init();
}
