//! Observability subsystem.
//!
//! Only structured logging: the library emits `tracing` events, the binary
//! installs the subscriber.

pub mod logging;
