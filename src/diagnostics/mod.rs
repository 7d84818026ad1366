// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording the toast lifecycle.
//!
//! Every component that changes visible state logs a [`DiagnosticEvent`]
//! through a [`DiagnosticsHandle`]. The [`DiagnosticsCollector`] keeps the
//! most recent events in a memory-bounded [`CircularBuffer`] and exports
//! them as JSON.

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticReport, DiagnosticsCollector, DiagnosticsHandle, SerializableEvent};
pub use events::{DiagnosticEvent, DiagnosticEventKind, NotificationSource};
