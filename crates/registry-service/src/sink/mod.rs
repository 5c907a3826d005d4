//! Out-of-band consumers of domain events
//!
//! A sink never reports failure to the caller; it logs and moves on.

mod spreadsheet;

use registry_core::DomainEvent;

pub use spreadsheet::{SinkError, SpreadsheetSink, SpreadsheetWriter, SPREADSHEET_HEADER};

/// Receiver of user lifecycle events
pub trait UserEventSink: Send + Sync {
    /// Hand an event to the sink without waiting for it to be processed
    fn publish(&self, event: DomainEvent);
}
