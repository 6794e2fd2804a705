//! In-memory host document and recording sink for driving an [`acpstore::TextStore`].
//!
//! [`MemoryDocument`] keeps its text in a rope and wires itself into
//! [`acpstore::HostHooks`]; [`RecordingSink`] logs everything the store tells the engine
//! and runs queued closures inside lock grants.

mod document;
mod sink;

pub use document::{CELL_WIDTH, LINE_HEIGHT, MemoryDocument};
pub use sink::{GrantScript, RecordingSink, SinkEvent};
