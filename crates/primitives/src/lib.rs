//! Core data types for the ACP text store protocol: offsets, selections, change
//! records, geometry, flag sets, and attribute values.

/// Out-of-band attribute identifiers and values.
pub mod attr;
/// Text change records.
pub mod change;
/// Display attribute descriptors.
pub mod display;
/// Protocol flag sets and small enums.
pub mod flags;
/// Screen geometry.
pub mod geometry;
/// Character offsets and host selection pairs.
pub mod range;
/// Canonical selections.
pub mod selection;

pub use attr::{AttrId, AttrVal, AttrValue, GuidAtom, MODE_BIAS_NONE};
pub use change::TextChange;
pub use display::{AttrInfo, DisplayAttribute, DisplayAttributeSpan, DisplayColor, LineStyle};
pub use flags::{
	AdviseMask, AttrRequestFlags, DocumentStatus, DynamicStatusFlags, InsertFlags, LayoutCode,
	LockFlags, RunInfo, RunKind, SetTextFlags, StaticStatusFlags, ViewCookie,
};
pub use geometry::{Point, Rect};
pub use range::{CharIdx, CharLen, Direction, TextSelection};
pub use selection::{AcpSelection, ActiveSelEnd, SelectionIndex, SelectionStyle};
pub use uuid::Uuid;
