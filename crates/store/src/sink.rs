//! Engine-side observer.

use acpstore_primitives::{
	AttrId, CharIdx, DynamicStatusFlags, LayoutCode, LockFlags, TextChange, ViewCookie,
};

use crate::{Result, TextStore};

/// Identifies an advised sink. Re-advising with the same id updates the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SinkId(pub u64);

impl std::fmt::Display for SinkId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "sink#{}", self.0)
	}
}

/// Receives lock grants and change notifications from a [`TextStore`].
///
/// Only `on_lock_granted` is required. Notification methods are delivered only when
/// the sink's advise mask includes the matching bit, except layout changes that
/// accompany a text change.
pub trait TextStoreSink: Send + Sync {
	/// Called with the lock held. `store` accepts edit operations for the duration.
	///
	/// A read-lock grant may request an asynchronous read-write upgrade; it is
	/// granted through a second call once this one returns.
	fn on_lock_granted(&self, store: &TextStore, flags: LockFlags) -> Result<()>;

	/// Text changed outside a lock grant.
	fn on_text_change(&self, _change: TextChange) {}

	/// Selection changed outside a lock grant.
	fn on_selection_change(&self) {}

	/// Rendered positions of `view` are stale.
	fn on_layout_change(&self, _code: LayoutCode, _view: ViewCookie) {}

	/// Dynamic document status changed.
	fn on_status_change(&self, _flags: DynamicStatusFlags) {}

	/// Attribute values changed over `[start, end)`.
	fn on_attrs_change(&self, _start: CharIdx, _end: CharIdx, _attrs: &[AttrId]) {}
}
