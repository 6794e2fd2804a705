//! Host-initiated notifications.
//!
//! The host calls these after mutating the document outside a lock grant. Calls made
//! while a lock is held would loop the change back into the grant that caused it, so
//! they are dropped.

use acpstore_primitives::{
	AdviseMask, AttrId, CharIdx, CharLen, InsertFlags, LayoutCode, LockFlags, TextChange,
};

use super::{SinkRegistration, TextStore};
use crate::Result;


impl TextStore {
	/// Reports a selection change.
	pub fn notify_selection_changed(&self) {
		let Some(reg) = self.notification_target("selection") else {
			return;
		};
		if reg.mask.contains(AdviseMask::SELECTION_CHANGE) {
			tracing::debug!(sink = %reg.id, "selection change");
			reg.sink.on_selection_change();
		}
	}

	/// Reports a text change. Always followed by a layout change for the active view.
	pub fn notify_text_changed(&self, change: TextChange) {
		let Some(reg) = self.notification_target("text") else {
			return;
		};
		if reg.mask.contains(AdviseMask::TEXT_CHANGE) {
			tracing::debug!(sink = %reg.id, ?change, "text change");
			reg.sink.on_text_change(change);
		}
		reg.sink.on_layout_change(LayoutCode::Changed, self.active_view());
	}

	/// Reports a text change given as its three offsets.
	pub fn notify_text_changed_at(&self, start: CharIdx, old_end: CharIdx, new_end: CharIdx) {
		self.notify_text_changed(TextChange::new(start, old_end, new_end));
	}

	/// Reports that the whole document went from `old_len` to `new_len` characters.
	pub fn notify_document_replaced(&self, old_len: CharLen, new_len: CharLen) {
		self.notify_text_changed(TextChange::whole_document(old_len, new_len));
	}

	/// Reports a change of read-only or loading status.
	pub fn notify_status_changed(&self) {
		let Some(reg) = self.notification_target("status") else {
			return;
		};
		if reg.mask.contains(AdviseMask::STATUS_CHANGE) {
			let flags = self.get_status().dynamic_flags;
			tracing::debug!(sink = %reg.id, ?flags, "status change");
			reg.sink.on_status_change(flags);
		}
	}

	/// Reports that the values of `attrs` changed over `[start, end)`.
	pub fn notify_attrs_changed(&self, start: CharIdx, end: CharIdx, attrs: &[AttrId]) {
		let Some(reg) = self.notification_target("attrs") else {
			return;
		};
		if reg.mask.contains(AdviseMask::ATTR_CHANGE) {
			tracing::debug!(sink = %reg.id, start, end, count = attrs.len(), "attrs change");
			reg.sink.on_attrs_change(start, end, attrs);
		}
	}

	/// Inserts `text` at the selection on the host's behalf and notifies the sink.
	///
	/// If a lock is already held nothing is inserted and the reported change is empty;
	/// the notifications are then dropped like any other made under a lock.
	pub fn insert_text(&self, text: &str) -> Result<TextChange> {
		let change = match self.lock_document(LockFlags::READ_WRITE) {
			Some(guard) => {
				let outcome = self.insert_text_at_selection(InsertFlags::NO_QUERY, text);
				drop(guard);
				outcome?.change
			}
			None => {
				tracing::warn!("document locked, host insert dropped");
				TextChange::default()
			}
		};
		self.notify_selection_changed();
		self.notify_text_changed(change);
		Ok(change)
	}

	fn notification_target(&self, what: &'static str) -> Option<SinkRegistration> {
		if self.is_locked_any() {
			tracing::warn!(what, "notification while locked suppressed");
			return None;
		}
		self.sink_registration()
	}
}
