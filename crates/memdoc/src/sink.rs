use std::collections::VecDeque;
use std::fmt;

use acpstore::{TextStore, TextStoreSink};
use acpstore_primitives::{
	AttrId, CharIdx, DynamicStatusFlags, LayoutCode, LockFlags, TextChange, ViewCookie,
};
use parking_lot::Mutex;

#[cfg(test)]
mod tests;

/// Something a [`RecordingSink`] observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
	/// A lock grant with the granted flags.
	LockGranted(LockFlags),
	/// A text change notification.
	TextChange(TextChange),
	/// A selection change notification.
	SelectionChange,
	/// A layout change notification.
	LayoutChange(LayoutCode, ViewCookie),
	/// A status change notification with the new dynamic flags.
	StatusChange(DynamicStatusFlags),
	/// An attribute change notification.
	AttrsChange {
		start: CharIdx,
		end: CharIdx,
		attrs: Vec<AttrId>,
	},
	/// A free-form line written by a grant script.
	Note(String),
}

impl fmt::Display for SinkEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::LockGranted(flags) => write!(f, "lock granted {flags:?}"),
			Self::TextChange(change) => write!(
				f,
				"text change {}..{} -> {}",
				change.start, change.old_end, change.new_end
			),
			Self::SelectionChange => f.write_str("selection change"),
			Self::LayoutChange(code, view) => write!(f, "layout {code:?} {view}"),
			Self::StatusChange(flags) => write!(f, "status {flags:?}"),
			Self::AttrsChange { start, end, attrs } => {
				write!(f, "attrs change {start}..{end} ({} attrs)", attrs.len())
			}
			Self::Note(note) => f.write_str(note),
		}
	}
}

/// Work run inside one lock grant.
pub type GrantScript = Box<dyn FnOnce(&TextStore, LockFlags) -> acpstore::Result<()> + Send>;

/// A sink that logs every callback and runs queued [`GrantScript`]s.
///
/// Each grant pops the oldest queued script; grants with nothing queued just record
/// themselves and succeed.
#[derive(Default)]
pub struct RecordingSink {
	events: Mutex<Vec<SinkEvent>>,
	scripts: Mutex<VecDeque<GrantScript>>,
}

impl RecordingSink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues `script` for a future grant.
	pub fn push_grant(
		&self,
		script: impl FnOnce(&TextStore, LockFlags) -> acpstore::Result<()> + Send + 'static,
	) {
		self.scripts.lock().push_back(Box::new(script));
	}

	/// Appends a [`SinkEvent::Note`].
	pub fn note(&self, note: impl Into<String>) {
		self.events.lock().push(SinkEvent::Note(note.into()));
	}

	pub fn events(&self) -> Vec<SinkEvent> {
		self.events.lock().clone()
	}

	/// Returns and clears the log.
	pub fn take_events(&self) -> Vec<SinkEvent> {
		std::mem::take(&mut *self.events.lock())
	}

	/// Flags of every grant so far.
	pub fn grants(&self) -> Vec<LockFlags> {
		self.events
			.lock()
			.iter()
			.filter_map(|event| match event {
				SinkEvent::LockGranted(flags) => Some(*flags),
				_ => None,
			})
			.collect()
	}

	/// Scripts still waiting for a grant.
	pub fn pending_scripts(&self) -> usize {
		self.scripts.lock().len()
	}

	/// Drops every queued script and returns how many there were.
	pub fn clear_scripts(&self) -> usize {
		let dropped: Vec<_> = self.scripts.lock().drain(..).collect();
		dropped.len()
	}

	fn push(&self, event: SinkEvent) {
		self.events.lock().push(event);
	}
}

impl fmt::Debug for RecordingSink {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RecordingSink")
			.field("events", &self.events.lock().len())
			.field("scripts", &self.scripts.lock().len())
			.finish()
	}
}

impl TextStoreSink for RecordingSink {
	fn on_lock_granted(&self, store: &TextStore, flags: LockFlags) -> acpstore::Result<()> {
		self.push(SinkEvent::LockGranted(flags));
		let script = self.scripts.lock().pop_front();
		match script {
			Some(script) => script(store, flags),
			None => Ok(()),
		}
	}

	fn on_text_change(&self, change: TextChange) {
		self.push(SinkEvent::TextChange(change));
	}

	fn on_selection_change(&self) {
		self.push(SinkEvent::SelectionChange);
	}

	fn on_layout_change(&self, code: LayoutCode, view: ViewCookie) {
		self.push(SinkEvent::LayoutChange(code, view));
	}

	fn on_status_change(&self, flags: DynamicStatusFlags) {
		self.push(SinkEvent::StatusChange(flags));
	}

	fn on_attrs_change(&self, start: CharIdx, end: CharIdx, attrs: &[AttrId]) {
		self.push(SinkEvent::AttrsChange {
			start,
			end,
			attrs: attrs.to_vec(),
		});
	}
}
