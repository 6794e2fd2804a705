use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use acpstore::HostHooks;
use acpstore_primitives::{CharIdx, CharLen, Point, Rect, SelectionIndex, TextChange, TextSelection};
use parking_lot::Mutex;
use ropey::Rope;


/// Width of one character cell in the synthetic layout.
pub const CELL_WIDTH: i32 = 8;
/// Height of one line in the synthetic layout.
pub const LINE_HEIGHT: i32 = 16;

/// A plain-text document with a monospace layout.
///
/// Selections are host pairs; the first is the primary selection. Offsets handed in by
/// callers are clamped to the document.
#[derive(Debug)]
pub struct MemoryDocument {
	text: Mutex<Rope>,
	selections: Mutex<Vec<TextSelection>>,
	composition: Mutex<Option<Range<CharIdx>>>,
	viewport: Rect,
	read_only: AtomicBool,
	loading: AtomicBool,
	allow_composition: AtomicBool,
}

impl MemoryDocument {
	/// A document holding `text` with the caret at the end.
	pub fn new(text: &str) -> Arc<Self> {
		let rope = Rope::from_str(text);
		let end = rope.len_chars();
		Arc::new(Self {
			text: Mutex::new(rope),
			selections: Mutex::new(vec![TextSelection::point(end)]),
			composition: Mutex::new(None),
			viewport: Rect::new(0, 0, 800, 600),
			read_only: AtomicBool::new(false),
			loading: AtomicBool::new(false),
			allow_composition: AtomicBool::new(true),
		})
	}

	/// The full text.
	pub fn text(&self) -> String {
		self.text.lock().to_string()
	}

	/// Length in characters.
	pub fn len_chars(&self) -> CharLen {
		self.text.lock().len_chars()
	}

	/// The primary selection.
	pub fn selection(&self) -> TextSelection {
		self.selections
			.lock()
			.first()
			.copied()
			.unwrap_or_default()
	}

	/// All selections in order.
	pub fn selections(&self) -> Vec<TextSelection> {
		self.selections.lock().clone()
	}

	/// Replaces the selections from the host side. Ends are clamped to the document.
	pub fn select(&self, selections: &[TextSelection]) {
		let len = self.len_chars();
		let clamped: Vec<_> = selections
			.iter()
			.map(|sel| TextSelection::new(sel.start.min(len), sel.end.min(len)))
			.collect();
		if clamped.is_empty() {
			return;
		}
		*self.selections.lock() = clamped;
	}

	/// Marks the document read-only.
	pub fn set_read_only(&self, read_only: bool) {
		self.read_only.store(read_only, Ordering::Relaxed);
	}

	/// Marks the document as loading.
	pub fn set_loading(&self, loading: bool) {
		self.loading.store(loading, Ordering::Relaxed);
	}

	/// Whether the host accepts new compositions.
	pub fn set_allow_composition(&self, allow: bool) {
		self.allow_composition.store(allow, Ordering::Relaxed);
	}

	/// The active composition range.
	pub fn composition(&self) -> Option<Range<CharIdx>> {
		self.composition.lock().clone()
	}

	/// Replaces `range` with `text` from the host side and returns the change.
	///
	/// Selections after the edit shift with it; selections touching it collapse to the
	/// end of the inserted text.
	pub fn edit(&self, range: Range<CharIdx>, text: &str) -> TextChange {
		let mut rope = self.text.lock();
		let len = rope.len_chars();
		let start = range.start.min(len);
		let end = range.end.clamp(start, len);
		rope.remove(start..end);
		rope.insert(start, text);
		let new_end = start + text.chars().count();
		drop(rope);

		let change = TextChange::new(start, end, new_end);
		let mut selections = self.selections.lock();
		for sel in selections.iter_mut() {
			*sel = shift_selection(*sel, change);
		}
		tracing::trace!(?change, "memory document edited");
		change
	}

	/// Replaces the whole text and puts the caret at the end.
	pub fn replace_all(&self, text: &str) -> TextChange {
		let old_len = self.len_chars();
		let change = self.edit(0..old_len, text);
		*self.selections.lock() = vec![TextSelection::point(change.new_end)];
		change
	}

	/// Bounding corners of `[start, end)` in the monospace layout.
	pub fn extent(&self, start: CharIdx, end: CharIdx) -> (Point, Point) {
		let rope = self.text.lock();
		let len = rope.len_chars();
		let (start, end) = (start.min(len), end.min(len));
		let (start_line, start_col) = line_col(&rope, start);
		let (end_line, end_col) = line_col(&rope, end);
		let right = if end_line == start_line {
			end_col.max(start_col)
		} else {
			(start_line..=end_line)
				.map(|line| rope.line(line).len_chars())
				.max()
				.unwrap_or(0)
		};
		let left = if end_line == start_line { start_col } else { 0 };
		(
			Point::new(left as i32 * CELL_WIDTH, start_line as i32 * LINE_HEIGHT),
			Point::new(right as i32 * CELL_WIDTH, (end_line as i32 + 1) * LINE_HEIGHT),
		)
	}

	/// Host hooks backed by this document.
	pub fn hooks(self: &Arc<Self>) -> HostHooks {
		let doc = self.clone();
		let read_only = move || doc.read_only.load(Ordering::Relaxed);
		let doc = self.clone();
		let loading = move || doc.loading.load(Ordering::Relaxed);
		let doc = self.clone();
		let length = move || doc.len_chars();
		let doc = self.clone();
		let string = move |start: CharIdx, len: CharLen| doc.slice(start, len);
		let doc = self.clone();
		let count = move || doc.selections.lock().len();
		let doc = self.clone();
		let selections = move |index: SelectionIndex, max: usize| -> Vec<TextSelection> {
			doc.selections
				.lock()
				.iter()
				.skip(index.offset())
				.take(max)
				.copied()
				.collect()
		};
		let doc = self.clone();
		let set_selections = move |sels: &[TextSelection]| doc.select(sels);
		let doc = self.clone();
		let insert = move |text: &str, proposed: TextSelection| doc.insert_at(text, proposed);
		let doc = self.clone();
		let screen = move || {
			(
				Point::new(doc.viewport.left, doc.viewport.top),
				Point::new(doc.viewport.right, doc.viewport.bottom),
			)
		};
		let doc = self.clone();
		let string_extent = move |start: CharIdx, end: CharIdx| doc.extent(start, end);
		let doc = self.clone();
		let started = move || doc.allow_composition.load(Ordering::Relaxed);
		let doc = self.clone();
		let updated = move |start: CharIdx, end: CharIdx| *doc.composition.lock() = Some(start..end);
		let doc = self.clone();
		let ended = move || *doc.composition.lock() = None;

		HostHooks::new()
			.with_read_only(read_only)
			.with_loading(loading)
			.with_string_length(length)
			.with_string(string)
			.with_selection_count(count)
			.with_selections(selections)
			.with_set_selections(set_selections)
			.with_insert_at_selection(insert)
			.with_screen_extent(screen)
			.with_string_extent(string_extent)
			.with_composition_started(started)
			.with_composition_updated(updated)
			.with_composition_ended(ended)
	}

	fn slice(&self, start: CharIdx, len: CharLen) -> String {
		let rope = self.text.lock();
		let total = rope.len_chars();
		let start = start.min(total);
		let end = start.saturating_add(len).min(total);
		rope.slice(start..end).to_string()
	}

	/// Replaces the selection starting at `proposed.start` with `text` and returns the
	/// caret after it. Returns `None` when no selection starts there.
	fn insert_at(&self, text: &str, proposed: TextSelection) -> Option<TextSelection> {
		let (target, low, high) = {
			let selections = self.selections.lock();
			let target = selections
				.iter()
				.position(|sel| sel.min() == proposed.start);
			let Some(target) = target else {
				tracing::warn!(
					proposed = ?proposed,
					count = selections.len(),
					"insertion matches no selection"
				);
				return None;
			};
			let (low, high) = selections[target].normalized();
			(target, low, high)
		};
		let change = self.edit(low..high, text);
		let caret = TextSelection::point(change.new_end);
		if let Some(sel) = self.selections.lock().get_mut(target) {
			*sel = caret;
		}
		Some(caret)
	}
}

/// Maps a selection across `change`.
fn shift_selection(sel: TextSelection, change: TextChange) -> TextSelection {
	let map = |pos: CharIdx| {
		if pos < change.start {
			pos
		} else if pos >= change.old_end && pos > change.start {
			(pos as isize + change.delta()) as CharIdx
		} else {
			change.new_end
		}
	};
	TextSelection::new(map(sel.start), map(sel.end))
}

fn line_col(rope: &Rope, pos: CharIdx) -> (usize, usize) {
	let line = rope.char_to_line(pos);
	(line, pos - rope.line_to_char(line))
}
