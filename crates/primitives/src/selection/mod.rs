use serde::{Deserialize, Serialize};

use crate::range::{CharIdx, Direction, TextSelection};

#[cfg(test)]
mod tests;

/// Which end of a canonical selection carries the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveSelEnd {
	/// No active end (the selection has no caret).
	None,
	/// The caret is at `start`.
	Start,
	/// The caret is at `end`.
	#[default]
	End,
}

/// Style attached to a canonical selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SelectionStyle {
	/// Which side is the caret.
	pub active_end: ActiveSelEnd,
	/// Whether the selection covers a single interim character.
	#[serde(default)]
	pub interim_char: bool,
}

/// A selection in the canonical protocol form: `start <= end` plus an active-end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AcpSelection {
	/// Low offset (inclusive).
	pub start: CharIdx,
	/// High offset (exclusive).
	pub end: CharIdx,
	/// Caret placement.
	#[serde(default)]
	pub style: SelectionStyle,
}

impl AcpSelection {
	/// Creates a forward selection with the caret at `end`.
	///
	/// The bounds are reordered if given high-to-low.
	pub fn new(start: CharIdx, end: CharIdx) -> Self {
		Self::from(TextSelection::new(start, end).with_direction(Direction::Forward))
	}

	/// Creates a caret at `pos`.
	pub fn caret(pos: CharIdx) -> Self {
		Self::new(pos, pos)
	}

	/// Returns the same bounds with the given active end.
	pub fn with_active_end(mut self, active_end: ActiveSelEnd) -> Self {
		self.style.active_end = active_end;
		self
	}

	/// Returns the caret offset, if the selection has one.
	pub fn caret_offset(&self) -> Option<CharIdx> {
		match self.style.active_end {
			ActiveSelEnd::None => None,
			ActiveSelEnd::Start => Some(self.start),
			ActiveSelEnd::End => Some(self.end),
		}
	}
}

impl From<TextSelection> for AcpSelection {
	/// Canonicalizes a host pair: the bounds are ordered and the active end records the caret side.
	fn from(sel: TextSelection) -> Self {
		let (start, end) = sel.normalized();
		let active_end = match sel.direction() {
			Direction::Forward => ActiveSelEnd::End,
			Direction::Backward => ActiveSelEnd::Start,
		};
		Self {
			start,
			end,
			style: SelectionStyle {
				active_end,
				interim_char: false,
			},
		}
	}
}

impl From<AcpSelection> for TextSelection {
	fn from(sel: AcpSelection) -> Self {
		match sel.style.active_end {
			ActiveSelEnd::Start => TextSelection::new(sel.end, sel.start),
			ActiveSelEnd::End | ActiveSelEnd::None => TextSelection::new(sel.start, sel.end),
		}
	}
}

/// Which selection a `get_selection` request starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionIndex {
	/// The document's current (default) selection.
	#[default]
	Default,
	/// An explicit zero-based index into the selection list.
	At(usize),
}

impl SelectionIndex {
	/// Returns true for indices that address anything but the first selection.
	pub fn is_secondary(&self) -> bool {
		matches!(self, Self::At(n) if *n > 0)
	}

	/// Returns the zero-based index this request starts from.
	pub fn offset(&self) -> usize {
		match self {
			Self::Default => 0,
			Self::At(n) => *n,
		}
	}
}
