use serde::{Deserialize, Serialize};

/// A position in the document, measured in characters from the start of the flat text buffer.
///
/// This is the canonical (ACP-style) coordinate space for the store.
pub type CharIdx = usize;

/// A length or count in the text, measured in characters.
///
/// Distinct from [`CharIdx`] to avoid passing an index where a length is expected.
pub type CharLen = usize;

/// Selection direction, derived from the order of the two ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	/// `end >= start`: the caret sits at `end`.
	Forward,
	/// `end < start`: the caret sits at the lower offset.
	Backward,
}

/// A host-reported selection as an ordered `(start, end)` pair.
///
/// Unlike [`crate::AcpSelection`], `start` may exceed `end`; the order encodes which side
/// the caret is on. Hosts exchange selections with the store in this form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextSelection {
	/// The anchored end.
	pub start: CharIdx,
	/// The caret end.
	pub end: CharIdx,
}

impl TextSelection {
	/// Creates a selection from `start` to `end`.
	pub const fn new(start: CharIdx, end: CharIdx) -> Self {
		Self { start, end }
	}

	/// Creates a zero-width selection (caret) at the given position.
	pub const fn point(pos: CharIdx) -> Self {
		Self::new(pos, pos)
	}

	/// Returns the smaller of the two ends.
	#[inline]
	pub fn min(&self) -> CharIdx {
		std::cmp::min(self.start, self.end)
	}

	/// Returns the larger of the two ends.
	#[inline]
	pub fn max(&self) -> CharIdx {
		std::cmp::max(self.start, self.end)
	}

	/// Returns `(low, high)`.
	#[inline]
	pub fn normalized(&self) -> (CharIdx, CharIdx) {
		(self.min(), self.max())
	}

	/// Returns the number of selected characters.
	#[inline]
	pub fn len(&self) -> CharLen {
		self.max() - self.min()
	}

	/// Returns true if both ends coincide.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// Returns the direction of this selection.
	#[inline]
	pub fn direction(&self) -> Direction {
		if self.end < self.start {
			Direction::Backward
		} else {
			Direction::Forward
		}
	}

	/// Returns the caret position.
	#[inline]
	pub fn caret(&self) -> CharIdx {
		self.end
	}

	/// Returns a selection with both ends swapped.
	pub fn flip(&self) -> Self {
		Self {
			start: self.end,
			end: self.start,
		}
	}

	/// Returns a selection with the specified direction, flipping if needed.
	pub fn with_direction(self, direction: Direction) -> Self {
		if self.direction() == direction {
			self
		} else {
			self.flip()
		}
	}

	/// Returns true if `[min, max]` lies within `[0, len]`.
	pub fn fits(&self, len: CharLen) -> bool {
		self.max() <= len
	}
}

impl From<(CharIdx, CharIdx)> for TextSelection {
	fn from((start, end): (CharIdx, CharIdx)) -> Self {
		Self::new(start, end)
	}
}
