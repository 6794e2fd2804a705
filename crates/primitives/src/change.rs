use serde::{Deserialize, Serialize};

use crate::range::{CharIdx, CharLen};

/// A half-open edit span before and after a mutation.
///
/// `[start, old_end)` was replaced by `[start, new_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextChange {
	/// First affected character.
	pub start: CharIdx,
	/// End of the replaced span in pre-change offsets.
	pub old_end: CharIdx,
	/// End of the replacement in post-change offsets.
	pub new_end: CharIdx,
}

impl TextChange {
	/// Creates a change record.
	pub const fn new(start: CharIdx, old_end: CharIdx, new_end: CharIdx) -> Self {
		Self { start, old_end, new_end }
	}

	/// A change covering the whole document, from `old_len` characters to `new_len`.
	pub const fn whole_document(old_len: CharLen, new_len: CharLen) -> Self {
		Self::new(0, old_len, new_len)
	}

	/// Number of characters removed.
	pub fn removed_len(&self) -> CharLen {
		self.old_end.saturating_sub(self.start)
	}

	/// Number of characters inserted.
	pub fn inserted_len(&self) -> CharLen {
		self.new_end.saturating_sub(self.start)
	}

	/// Net change in document length.
	pub fn delta(&self) -> isize {
		self.inserted_len() as isize - self.removed_len() as isize
	}

	/// True when nothing was removed or inserted.
	pub fn is_empty(&self) -> bool {
		self.start == self.old_end && self.start == self.new_end
	}
}

impl From<(CharIdx, CharIdx, CharIdx)> for TextChange {
	fn from((start, old_end, new_end): (CharIdx, CharIdx, CharIdx)) -> Self {
		Self::new(start, old_end, new_end)
	}
}
