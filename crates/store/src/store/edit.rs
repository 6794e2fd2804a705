//! Text and selection operations.
//!
//! Every gated operation checks the held lock before touching a hook or validating
//! arguments, so a caller without a lock always sees [`Error::NoLock`].

use acpstore_primitives::{
	AcpSelection, CharIdx, CharLen, InsertFlags, LockFlags, Point, Rect, RunInfo, RunKind,
	SelectionIndex, SetTextFlags, TextChange, TextSelection, ViewCookie,
};

use super::TextStore;
use crate::{Error, Result};


/// Result of a partial text read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRead {
	/// Characters copied.
	pub text: String,
	/// Run information for `text`; a single plain run.
	pub runs: Vec<RunInfo>,
	/// Offset to resume reading from.
	pub next_unread: CharIdx,
}

/// Result of [`TextStore::insert_text_at_selection`] for the last processed selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOutcome {
	/// Start of the resulting (or projected) selection.
	pub start: CharIdx,
	/// End of the resulting (or projected) selection.
	pub end: CharIdx,
	/// The edit span.
	pub change: TextChange,
}

/// Resolves an optional end against `len` and checks `start <= end <= len`.
fn resolve_range(start: CharIdx, end: Option<CharIdx>, len: CharLen) -> Result<CharIdx> {
	let end = end.unwrap_or(len);
	if start > end || end > len {
		return Err(Error::invalid_argument(format!(
			"range {start}..{end} outside document of length {len}"
		)));
	}
	Ok(end)
}

/// Cuts `text` to at most `max` characters.
fn truncate_chars(mut text: String, max: CharLen) -> String {
	if let Some((byte, _)) = text.char_indices().nth(max) {
		text.truncate(byte);
	}
	text
}

impl TextStore {
	/// Validates proposed insertion bounds. Requires no lock.
	///
	/// Placement is left to the host, so valid bounds are returned unchanged.
	pub fn query_insert(
		&self,
		start: CharIdx,
		end: CharIdx,
		insert_len: CharLen,
	) -> Result<(CharIdx, CharIdx)> {
		let len = self.hooks.string_length()?;
		let end = resolve_range(start, Some(end), len)?;
		tracing::trace!(start, end, insert_len, "query insert");
		Ok((start, end))
	}

	/// Returns up to `max` selections in canonical form. Requires a read lock.
	pub fn get_selection(&self, index: SelectionIndex, max: usize) -> Result<Vec<AcpSelection>> {
		self.require_lock(LockFlags::READ)?;
		if index.is_secondary() && !self.config.allow_multi_selection {
			return Err(Error::invalid_argument(format!(
				"selection index {} requires multi-selection",
				index.offset()
			)));
		}
		if max == 0 {
			return Ok(Vec::new());
		}
		let mut selections = self.hooks.selections(index, max)?;
		if selections.len() > max {
			tracing::warn!(
				returned = selections.len(),
				max,
				"host returned more selections than requested"
			);
			selections.truncate(max);
		}
		tracing::trace!(?index, count = selections.len(), "get selection");
		Ok(selections.into_iter().map(AcpSelection::from).collect())
	}

	/// Replaces the document's selections. Requires a read-write lock.
	pub fn set_selection(&self, selections: &[AcpSelection]) -> Result<()> {
		self.require_lock(LockFlags::READ_WRITE)?;
		if selections.is_empty() {
			return Err(Error::invalid_argument("at least one selection is required"));
		}
		if selections.len() > 1 && !self.config.allow_multi_selection {
			return Err(Error::invalid_argument(format!(
				"{} selections given but multi-selection is disabled",
				selections.len()
			)));
		}
		let host: Vec<TextSelection> = selections.iter().copied().map(TextSelection::from).collect();
		tracing::debug!(count = host.len(), first = ?host[0], "set selection");
		self.hooks.set_selections(&host)
	}

	/// Reads up to `max` characters from `start` to `end` (`None` = end of document).
	///
	/// Reads are partial: callers resume from [`TextRead::next_unread`] until it
	/// reaches the end they asked for. Requires a read lock.
	pub fn get_text(&self, start: CharIdx, end: Option<CharIdx>, max: CharLen) -> Result<TextRead> {
		self.require_lock(LockFlags::READ)?;
		let len = self.hooks.string_length()?;
		let end = resolve_range(start, end, len)?;
		let copy_len = max.min(end - start);

		let text = self.hooks.string(start, copy_len)?;
		let got = text.chars().count();
		if got < copy_len {
			tracing::error!(start, copy_len, got, "host returned a short string");
			return Err(Error::internal(format!(
				"host returned {got} characters for a {copy_len}-character read"
			)));
		}
		let text = truncate_chars(text, copy_len);

		tracing::trace!(start, end, copy_len, "get text");
		Ok(TextRead {
			text,
			runs: vec![RunInfo {
				len: copy_len,
				kind: RunKind::Plain,
			}],
			next_unread: start + copy_len,
		})
	}

	/// Replaces `[start, end)` with `text` by selecting the range and inserting over it.
	///
	/// Requires a read-write lock.
	pub fn set_text(
		&self,
		flags: SetTextFlags,
		start: CharIdx,
		end: CharIdx,
		text: &str,
	) -> Result<TextChange> {
		tracing::debug!(?flags, start, end, "set text");
		self.set_selection(&[AcpSelection::new(start, end)])?;
		let outcome = self.insert_text_at_selection(InsertFlags::NO_QUERY, text)?;
		Ok(outcome.change)
	}

	/// Inserts `text` over every active selection, or projects the result with
	/// [`InsertFlags::QUERY_ONLY`]. Requires a read-write lock.
	///
	/// The returned outcome describes the last selection processed.
	pub fn insert_text_at_selection(&self, flags: InsertFlags, text: &str) -> Result<InsertOutcome> {
		self.require_lock(LockFlags::READ_WRITE)?;
		if flags.contains(InsertFlags::NO_QUERY | InsertFlags::QUERY_ONLY) {
			return Err(Error::invalid_argument(
				"NO_QUERY and QUERY_ONLY are mutually exclusive",
			));
		}
		let query_only = flags.contains(InsertFlags::QUERY_ONLY);
		if !query_only && !self.hooks.has_insert_at_selection() {
			return Err(Error::NotImplemented("insert_at_selection"));
		}

		let count = self.hooks.selection_count();
		if count == 0 {
			tracing::error!("host reports zero selections");
			return Err(Error::internal("host reports zero selections"));
		}

		let insert_len = text.chars().count();
		let mut outcome = None;
		if query_only {
			let selections = self.hooks.selections(SelectionIndex::At(0), count)?;
			if selections.len() < count {
				tracing::error!(count, returned = selections.len(), "host returned too few selections");
				return Err(Error::internal(format!(
					"host reports {count} selections but returned {}",
					selections.len()
				)));
			}
			for sel in selections.into_iter().take(count) {
				let (low, high) = sel.normalized();
				let projected = InsertOutcome {
					start: low,
					end: high,
					change: TextChange::new(low, high, low + insert_len),
				};
				tracing::debug!(change = ?projected.change, "projected insert at selection");
				outcome = Some(projected);
			}
		} else {
			// Each insert shifts the selections after it, so re-read every one in turn.
			for index in 0..count {
				let (low, high) = self.current_selection(index, count)?.normalized();
				let placed = self
					.hooks
					.insert_at_selection(text, TextSelection::new(low, low + insert_len))?;
				let inserted = InsertOutcome {
					start: placed.start,
					end: placed.end,
					change: TextChange::new(low, high, placed.end),
				};
				tracing::debug!(index, change = ?inserted.change, "insert at selection");
				outcome = Some(inserted);
			}
		}
		outcome.ok_or_else(|| Error::internal("no selection processed"))
	}

	/// Selection `index` as the host reports it now.
	fn current_selection(&self, index: usize, count: usize) -> Result<TextSelection> {
		let sel = self.hooks.selections(SelectionIndex::At(index), 1)?.first().copied();
		sel.ok_or_else(|| {
			tracing::error!(index, count, "host returned too few selections");
			Error::internal(format!("host reports {count} selections but has none at {index}"))
		})
	}

	/// Document length. Requires a read lock.
	pub fn get_end_acp(&self) -> Result<CharIdx> {
		self.require_lock(LockFlags::READ)?;
		self.hooks.string_length()
	}

	/// Bounding rectangle of `[start, end)` (`None` = end of document) and whether it
	/// was clipped. Requires a read lock.
	pub fn get_text_extent(
		&self,
		view: ViewCookie,
		start: CharIdx,
		end: Option<CharIdx>,
	) -> Result<(Rect, bool)> {
		self.require_lock(LockFlags::READ)?;
		let len = self.hooks.string_length()?;
		let end = resolve_range(start, end, len)?;
		let (top_left, bottom_right) = self.hooks.string_extent(start, end)?;
		let rect = Rect::from_corners(top_left, bottom_right);
		tracing::trace!(%view, start, end, ?rect, "text extent");
		Ok((rect, false))
	}

	/// Bounding rectangle of the view. Requires a read lock.
	pub fn get_screen_extent(&self, view: ViewCookie) -> Result<Rect> {
		self.require_lock(LockFlags::READ)?;
		let (top_left, bottom_right) = self.hooks.screen_extent()?;
		let rect = Rect::from_corners(top_left, bottom_right);
		tracing::trace!(%view, ?rect, "screen extent");
		Ok(rect)
	}

	/// Unsupported.
	pub fn get_acp_from_point(&self, _view: ViewCookie, _point: Point) -> Result<CharIdx> {
		Err(Error::NotImplemented("get_acp_from_point"))
	}

	/// Unsupported.
	pub fn get_formatted_text(&self, _start: CharIdx, _end: CharIdx) -> Result<String> {
		Err(Error::NotImplemented("get_formatted_text"))
	}

	/// Unsupported; the document holds no embedded objects.
	pub fn get_embedded(&self, _position: CharIdx) -> Result<()> {
		Err(Error::NotImplemented("get_embedded"))
	}

	/// Unsupported.
	pub fn query_insert_embedded(&self) -> Result<bool> {
		Err(Error::NotImplemented("query_insert_embedded"))
	}

	/// Unsupported.
	pub fn insert_embedded(&self, _start: CharIdx, _end: CharIdx) -> Result<TextChange> {
		Err(Error::NotImplemented("insert_embedded"))
	}

	/// Unsupported.
	pub fn insert_embedded_at_selection(&self) -> Result<InsertOutcome> {
		Err(Error::NotImplemented("insert_embedded_at_selection"))
	}
}
