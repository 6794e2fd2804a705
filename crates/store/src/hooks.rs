//! Host-supplied document accessors.
//!
//! Every hook is optional. Calling an operation whose hook is missing yields
//! [`Error::NotImplemented`] naming the hook, except where a default is documented.

use std::fmt;

use acpstore_primitives::{CharIdx, CharLen, Point, SelectionIndex, TextSelection};

use crate::{Error, Result};

type Hook<F> = Option<Box<F>>;

type FlagFn = dyn Fn() -> bool + Send + Sync;
type LenFn = dyn Fn() -> usize + Send + Sync;
type StringFn = dyn Fn(CharIdx, CharLen) -> String + Send + Sync;
type SelectionsFn = dyn Fn(SelectionIndex, usize) -> Vec<TextSelection> + Send + Sync;
type SetSelectionsFn = dyn Fn(&[TextSelection]) + Send + Sync;
type InsertFn = dyn Fn(&str, TextSelection) -> Option<TextSelection> + Send + Sync;
type ScreenExtentFn = dyn Fn() -> (Point, Point) + Send + Sync;
type StringExtentFn = dyn Fn(CharIdx, CharIdx) -> (Point, Point) + Send + Sync;
type RangeFn = dyn Fn(CharIdx, CharIdx) + Send + Sync;
type UnitFn = dyn Fn() + Send + Sync;

/// Callbacks into the document owner.
///
/// Built once and handed to [`crate::TextStore::new`]:
///
/// ```
/// use acpstore::HostHooks;
///
/// let hooks = HostHooks::new()
/// 	.with_string_length(|| 5)
/// 	.with_string(|start, len| "hello".chars().skip(start).take(len).collect());
/// assert!(hooks.has_text_access());
/// ```
#[derive(Default)]
pub struct HostHooks {
	is_read_only: Hook<FlagFn>,
	is_loading: Hook<FlagFn>,
	string_length: Hook<LenFn>,
	string: Hook<StringFn>,
	selection_count: Hook<LenFn>,
	selections: Hook<SelectionsFn>,
	set_selections: Hook<SetSelectionsFn>,
	insert_at_selection: Hook<InsertFn>,
	screen_extent: Hook<ScreenExtentFn>,
	string_extent: Hook<StringExtentFn>,
	composition_started: Hook<FlagFn>,
	composition_updated: Hook<RangeFn>,
	composition_ended: Hook<UnitFn>,
}

impl HostHooks {
	/// Creates an empty hook set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Reports whether the document rejects edits.
	pub fn with_read_only(mut self, f: impl Fn() -> bool + Send + Sync + 'static) -> Self {
		self.is_read_only = Some(Box::new(f));
		self
	}

	/// Reports whether the document is still loading.
	pub fn with_loading(mut self, f: impl Fn() -> bool + Send + Sync + 'static) -> Self {
		self.is_loading = Some(Box::new(f));
		self
	}

	/// Reports the document length in characters.
	pub fn with_string_length(mut self, f: impl Fn() -> usize + Send + Sync + 'static) -> Self {
		self.string_length = Some(Box::new(f));
		self
	}

	/// Returns `len` characters starting at `start`.
	pub fn with_string(
		mut self,
		f: impl Fn(CharIdx, CharLen) -> String + Send + Sync + 'static,
	) -> Self {
		self.string = Some(Box::new(f));
		self
	}

	/// Reports how many selections exist. Defaults to one when unset.
	pub fn with_selection_count(mut self, f: impl Fn() -> usize + Send + Sync + 'static) -> Self {
		self.selection_count = Some(Box::new(f));
		self
	}

	/// Returns up to `max` selections starting at the given index.
	pub fn with_selections(
		mut self,
		f: impl Fn(SelectionIndex, usize) -> Vec<TextSelection> + Send + Sync + 'static,
	) -> Self {
		self.selections = Some(Box::new(f));
		self
	}

	/// Replaces the document's selections.
	pub fn with_set_selections(
		mut self,
		f: impl Fn(&[TextSelection]) + Send + Sync + 'static,
	) -> Self {
		self.set_selections = Some(Box::new(f));
		self
	}

	/// Inserts text over the proposed bounds and returns the resulting selection, or
	/// `None` when the proposal matches no selection.
	pub fn with_insert_at_selection(
		mut self,
		f: impl Fn(&str, TextSelection) -> Option<TextSelection> + Send + Sync + 'static,
	) -> Self {
		self.insert_at_selection = Some(Box::new(f));
		self
	}

	/// Returns the top-left and bottom-right corners of the view.
	pub fn with_screen_extent(
		mut self,
		f: impl Fn() -> (Point, Point) + Send + Sync + 'static,
	) -> Self {
		self.screen_extent = Some(Box::new(f));
		self
	}

	/// Returns the corners bounding the characters `[start, end)`.
	pub fn with_string_extent(
		mut self,
		f: impl Fn(CharIdx, CharIdx) -> (Point, Point) + Send + Sync + 'static,
	) -> Self {
		self.string_extent = Some(Box::new(f));
		self
	}

	/// Asks the host whether a composition may start. Defaults to allowing it.
	pub fn with_composition_started(
		mut self,
		f: impl Fn() -> bool + Send + Sync + 'static,
	) -> Self {
		self.composition_started = Some(Box::new(f));
		self
	}

	/// Receives the new composition range.
	pub fn with_composition_updated(
		mut self,
		f: impl Fn(CharIdx, CharIdx) + Send + Sync + 'static,
	) -> Self {
		self.composition_updated = Some(Box::new(f));
		self
	}

	/// Receives the end of a composition.
	pub fn with_composition_ended(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
		self.composition_ended = Some(Box::new(f));
		self
	}

	/// True when both the length and string hooks are installed.
	pub fn has_text_access(&self) -> bool {
		self.string_length.is_some() && self.string.is_some()
	}

	pub(crate) fn is_read_only(&self) -> Option<bool> {
		self.is_read_only.as_ref().map(|f| f())
	}

	pub(crate) fn is_loading(&self) -> Option<bool> {
		self.is_loading.as_ref().map(|f| f())
	}

	pub(crate) fn string_length(&self) -> Result<usize> {
		let f = self
			.string_length
			.as_ref()
			.ok_or(Error::NotImplemented("string_length"))?;
		Ok(f())
	}

	pub(crate) fn string(&self, start: CharIdx, len: CharLen) -> Result<String> {
		let f = self.string.as_ref().ok_or(Error::NotImplemented("string"))?;
		Ok(f(start, len))
	}

	pub(crate) fn selection_count(&self) -> usize {
		self.selection_count.as_ref().map_or(1, |f| f())
	}

	pub(crate) fn selections(&self, index: SelectionIndex, max: usize) -> Result<Vec<TextSelection>> {
		let f = self
			.selections
			.as_ref()
			.ok_or(Error::NotImplemented("selections"))?;
		Ok(f(index, max))
	}

	pub(crate) fn set_selections(&self, selections: &[TextSelection]) -> Result<()> {
		let f = self
			.set_selections
			.as_ref()
			.ok_or(Error::NotImplemented("set_selections"))?;
		f(selections);
		Ok(())
	}

	pub(crate) fn insert_at_selection(&self, text: &str, proposed: TextSelection) -> Result<TextSelection> {
		let f = self
			.insert_at_selection
			.as_ref()
			.ok_or(Error::NotImplemented("insert_at_selection"))?;
		f(text, proposed).ok_or_else(|| {
			Error::internal(format!("host refused insertion at {}", proposed.start))
		})
	}

	pub(crate) fn has_insert_at_selection(&self) -> bool {
		self.insert_at_selection.is_some()
	}

	pub(crate) fn screen_extent(&self) -> Result<(Point, Point)> {
		let f = self
			.screen_extent
			.as_ref()
			.ok_or(Error::NotImplemented("screen_extent"))?;
		Ok(f())
	}

	pub(crate) fn string_extent(&self, start: CharIdx, end: CharIdx) -> Result<(Point, Point)> {
		let f = self
			.string_extent
			.as_ref()
			.ok_or(Error::NotImplemented("string_extent"))?;
		Ok(f(start, end))
	}

	pub(crate) fn composition_started(&self) -> bool {
		self.composition_started.as_ref().is_none_or(|f| f())
	}

	pub(crate) fn composition_updated(&self, start: CharIdx, end: CharIdx) {
		if let Some(f) = &self.composition_updated {
			f(start, end);
		}
	}

	pub(crate) fn composition_ended(&self) {
		if let Some(f) = &self.composition_ended {
			f();
		}
	}
}

impl fmt::Debug for HostHooks {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("HostHooks")
			.field("is_read_only", &self.is_read_only.is_some())
			.field("is_loading", &self.is_loading.is_some())
			.field("string_length", &self.string_length.is_some())
			.field("string", &self.string.is_some())
			.field("selection_count", &self.selection_count.is_some())
			.field("selections", &self.selections.is_some())
			.field("set_selections", &self.set_selections.is_some())
			.field("insert_at_selection", &self.insert_at_selection.is_some())
			.field("screen_extent", &self.screen_extent.is_some())
			.field("string_extent", &self.string_extent.is_some())
			.field("composition_started", &self.composition_started.is_some())
			.field("composition_updated", &self.composition_updated.is_some())
			.field("composition_ended", &self.composition_ended.is_some())
			.finish()
	}
}
