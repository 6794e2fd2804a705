use std::ops::Range;

use acpstore_primitives::CharIdx;

use super::TextStore;

impl TextStore {
	/// A composition is about to start; returns whether the host allows it.
	///
	/// Allowed when the host installed no handler.
	pub fn on_start_composition(&self) -> bool {
		let allow = self.hooks.composition_started();
		tracing::debug!(allow, "composition start");
		allow
	}

	/// The composition now covers `range`. A composition without a range is ignored.
	pub fn on_update_composition(&self, range: Option<Range<CharIdx>>) {
		let Some(range) = range else {
			tracing::trace!("composition update without range");
			return;
		};
		tracing::debug!(start = range.start, end = range.end, "composition update");
		self.hooks.composition_updated(range.start, range.end);
	}

	/// The composition ended.
	pub fn on_end_composition(&self) {
		tracing::debug!("composition end");
		self.hooks.composition_ended();
	}
}
