use std::sync::Arc;

use acpstore_primitives::{CharIdx, DisplayAttributeSpan};

use super::TextStore;
use crate::atoms::{DisplayAttributeProvider, GuidAtoms, PropertyRun};

/// Display-attribute spans over a range, resolved one run at a time.
///
/// Runs without an atom value, with an atom the table does not know, or with a GUID
/// the provider has no descriptor for are skipped. Spans are clipped to the
/// requested range.
pub struct DisplayAttributes {
	runs: std::vec::IntoIter<PropertyRun>,
	bounds: (CharIdx, CharIdx),
	resolver: Option<(Arc<dyn GuidAtoms>, Arc<dyn DisplayAttributeProvider>)>,
}

impl DisplayAttributes {
	fn empty() -> Self {
		Self {
			runs: Vec::new().into_iter(),
			bounds: (0, 0),
			resolver: None,
		}
	}
}

impl Iterator for DisplayAttributes {
	type Item = DisplayAttributeSpan;

	fn next(&mut self) -> Option<Self::Item> {
		let (atoms, provider) = self.resolver.as_ref()?;
		let (lo, hi) = self.bounds;
		for run in self.runs.by_ref() {
			let start = run.start.max(lo);
			let end = run.end().min(hi);
			if start >= end {
				continue;
			}
			let Some(atom) = run.value.as_atom() else {
				continue;
			};
			let Some(guid) = atoms.resolve(atom) else {
				tracing::trace!(%atom, "unresolved display attribute atom");
				continue;
			};
			let Some(attribute) = provider.display_attribute(guid) else {
				tracing::trace!(%guid, "no display attribute registered");
				continue;
			};
			return Some(DisplayAttributeSpan {
				start,
				end,
				attribute,
			});
		}
		None
	}
}

impl std::fmt::Debug for DisplayAttributes {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DisplayAttributes")
			.field("bounds", &self.bounds)
			.field("remaining_runs", &self.runs.len())
			.finish()
	}
}

impl TextStore {
	/// Enumerates display-attribute spans within `[start, end)`.
	///
	/// Empty when no property source was advised with the sink or no display-attribute
	/// provider was supplied at construction.
	pub fn enumerate_attributes(&self, start: CharIdx, end: CharIdx) -> DisplayAttributes {
		let services = self.sink_registration().and_then(|reg| reg.services);
		let (Some(services), Some(provider)) = (services, self.display_attributes.clone()) else {
			tracing::trace!(start, end, "display attributes unavailable");
			return DisplayAttributes::empty();
		};
		if start >= end {
			return DisplayAttributes::empty();
		}
		let runs = services.attribute_runs(start, end);
		tracing::debug!(start, end, runs = runs.len(), "enumerate display attributes");
		DisplayAttributes {
			runs: runs.into_iter(),
			bounds: (start, end),
			resolver: Some((self.atoms.clone(), provider)),
		}
	}
}
