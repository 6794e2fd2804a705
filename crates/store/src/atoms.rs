//! Collaborators for attribute defaults and display-attribute enumeration.

use acpstore_primitives::{AttrValue, CharIdx, CharLen, DisplayAttribute, GuidAtom, Uuid};
use indexmap::IndexSet;
use parking_lot::Mutex;

/// Maps GUIDs to compact atoms and back.
pub trait GuidAtoms: Send + Sync {
	/// Returns the atom for `guid`, assigning one on first use. `None` when no atom is
	/// left to assign.
	fn register(&self, guid: Uuid) -> Option<GuidAtom>;

	/// Returns the GUID an atom was assigned to.
	fn resolve(&self, atom: GuidAtom) -> Option<Uuid>;
}

/// Maps a display-attribute GUID to its descriptor.
pub trait DisplayAttributeProvider: Send + Sync {
	/// Returns the descriptor registered for `guid`.
	fn display_attribute(&self, guid: Uuid) -> Option<DisplayAttribute>;
}

/// A run of characters carrying one property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyRun {
	/// First character of the run.
	pub start: CharIdx,
	/// Number of characters.
	pub len: CharLen,
	/// Property value over the run.
	pub value: AttrValue,
}

impl PropertyRun {
	/// Exclusive end of the run.
	pub fn end(&self) -> CharIdx {
		self.start + self.len
	}
}

/// Reports the display-attribute property of a character range.
pub trait PropertySource: Send + Sync {
	/// Returns the runs intersecting `[start, end)` in document order.
	fn attribute_runs(&self, start: CharIdx, end: CharIdx) -> Vec<PropertyRun>;
}

/// In-process [`GuidAtoms`] implementation.
///
/// Atoms are assigned densely starting at 1; atom 0 is never handed out.
#[derive(Debug)]
pub struct AtomTable {
	guids: Mutex<IndexSet<Uuid>>,
	max_atom: u32,
}

impl Default for AtomTable {
	fn default() -> Self {
		Self::with_max_atom(u32::MAX)
	}
}

impl AtomTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty table that assigns atoms up to `max_atom` inclusive.
	pub fn with_max_atom(max_atom: u32) -> Self {
		Self {
			guids: Mutex::default(),
			max_atom,
		}
	}

	/// Number of registered GUIDs.
	pub fn len(&self) -> usize {
		self.guids.lock().len()
	}

	/// True when nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.guids.lock().is_empty()
	}
}

impl GuidAtoms for AtomTable {
	fn register(&self, guid: Uuid) -> Option<GuidAtom> {
		let mut guids = self.guids.lock();
		let index = match guids.get_index_of(&guid) {
			Some(index) => index,
			None => guids.len(),
		};
		let atom = u32::try_from(index + 1)
			.ok()
			.filter(|atom| *atom <= self.max_atom)
			.map(GuidAtom)?;
		guids.insert(guid);
		Some(atom)
	}

	fn resolve(&self, atom: GuidAtom) -> Option<Uuid> {
		let index = (atom.0 as usize).checked_sub(1)?;
		self.guids.lock().get_index(index).copied()
	}
}
