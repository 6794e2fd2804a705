//! Out-of-band attribute negotiation.
//!
//! The engine marks attributes with one of the request calls and then drains them
//! with [`TextStore::retrieve_requested_attrs`]. Each request is answered once.

use acpstore_primitives::{AttrId, AttrRequestFlags, AttrVal, AttrValue, CharIdx};
use indexmap::IndexMap;

use super::TextStore;
use crate::atoms::GuidAtoms;
use crate::config::AttributeConfig;
use crate::{Error, Result};


bitflags::bitflags! {
	/// Negotiation state of one attribute.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct AttrRecordFlags: u8 {
		/// The current value is reset to the default once retrieved.
		const DEFAULT_REQUESTED = 1 << 0;
		/// The attribute is reported by the next retrieval.
		const REQUESTED = 1 << 1;
	}
}

/// One supported attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRecord {
	/// Attribute identifier.
	pub id: AttrId,
	/// Negotiation state.
	pub flags: AttrRecordFlags,
	/// Value reported on retrieval.
	pub current: AttrValue,
	/// Value restored by requests and retrievals.
	pub default: AttrValue,
}

/// Supported attributes keyed by id, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeTable {
	records: IndexMap<AttrId, AttributeRecord>,
}

impl AttributeTable {
	/// Builds the table, registering GUID defaults in `atoms`.
	///
	/// A repeated id keeps its first position and takes the later default.
	pub fn from_config(attributes: &[AttributeConfig], atoms: &dyn GuidAtoms) -> Self {
		let mut records = IndexMap::with_capacity(attributes.len());
		for attr in attributes {
			let default = match attr.default_guid {
				Some(guid) => match atoms.register(guid) {
					Some(atom) => AttrValue::Atom(atom),
					None => {
						tracing::warn!(id = ?attr.id, %guid, "no atom left for attribute default");
						AttrValue::Empty
					}
				},
				None => attr.default.clone(),
			};
			records.insert(
				attr.id,
				AttributeRecord {
					id: attr.id,
					flags: AttrRecordFlags::empty(),
					current: default.clone(),
					default,
				},
			);
		}
		Self { records }
	}

	/// Number of supported attributes.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// True when no attribute is supported.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// The record for `id`.
	pub fn get(&self, id: AttrId) -> Option<&AttributeRecord> {
		self.records.get(&id)
	}

	/// Records in table order.
	pub fn iter(&self) -> impl Iterator<Item = &AttributeRecord> {
		self.records.values()
	}

	pub(crate) fn set_current(&mut self, id: AttrId, value: AttrValue) -> bool {
		match self.records.get_mut(&id) {
			Some(record) => {
				record.current = value;
				true
			}
			None => false,
		}
	}

	/// Marks every supported attribute in `filter` as requested. Unknown ids are ignored.
	///
	/// With `FIND_WANT_VALUE` the current value is kept for the retrieval and reset
	/// afterwards; otherwise it is reset now.
	pub(crate) fn request(&mut self, filter: &[AttrId], flags: AttrRequestFlags) -> usize {
		let mut marked = 0;
		for id in filter {
			let Some(record) = self.records.get_mut(id) else {
				continue;
			};
			record.flags = AttrRecordFlags::REQUESTED;
			if flags.contains(AttrRequestFlags::FIND_WANT_VALUE) {
				record.flags |= AttrRecordFlags::DEFAULT_REQUESTED;
			} else {
				record.current = record.default.clone();
			}
			marked += 1;
		}
		marked
	}

	/// Drains up to `max` requested records in table order.
	pub(crate) fn retrieve(&mut self, max: usize) -> Vec<AttrVal> {
		let mut out = Vec::new();
		for record in self.records.values_mut() {
			if out.len() >= max {
				break;
			}
			if !record.flags.contains(AttrRecordFlags::REQUESTED) {
				continue;
			}
			out.push(AttrVal {
				attribute_id: record.id,
				overlapped_id: 0,
				value: record.current.clone(),
			});
			if record.flags.contains(AttrRecordFlags::DEFAULT_REQUESTED) {
				record.current = record.default.clone();
			}
			record.flags = AttrRecordFlags::empty();
		}
		out
	}
}

impl TextStore {
	/// Marks the supported attributes in `filter` for the next retrieval.
	pub fn request_supported_attrs(&self, flags: AttrRequestFlags, filter: &[AttrId]) {
		let marked = self.state.lock().attributes.request(filter, flags);
		tracing::debug!(?flags, requested = filter.len(), marked, "request supported attrs");
	}

	/// Marks the attributes in `filter` at `position` for the next retrieval.
	///
	/// Values are not position dependent, so this behaves like
	/// [`Self::request_supported_attrs`].
	pub fn request_attrs_at_position(
		&self,
		position: CharIdx,
		filter: &[AttrId],
		flags: AttrRequestFlags,
	) {
		let marked = self.state.lock().attributes.request(filter, flags);
		tracing::debug!(position, ?flags, requested = filter.len(), marked, "request attrs at position");
	}

	/// Accepted and ignored; no attribute transitions are tracked.
	pub fn request_attrs_transitioning_at_position(
		&self,
		position: CharIdx,
		filter: &[AttrId],
		flags: AttrRequestFlags,
	) {
		tracing::trace!(position, ?flags, requested = filter.len(), "transition request ignored");
	}

	/// Unsupported.
	pub fn find_next_attr_transition(
		&self,
		_start: CharIdx,
		_halt: CharIdx,
		_filter: &[AttrId],
		_flags: AttrRequestFlags,
	) -> Result<Option<CharIdx>> {
		Err(Error::NotImplemented("find_next_attr_transition"))
	}

	/// Returns up to `max` requested attribute values and clears their requests.
	pub fn retrieve_requested_attrs(&self, max: usize) -> Vec<AttrVal> {
		let values = self.state.lock().attributes.retrieve(max);
		tracing::debug!(max, fetched = values.len(), "retrieve requested attrs");
		values
	}
}
