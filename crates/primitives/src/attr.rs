//! Out-of-band text attribute identifiers and values.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies an out-of-band text attribute (a GUID on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttrId(pub Uuid);

impl AttrId {
	/// Input mode bias property.
	pub const MODE_BIAS: Self = Self(Uuid::from_u128(0x372e0716_974f_40ac_a088_08cdc92ebfbc));

	/// Display attribute property attached to composition text.
	pub const DISPLAY_ATTRIBUTE: Self = Self(Uuid::from_u128(0x34b45670_7526_11d2_a147_00105a2799b5));

	/// Wraps a raw GUID.
	pub const fn new(uuid: Uuid) -> Self {
		Self(uuid)
	}
}

impl std::fmt::Display for AttrId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{{{}}}", self.0)
	}
}

/// The "no bias" mode-bias value.
pub const MODE_BIAS_NONE: Uuid = Uuid::nil();

/// Compact integer handle for a GUID registered in an atom table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuidAtom(pub u32);

impl std::fmt::Display for GuidAtom {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "atom#{}", self.0)
	}
}

/// Variant-like attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum AttrValue {
	/// No value.
	#[default]
	Empty,
	/// A 32-bit integer.
	I4(i32),
	/// A registered GUID atom.
	Atom(GuidAtom),
	/// A boolean.
	Bool(bool),
	/// A string.
	Text(String),
}

impl AttrValue {
	/// True for [`AttrValue::Empty`].
	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	/// Returns the atom if this value carries one.
	pub fn as_atom(&self) -> Option<GuidAtom> {
		match self {
			Self::Atom(atom) => Some(*atom),
			_ => None,
		}
	}
}

/// One attribute value handed back by `retrieve_requested_attrs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrVal {
	/// Attribute identifier.
	pub attribute_id: AttrId,
	/// Overlap identifier; always zero for non-overlapping attributes.
	pub overlapped_id: u32,
	/// The value.
	pub value: AttrValue,
}
