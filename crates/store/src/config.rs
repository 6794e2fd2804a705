//! Session configuration.

use acpstore_primitives::{AttrId, AttrValue, MODE_BIAS_NONE, Uuid};
use serde::Deserialize;


/// Static configuration of a [`crate::TextStore`].
///
/// Host callbacks are not configuration; they are supplied through [`crate::HostHooks`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
	/// Whether the document supports more than one selection.
	pub allow_multi_selection: bool,
	/// Out-of-band attributes the store can report, in table order.
	pub attributes: Vec<AttributeConfig>,
	/// Cookie returned by `active_view`.
	pub active_view: u32,
}

impl Default for StoreConfig {
	fn default() -> Self {
		Self {
			allow_multi_selection: false,
			attributes: vec![AttributeConfig::mode_bias()],
			active_view: 1,
		}
	}
}

impl StoreConfig {
	/// Creates the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a configuration from TOML. Missing keys take their defaults.
	pub fn from_toml_str(source: &str) -> crate::Result<Self> {
		Ok(toml::from_str(source)?)
	}

	/// Enables or disables disjoint selections.
	pub fn allow_multi_selection(mut self, allow: bool) -> Self {
		self.allow_multi_selection = allow;
		self
	}

	/// Replaces the supported attribute set.
	pub fn attributes(mut self, attributes: impl IntoIterator<Item = AttributeConfig>) -> Self {
		self.attributes = attributes.into_iter().collect();
		self
	}

	/// Sets the view cookie reported by `active_view`.
	pub fn active_view(mut self, view: u32) -> Self {
		self.active_view = view;
		self
	}
}

/// One supported out-of-band attribute.
///
/// When `default_guid` is set the default value is the atom the store's atom table
/// assigns to that GUID, and `default` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeConfig {
	/// Attribute identifier.
	pub id: AttrId,
	/// Literal default value.
	#[serde(default)]
	pub default: AttrValue,
	/// GUID whose atom becomes the default value.
	#[serde(default)]
	pub default_guid: Option<Uuid>,
}

impl AttributeConfig {
	/// An attribute with a literal default value.
	pub fn new(id: AttrId, default: AttrValue) -> Self {
		Self {
			id,
			default,
			default_guid: None,
		}
	}

	/// An attribute whose default is the atom of `guid`.
	pub fn with_guid_default(id: AttrId, guid: Uuid) -> Self {
		Self {
			id,
			default: AttrValue::Empty,
			default_guid: Some(guid),
		}
	}

	/// The input mode-bias attribute, defaulting to "no bias".
	pub fn mode_bias() -> Self {
		Self::with_guid_default(AttrId::MODE_BIAS, MODE_BIAS_NONE)
	}
}
