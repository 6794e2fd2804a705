//! Replay script format.
//!
//! A script is a TOML document: the initial text, an optional `[config]` table holding a
//! [`StoreConfig`], and an ordered list of `[[step]]` tables. Steps tagged `lock` carry a
//! `grant` list of actions that run inside the lock grant.
//!
//! ```toml
//! text = "hello"
//!
//! [[step]]
//! op = "advise"
//!
//! [[step]]
//! op = "lock"
//! access = "read_write"
//! grant = [{ op = "insert", text = " world" }]
//! ```

use acpstore::StoreConfig;
use acpstore_primitives::{AdviseMask, AttrId, LockFlags};
use serde::Deserialize;


/// A parsed replay script.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
	/// Initial document text.
	#[serde(default)]
	pub text: String,
	/// Store configuration.
	#[serde(default)]
	pub config: StoreConfig,
	/// Steps in execution order.
	#[serde(default, rename = "step")]
	pub steps: Vec<Step>,
}

impl Script {
	/// Parses a script from TOML.
	pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(source)
	}
}

/// Lock access level named in a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
	#[default]
	Read,
	ReadWrite,
}

impl Access {
	/// The lock flags for this access, with `SYNC` added when `sync` is set.
	pub fn flags(self, sync: bool) -> LockFlags {
		let access = match self {
			Self::Read => LockFlags::READ,
			Self::ReadWrite => LockFlags::READ_WRITE,
		};
		if sync { access | LockFlags::SYNC } else { access }
	}
}

/// A notification category named in an `advise` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Notification {
	Text,
	Selection,
	Layout,
	Attrs,
	Status,
	All,
}

impl Notification {
	/// Folds a list of categories into an advise mask. An empty list means all.
	pub fn mask(list: &[Self]) -> AdviseMask {
		if list.is_empty() {
			return AdviseMask::ALL;
		}
		list.iter().fold(AdviseMask::empty(), |mask, item| {
			mask | match item {
				Self::Text => AdviseMask::TEXT_CHANGE,
				Self::Selection => AdviseMask::SELECTION_CHANGE,
				Self::Layout => AdviseMask::LAYOUT_CHANGE,
				Self::Attrs => AdviseMask::ATTR_CHANGE,
				Self::Status => AdviseMask::STATUS_CHANGE,
				Self::All => AdviseMask::ALL,
			}
		})
	}
}

/// What a `composition` step tells the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionEvent {
	Start,
	Update,
	End,
}

fn default_sink() -> u64 {
	1
}

fn default_max() -> usize {
	256
}

fn one() -> usize {
	1
}

/// A top-level step, run outside any lock grant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum Step {
	/// Registers the recording sink.
	Advise {
		#[serde(default = "default_sink")]
		sink: u64,
		#[serde(default)]
		notify: Vec<Notification>,
	},
	/// Removes the sink registration.
	Unadvise {
		#[serde(default = "default_sink")]
		sink: u64,
	},
	/// Requests a lock and runs `grant` inside it.
	Lock {
		#[serde(default)]
		access: Access,
		#[serde(default)]
		sync: bool,
		#[serde(default)]
		grant: Vec<Action>,
	},
	/// Edits the document directly and reports the change.
	HostEdit {
		start: usize,
		end: usize,
		text: String,
	},
	/// Inserts at the selection on the host's behalf.
	HostInsert { text: String },
	/// Moves the host selection and reports it.
	HostSelect { start: usize, end: usize },
	/// Replaces the whole text and reports it.
	HostReplace { text: String },
	/// Toggles read-only status and reports it.
	ReadOnly { value: bool },
	/// Toggles loading status and reports it.
	Loading { value: bool },
	/// Reports attribute changes over a range.
	AttrsChanged {
		start: usize,
		end: usize,
		#[serde(default)]
		attrs: Vec<AttrId>,
	},
	/// Marks attributes for retrieval.
	RequestAttrs {
		#[serde(default)]
		attrs: Vec<AttrId>,
		#[serde(default)]
		want_value: bool,
	},
	/// Retrieves requested attribute values.
	RetrieveAttrs {
		#[serde(default = "default_max")]
		max: usize,
	},
	/// Forwards a composition event.
	Composition {
		event: CompositionEvent,
		#[serde(default)]
		start: Option<usize>,
		#[serde(default)]
		end: Option<usize>,
	},
	/// Records the document status.
	Status,
}

/// An action run inside a lock grant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum Action {
	GetText {
		#[serde(default)]
		start: usize,
		#[serde(default)]
		end: Option<usize>,
		#[serde(default = "default_max")]
		max: usize,
	},
	GetSelection {
		#[serde(default)]
		index: Option<usize>,
		#[serde(default = "one")]
		max: usize,
	},
	SetSelection {
		start: usize,
		end: usize,
		#[serde(default)]
		active_start: bool,
	},
	Insert {
		text: String,
		#[serde(default)]
		query_only: bool,
	},
	SetText {
		start: usize,
		end: usize,
		text: String,
	},
	QueryInsert {
		start: usize,
		end: usize,
		len: usize,
	},
	EndAcp,
	TextExtent {
		start: usize,
		#[serde(default)]
		end: Option<usize>,
	},
	ScreenExtent,
	/// Requests another lock from inside the grant. `grant` runs if and when it is granted.
	RequestLock {
		#[serde(default)]
		access: Access,
		#[serde(default)]
		sync: bool,
		#[serde(default)]
		grant: Vec<Action>,
	},
	/// A host notification issued from inside the grant.
	NotifySelection,
	/// Ends the grant with an error.
	Fail { message: String },
}
