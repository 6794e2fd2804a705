//! Protocol flag sets.
//!
//! Bit values match the wire protocol so transport layers can convert with
//! `from_bits_truncate` without a lookup table.

bitflags::bitflags! {
	/// Requested or held document access.
	///
	/// `READ_WRITE` contains the `READ` bit, so a read-write lock satisfies a read query.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct LockFlags: u32 {
		/// Request must be granted before `request_lock` returns or not at all.
		const SYNC = 0x1;
		/// Read access.
		const READ = 0x2;
		/// Write bit; only meaningful together with `READ`.
		const WRITE = 0x4;
		/// Read and write access.
		const READ_WRITE = 0x6;
	}
}

impl LockFlags {
	/// The access bits with the `SYNC` qualifier removed.
	pub fn access(self) -> Self {
		self & Self::READ_WRITE
	}

	/// True when `SYNC` is set.
	pub fn is_sync(self) -> bool {
		self.contains(Self::SYNC)
	}

	/// True when the access bits request writing.
	pub fn is_write(self) -> bool {
		self.access() == Self::READ_WRITE
	}
}

bitflags::bitflags! {
	/// Notifications a sink wants to receive.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct AdviseMask: u32 {
		/// Text content changes.
		const TEXT_CHANGE = 0x1;
		/// Selection changes.
		const SELECTION_CHANGE = 0x2;
		/// Layout changes.
		const LAYOUT_CHANGE = 0x4;
		/// Attribute changes.
		const ATTR_CHANGE = 0x8;
		/// Document status changes.
		const STATUS_CHANGE = 0x10;
		/// Every notification.
		const ALL = Self::TEXT_CHANGE.bits()
			| Self::SELECTION_CHANGE.bits()
			| Self::LAYOUT_CHANGE.bits()
			| Self::ATTR_CHANGE.bits()
			| Self::STATUS_CHANGE.bits();
	}
}

bitflags::bitflags! {
	/// Mode of an insert-at-selection request.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct InsertFlags: u32 {
		/// Commit the insertion; the caller does not need the projected bounds.
		const NO_QUERY = 0x1;
		/// Only compute the projected bounds; the document is untouched.
		const QUERY_ONLY = 0x2;
	}
}

bitflags::bitflags! {
	/// Flags for `set_text`.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct SetTextFlags: u32 {
		/// The text is a correction of existing content.
		const CORRECTION = 0x1;
	}
}

bitflags::bitflags! {
	/// Options for attribute requests.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct AttrRequestFlags: u32 {
		/// Search backwards.
		const FIND_BACKWARDS = 0x1;
		/// Report the offset of a transition.
		const FIND_WANT_OFFSET = 0x2;
		/// Update the start position while searching.
		const FIND_UPDATE_START = 0x4;
		/// The caller wants the default value reported.
		const FIND_WANT_VALUE = 0x8;
		/// Report the end of a run.
		const FIND_WANT_END = 0x10;
		/// Include hidden text.
		const FIND_HIDDEN = 0x20;
	}
}

bitflags::bitflags! {
	/// Status flags that can change during the session.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct DynamicStatusFlags: u32 {
		/// The document rejects edits.
		const READ_ONLY = 0x1;
		/// The document is still loading.
		const LOADING = 0x2;
	}
}

bitflags::bitflags! {
	/// Status flags fixed for the lifetime of the session.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct StaticStatusFlags: u32 {
		/// More than one selection may exist.
		const DISJOINT_SELECTION = 0x1;
		/// The document supports regions.
		const REGIONS = 0x2;
		/// The document is short-lived.
		const TRANSITORY = 0x4;
		/// The document never contains hidden text.
		const NO_HIDDEN_TEXT = 0x8;
	}
}

/// Document status snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentStatus {
	/// Flags that may change during the session.
	pub dynamic_flags: DynamicStatusFlags,
	/// Flags fixed at construction.
	pub static_flags: StaticStatusFlags,
}

/// Kind of layout change reported to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutCode {
	/// A view was created.
	Create,
	/// Rendered positions are stale.
	Changed,
	/// A view was destroyed.
	Destroy,
}

/// Identifies a view of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewCookie(pub u32);

impl std::fmt::Display for ViewCookie {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "view#{}", self.0)
	}
}

/// Kind of a text run returned alongside plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunKind {
	/// Visible text.
	Plain,
	/// Hidden text.
	Hidden,
	/// Embedded, non-text content.
	Opaque,
}

/// A run of characters of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunInfo {
	/// Number of characters in the run.
	pub len: usize,
	/// Kind of the run.
	pub kind: RunKind,
}
