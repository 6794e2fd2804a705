//! Lock-disciplined text store session.
//!
//! A [`TextStore`] sits between a text-bearing host (the document owner) and an
//! input-processing engine that needs serialized access to the document's content,
//! selection and layout. The engine registers a [`TextStoreSink`], asks for access with
//! [`TextStore::request_lock`], and performs edit operations from inside the sink's
//! grant callback. The host supplies its accessors through [`HostHooks`] and reports
//! out-of-band mutations through the `notify_*` methods.
//!
//! Locks are cooperative turn-taking markers, not blocking primitives:
//! - a request is granted immediately when the document is unlocked,
//! - a synchronous request against a held lock is refused with
//!   [`SessionResult::SynchronousLockFailed`],
//! - an asynchronous read-write request against a held read lock is parked in a
//!   one-slot pending upgrade and granted when the read lock is released.
//!
//! Side protocols (attribute negotiation, composition relay, display-attribute
//! enumeration) do not require the document lock.

mod atoms;
mod config;
mod hooks;
mod invariants;
mod sink;
mod store;
#[cfg(test)]
mod test_support;

pub use acpstore_primitives as primitives;
pub use atoms::{AtomTable, DisplayAttributeProvider, GuidAtoms, PropertyRun, PropertySource};
pub use config::{AttributeConfig, StoreConfig};
pub use hooks::HostHooks;
pub use sink::{SinkId, TextStoreSink};
pub use store::{
	AttrRecordFlags, AttributeRecord, AttributeTable, DisplayAttributes, InsertOutcome, LockGuard,
	LockState, SessionResult, TextRead, TextStore,
};

/// A convenient type alias for `Result` with `E` = [`enum@crate::Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced by store operations.
///
/// Advisory lock outcomes are not errors; see [`SessionResult`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// The operation is unsupported, or the host hook it needs is not installed.
	#[error("not implemented: {0}")]
	NotImplemented(&'static str),
	/// An offset, index or count violates the operation's constraints.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
	/// The operation needs a lock that is not currently held.
	#[error("operation requires a {required:?} lock")]
	NoLock {
		/// The lock the operation needs.
		required: primitives::LockFlags,
	},
	/// A lock was requested while no sink is advised.
	#[error("no sink registered")]
	NoSinkRegistered,
	/// A different sink is already advised.
	#[error("a different sink is already advised")]
	AlreadyAdvised,
	/// The sink being unadvised is not the registered one.
	#[error("sink is not advised")]
	NotAdvised,
	/// The lock request cannot be honored in the current lock state.
	#[error("cannot grant {requested:?} while {held:?}")]
	InvalidLockState {
		/// The state at the time of the request.
		held: LockState,
		/// The requested access.
		requested: primitives::LockFlags,
	},
	/// A collaborator broke its contract. Callers should not retry.
	#[error("internal failure: {0}")]
	InternalFailure(String),
	/// Store configuration could not be parsed.
	#[error("invalid store configuration: {0}")]
	Config(#[from] toml::de::Error),
}

/// Error kinds, independent of representation.
///
/// Transport layers map these to their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// See [`Error::NotImplemented`].
	NotImplemented,
	/// See [`Error::InvalidArgument`] and [`Error::Config`].
	InvalidArgument,
	/// See [`Error::NoLock`].
	NoLock,
	/// Advisory: a synchronous lock request was refused.
	SynchronousLockFailed,
	/// Advisory: the grant was deferred to the next release.
	AsyncPending,
	/// See [`Error::NoSinkRegistered`].
	NoSinkRegistered,
	/// See [`Error::AlreadyAdvised`].
	AlreadyAdvised,
	/// See [`Error::NotAdvised`].
	NotAdvised,
	/// See [`Error::InvalidLockState`].
	InvalidState,
	/// See [`Error::InternalFailure`].
	InternalFailure,
}

impl Error {
	/// Returns the kind of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::NotImplemented(_) => ErrorKind::NotImplemented,
			Self::InvalidArgument(_) | Self::Config(_) => ErrorKind::InvalidArgument,
			Self::NoLock { .. } => ErrorKind::NoLock,
			Self::NoSinkRegistered => ErrorKind::NoSinkRegistered,
			Self::AlreadyAdvised => ErrorKind::AlreadyAdvised,
			Self::NotAdvised => ErrorKind::NotAdvised,
			Self::InvalidLockState { .. } => ErrorKind::InvalidState,
			Self::InternalFailure(_) => ErrorKind::InternalFailure,
		}
	}

	pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
		Self::InvalidArgument(msg.into())
	}

	pub(crate) fn internal(msg: impl Into<String>) -> Self {
		Self::InternalFailure(msg.into())
	}
}
