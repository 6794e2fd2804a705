use acpstore_primitives::LockFlags;

use super::TextStore;
use crate::{Error, ErrorKind, Result};

#[cfg(test)]
mod tests;

/// Access currently held on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LockState {
	/// No lock held.
	#[default]
	Unlocked,
	/// Read access held.
	ReadLocked,
	/// Read-write access held.
	ReadWriteLocked,
}

impl LockState {
	/// The access bits this state grants.
	pub fn flags(self) -> LockFlags {
		match self {
			Self::Unlocked => LockFlags::empty(),
			Self::ReadLocked => LockFlags::READ,
			Self::ReadWriteLocked => LockFlags::READ_WRITE,
		}
	}

	/// True for any state but [`LockState::Unlocked`].
	pub fn is_locked(self) -> bool {
		self != Self::Unlocked
	}

	fn for_access(access: LockFlags) -> Self {
		if access.is_write() {
			Self::ReadWriteLocked
		} else {
			Self::ReadLocked
		}
	}
}

/// Outcome of [`TextStore::request_lock`].
#[derive(Debug)]
#[must_use]
pub enum SessionResult {
	/// The lock was granted and the sink's grant callback ran; carries its result.
	Granted(Result<()>),
	/// A synchronous request met a held lock. Nothing changed.
	SynchronousLockFailed,
	/// A read-write upgrade was queued; it is granted when the read lock is released.
	AsyncPending,
}

impl SessionResult {
	/// True if the grant callback ran.
	pub fn is_granted(&self) -> bool {
		matches!(self, Self::Granted(_))
	}

	/// The advisory or error kind of this outcome; `None` for a successful grant.
	pub fn kind(&self) -> Option<ErrorKind> {
		match self {
			Self::Granted(Ok(())) => None,
			Self::Granted(Err(e)) => Some(e.kind()),
			Self::SynchronousLockFailed => Some(ErrorKind::SynchronousLockFailed),
			Self::AsyncPending => Some(ErrorKind::AsyncPending),
		}
	}
}

/// Held lock. Dropping the guard releases it and resolves a pending upgrade.
#[must_use = "dropping the guard releases the lock"]
pub struct LockGuard<'a> {
	store: &'a TextStore,
	flags: LockFlags,
}

impl LockGuard<'_> {
	/// The access this guard holds.
	pub fn flags(&self) -> LockFlags {
		self.flags
	}

	/// Releases the lock now.
	pub fn release(self) {}
}

impl Drop for LockGuard<'_> {
	fn drop(&mut self) {
		self.store.release();
	}
}

impl std::fmt::Debug for LockGuard<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LockGuard").field("flags", &self.flags).finish()
	}
}

impl TextStore {
	/// Requests document access on behalf of the advised sink.
	///
	/// When the document is unlocked the lock is taken, the sink's
	/// [`on_lock_granted`](crate::TextStoreSink::on_lock_granted) runs with `flags`, and
	/// the lock is released before returning. A pending upgrade queued during the
	/// callback is granted during that release, also before returning.
	///
	/// # Errors
	///
	/// - [`Error::InvalidArgument`] if `flags` carries no read bit.
	/// - [`Error::NoSinkRegistered`] if no sink is advised.
	/// - [`Error::InternalFailure`] if an upgrade is already pending.
	/// - [`Error::InvalidLockState`] for any other request against a held lock.
	pub fn request_lock(&self, flags: LockFlags) -> Result<SessionResult> {
		let access = flags.access();
		if !access.contains(LockFlags::READ) {
			return Err(Error::invalid_argument(format!(
				"lock request {flags:?} carries no read access"
			)));
		}

		let sink = {
			let mut state = self.state.lock();
			let sink = state
				.sink
				.as_ref()
				.map(|reg| reg.sink.clone())
				.ok_or(Error::NoSinkRegistered)?;
			let current = state.lock;
			match current {
				LockState::Unlocked => {
					state.lock = LockState::for_access(access);
					sink
				}
				held if flags.is_sync() => {
					tracing::debug!(?held, ?flags, "synchronous lock refused");
					return Ok(SessionResult::SynchronousLockFailed);
				}
				LockState::ReadLocked if access.is_write() => {
					if state.pending_upgrade {
						tracing::error!("second read-write upgrade requested while one is pending");
						return Err(Error::internal("an upgrade is already pending"));
					}
					state.pending_upgrade = true;
					tracing::debug!("read-write upgrade queued");
					return Ok(SessionResult::AsyncPending);
				}
				held => {
					tracing::debug!(?held, ?flags, "lock request rejected");
					return Err(Error::InvalidLockState {
						held,
						requested: flags,
					});
				}
			}
		};

		tracing::debug!(?flags, "lock granted");
		let guard = LockGuard { store: self, flags: access };
		let result = sink.on_lock_granted(self, flags);
		if let Err(e) = &result {
			tracing::warn!(error = %e, ?flags, "grant callback failed");
		}
		drop(guard);
		Ok(SessionResult::Granted(result))
	}

	/// Host-side lock attempt. Never waits and never involves the sink.
	///
	/// Returns `None` when any lock is already held.
	pub fn lock_document(&self, flags: LockFlags) -> Option<LockGuard<'_>> {
		let access = flags.access();
		if !access.contains(LockFlags::READ) {
			return None;
		}
		let mut state = self.state.lock();
		if state.lock.is_locked() {
			tracing::debug!(held = ?state.lock, ?flags, "host lock attempt refused");
			return None;
		}
		state.lock = LockState::for_access(access);
		Some(LockGuard { store: self, flags: access })
	}

	/// True iff a lock is held whose access includes every bit of `flags`.
	///
	/// `SYNC` is ignored; a query with no access bits is false.
	pub fn is_locked(&self, flags: LockFlags) -> bool {
		let access = flags.access();
		!access.is_empty() && self.state.lock().lock.flags().contains(access)
	}

	/// True iff any lock is held.
	pub fn is_locked_any(&self) -> bool {
		self.state.lock().lock.is_locked()
	}

	/// The current lock state.
	pub fn lock_state(&self) -> LockState {
		self.state.lock().lock
	}

	/// True while a read-write upgrade waits for the read lock to be released.
	pub fn has_pending_upgrade(&self) -> bool {
		self.state.lock().pending_upgrade
	}

	pub(crate) fn require_lock(&self, required: LockFlags) -> Result<()> {
		if self.is_locked(required) {
			Ok(())
		} else {
			Err(Error::NoLock { required })
		}
	}

	fn release(&self) {
		let pending = {
			let mut state = self.state.lock();
			state.lock = LockState::Unlocked;
			std::mem::take(&mut state.pending_upgrade)
		};
		if pending {
			self.resolve_pending_upgrade();
		}
	}

	/// Grants the queued read-write upgrade. Only reached from [`Self::release`].
	fn resolve_pending_upgrade(&self) {
		tracing::debug!("resolving pending upgrade");
		match self.request_lock(LockFlags::READ_WRITE) {
			Ok(SessionResult::Granted(_)) => {}
			Ok(other) => tracing::warn!(outcome = ?other, "pending upgrade not granted"),
			Err(e) => tracing::warn!(error = %e, "pending upgrade failed"),
		}
	}
}
