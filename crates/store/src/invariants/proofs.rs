//! Machine-checkable invariant proofs for the text store.

use std::sync::Arc;

use acpstore_primitives::{
	AttrId, AttrRequestFlags, InsertFlags, LockFlags, SelectionIndex, TextChange,
};
use parking_lot::Mutex;

use crate::test_support::{Probe, ProbeSink, SINK, TestDoc, advised_store};
use crate::{Error, ErrorKind, LockState, SessionResult, SinkId, StoreConfig, TextStore};

fn kind_of(result: crate::Result<SessionResult>) -> Option<ErrorKind> {
	match result {
		Ok(outcome) => outcome.kind(),
		Err(e) => Some(e.kind()),
	}
}

/// Every grant ends unlocked, whatever the callback does.
#[cfg_attr(test, test)]
pub(crate) fn test_lock_state_returns_to_unlocked_after_every_grant() {
	let sink = ProbeSink::with_grant(|store, flags| {
		assert!(store.is_locked(flags));
		if flags.is_write() {
			Err(Error::internal("fail inside write grant"))
		} else {
			Ok(())
		}
	});
	let store = advised_store(&TestDoc::new("abc"), sink);
	for flags in [
		LockFlags::READ,
		LockFlags::READ_WRITE,
		LockFlags::READ | LockFlags::SYNC,
		LockFlags::READ_WRITE | LockFlags::SYNC,
	] {
		assert!(store.request_lock(flags).unwrap().is_granted());
		assert_eq!(store.lock_state(), LockState::Unlocked);
	}
}

/// Sync requests under a lock are refused and change nothing.
#[cfg_attr(test, test)]
pub(crate) fn test_sync_request_under_lock_is_refused_without_mutation() {
	let store = advised_store(&TestDoc::new("abc"), ProbeSink::new());
	let guard = store.lock_document(LockFlags::READ).unwrap();
	let outcome = store.request_lock(LockFlags::READ_WRITE | LockFlags::SYNC);
	assert_eq!(kind_of(outcome), Some(ErrorKind::SynchronousLockFailed));
	assert_eq!(store.lock_state(), LockState::ReadLocked);
	assert!(!store.has_pending_upgrade());
	drop(guard);
}

/// A second upgrade fails fast and the first still gets its grant.
#[cfg_attr(test, test)]
pub(crate) fn test_second_upgrade_is_rejected_and_first_survives() {
	let sink = ProbeSink::new();
	let store = advised_store(&TestDoc::new("abc"), sink.clone());
	let guard = store.lock_document(LockFlags::READ).unwrap();
	assert_eq!(
		kind_of(store.request_lock(LockFlags::READ_WRITE)),
		Some(ErrorKind::AsyncPending)
	);
	assert_eq!(
		kind_of(store.request_lock(LockFlags::READ_WRITE)),
		Some(ErrorKind::InternalFailure)
	);
	assert!(store.has_pending_upgrade());
	drop(guard);
	assert_eq!(sink.grants(), vec![LockFlags::READ_WRITE]);
}

/// The queued upgrade is granted inside `release`.
#[cfg_attr(test, test)]
pub(crate) fn test_release_grants_pending_upgrade_before_returning() {
	let sink = ProbeSink::with_grant(|store, flags| {
		if flags.is_write() {
			assert!(!store.has_pending_upgrade());
			assert_eq!(store.lock_state(), LockState::ReadWriteLocked);
		}
		Ok(())
	});
	let store = advised_store(&TestDoc::new("abc"), sink.clone());
	let guard = store.lock_document(LockFlags::READ).unwrap();
	let _ = store.request_lock(LockFlags::READ_WRITE).unwrap();
	assert!(sink.grants().is_empty());
	guard.release();
	assert_eq!(sink.grants(), vec![LockFlags::READ_WRITE]);
	assert_eq!(store.lock_state(), LockState::Unlocked);
}

/// The grant callback can call any store operation without deadlocking.
#[cfg_attr(test, test)]
pub(crate) fn test_grant_callback_may_reenter_store() {
	let doc = TestDoc::new("hello");
	let sink = ProbeSink::with_grant(|store, _| {
		let read = store.get_text(0, None, 16)?;
		assert_eq!(read.text, "hello");
		store.get_selection(SelectionIndex::Default, 1)?;
		store.insert_text_at_selection(InsertFlags::NO_QUERY, "!")?;
		let _ = store.get_status();
		let _ = store.retrieve_requested_attrs(1);
		let _ = store.advise_mask();
		Ok(())
	});
	let store = advised_store(&doc, sink);
	let outcome = store.request_lock(LockFlags::READ_WRITE).unwrap();
	assert!(matches!(outcome, SessionResult::Granted(Ok(()))));
	assert_eq!(doc.text(), "hello!");
}

/// Without a lock, bad arguments still report `NoLock`.
#[cfg_attr(test, test)]
pub(crate) fn test_gated_operations_report_no_lock_first() {
	let store = advised_store(&TestDoc::new("abc"), ProbeSink::new());
	assert!(matches!(store.get_text(9, Some(1), 1), Err(Error::NoLock { .. })));
	assert!(matches!(store.set_selection(&[]), Err(Error::NoLock { .. })));
	assert!(matches!(
		store.get_selection(SelectionIndex::At(3), 1),
		Err(Error::NoLock { .. })
	));
	assert!(matches!(
		store.insert_text_at_selection(InsertFlags::all(), ""),
		Err(Error::NoLock { .. })
	));
}

/// Notifications from inside a grant never reach the sink.
#[cfg_attr(test, test)]
pub(crate) fn test_notify_inside_grant_is_dropped() {
	let sink = ProbeSink::with_grant(|store, _| {
		store.notify_text_changed(TextChange::new(0, 0, 1));
		store.notify_selection_changed();
		store.notify_status_changed();
		store.notify_attrs_changed(0, 1, &[AttrId::MODE_BIAS]);
		Ok(())
	});
	let store = advised_store(&TestDoc::new("abc"), sink.clone());
	let _ = store.request_lock(LockFlags::READ).unwrap();
	assert_eq!(sink.events(), vec![Probe::Granted(LockFlags::READ)]);
}

/// A request is answered by exactly one retrieval.
#[cfg_attr(test, test)]
pub(crate) fn test_retrieve_never_reports_twice() {
	let store = TextStore::new(StoreConfig::default(), crate::HostHooks::new());
	assert!(store.retrieve_requested_attrs(8).is_empty());
	store.request_supported_attrs(AttrRequestFlags::FIND_WANT_VALUE, &[AttrId::MODE_BIAS]);
	assert_eq!(store.retrieve_requested_attrs(8).len(), 1);
	assert!(store.retrieve_requested_attrs(8).is_empty());
	assert!(store.attribute(AttrId::MODE_BIAS).unwrap().flags.is_empty());
}

/// Only the registered id can touch the registration.
#[cfg_attr(test, test)]
pub(crate) fn test_second_sink_cannot_displace_first() {
	let first = ProbeSink::new();
	let store = advised_store(&TestDoc::new("abc"), first.clone());
	let other = SinkId(SINK.0 + 1);
	assert_eq!(
		store
			.advise_sink(other, ProbeSink::new(), Default::default())
			.unwrap_err()
			.kind(),
		ErrorKind::AlreadyAdvised
	);
	assert_eq!(store.unadvise_sink(other).unwrap_err().kind(), ErrorKind::NotAdvised);
	let _ = store.request_lock(LockFlags::READ).unwrap();
	assert_eq!(first.grants(), vec![LockFlags::READ]);
}

/// Zero reported selections or a short selection list are collaborator bugs.
#[cfg_attr(test, test)]
pub(crate) fn test_zero_selections_is_internal_failure() {
	let kinds = Arc::new(Mutex::new(Vec::new()));
	for count in [0usize, 2] {
		let doc = TestDoc::new("abc");
		let hooks = doc.hooks().with_selection_count(move || count);
		let seen = kinds.clone();
		let sink = ProbeSink::with_grant(move |store, _| {
			let err = store
				.insert_text_at_selection(InsertFlags::NO_QUERY, "x")
				.unwrap_err();
			seen.lock().push(err.kind());
			Ok(())
		});
		let store = TextStore::new(StoreConfig::default(), hooks);
		store.advise_sink(SINK, sink, Default::default()).unwrap();
		let _ = store.request_lock(LockFlags::READ_WRITE).unwrap();
		assert_eq!(doc.text(), "abc");
	}
	assert_eq!(
		*kinds.lock(),
		vec![ErrorKind::InternalFailure, ErrorKind::InternalFailure]
	);
}
