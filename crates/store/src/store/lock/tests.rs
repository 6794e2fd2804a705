use std::sync::Arc;

use acpstore_primitives::LockFlags;
use parking_lot::Mutex;

use super::*;
use crate::test_support::{ProbeSink, TestDoc, advised_store};
use crate::{Error, ErrorKind, StoreConfig, TextStore};

type Outcomes = Arc<Mutex<Vec<Option<ErrorKind>>>>;

fn record(outcomes: &Outcomes, result: Result<SessionResult>) {
	let kind = match result {
		Ok(outcome) => outcome.kind(),
		Err(e) => Some(e.kind()),
	};
	outcomes.lock().push(kind);
}

#[test]
fn grant_runs_callback_then_releases() {
	let doc = TestDoc::new("hello");
	let sink = ProbeSink::with_grant(|store, _| {
		assert_eq!(store.lock_state(), LockState::ReadLocked);
		assert!(store.is_locked(LockFlags::READ));
		assert!(!store.is_locked(LockFlags::READ_WRITE));
		Ok(())
	});
	let store = advised_store(&doc, sink.clone());

	let outcome = store.request_lock(LockFlags::READ | LockFlags::SYNC).unwrap();
	assert!(matches!(outcome, SessionResult::Granted(Ok(()))));
	assert_eq!(sink.grants(), vec![LockFlags::READ | LockFlags::SYNC]);
	assert_eq!(store.lock_state(), LockState::Unlocked);
}

#[test]
fn request_without_sink_fails() {
	let doc = TestDoc::new("");
	let store = TextStore::new(StoreConfig::default(), doc.hooks());
	let err = store.request_lock(LockFlags::READ).unwrap_err();
	assert!(matches!(err, Error::NoSinkRegistered));
}

#[test]
fn request_without_read_bit_is_invalid() {
	let store = advised_store(&TestDoc::new(""), ProbeSink::new());
	for flags in [LockFlags::empty(), LockFlags::SYNC, LockFlags::WRITE] {
		let err = store.request_lock(flags).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{flags:?}");
	}
}

#[test]
fn sync_request_while_locked_is_refused_without_state_change() {
	let outcomes: Outcomes = Arc::default();
	let seen = outcomes.clone();
	let sink = ProbeSink::with_grant(move |store, _| {
		record(&seen, store.request_lock(LockFlags::READ_WRITE | LockFlags::SYNC));
		record(&seen, store.request_lock(LockFlags::READ | LockFlags::SYNC));
		assert_eq!(store.lock_state(), LockState::ReadLocked);
		assert!(!store.has_pending_upgrade());
		Ok(())
	});
	let store = advised_store(&TestDoc::new("x"), sink.clone());

	let _ = store.request_lock(LockFlags::READ).unwrap();
	assert_eq!(
		*outcomes.lock(),
		vec![
			Some(ErrorKind::SynchronousLockFailed),
			Some(ErrorKind::SynchronousLockFailed)
		]
	);
	assert_eq!(sink.grants(), vec![LockFlags::READ]);
}

#[test]
fn async_upgrade_is_granted_on_release() {
	let outcomes: Outcomes = Arc::default();
	let seen = outcomes.clone();
	let sink = ProbeSink::with_grant(move |store, flags| {
		if flags == LockFlags::READ {
			record(&seen, store.request_lock(LockFlags::READ_WRITE));
			assert!(store.has_pending_upgrade());
		} else {
			assert_eq!(store.lock_state(), LockState::ReadWriteLocked);
		}
		Ok(())
	});
	let store = advised_store(&TestDoc::new("x"), sink.clone());

	let outcome = store.request_lock(LockFlags::READ).unwrap();
	assert!(outcome.is_granted());
	assert_eq!(*outcomes.lock(), vec![Some(ErrorKind::AsyncPending)]);
	assert_eq!(sink.grants(), vec![LockFlags::READ, LockFlags::READ_WRITE]);
	assert!(!store.has_pending_upgrade());
	assert_eq!(store.lock_state(), LockState::Unlocked);
}

#[test]
fn second_pending_upgrade_is_internal_failure() {
	let outcomes: Outcomes = Arc::default();
	let seen = outcomes.clone();
	let sink = ProbeSink::with_grant(move |store, flags| {
		if flags == LockFlags::READ {
			record(&seen, store.request_lock(LockFlags::READ_WRITE));
			record(&seen, store.request_lock(LockFlags::READ_WRITE));
			assert!(store.has_pending_upgrade());
		}
		Ok(())
	});
	let store = advised_store(&TestDoc::new("x"), sink.clone());

	let _ = store.request_lock(LockFlags::READ).unwrap();
	assert_eq!(
		*outcomes.lock(),
		vec![Some(ErrorKind::AsyncPending), Some(ErrorKind::InternalFailure)]
	);
	assert_eq!(sink.grants(), vec![LockFlags::READ, LockFlags::READ_WRITE]);
}

#[test]
fn other_async_requests_while_locked_are_invalid_state() {
	let outcomes: Outcomes = Arc::default();
	let seen = outcomes.clone();
	let sink = ProbeSink::with_grant(move |store, _| {
		record(&seen, store.request_lock(LockFlags::READ));
		record(&seen, store.request_lock(LockFlags::READ_WRITE));
		Ok(())
	});
	let store = advised_store(&TestDoc::new("x"), sink.clone());

	let _ = store.request_lock(LockFlags::READ_WRITE).unwrap();
	assert_eq!(
		*outcomes.lock(),
		vec![Some(ErrorKind::InvalidState), Some(ErrorKind::InvalidState)]
	);
	assert_eq!(sink.grants(), vec![LockFlags::READ_WRITE]);
}

#[test]
fn callback_error_is_reported_and_lock_released() {
	let sink = ProbeSink::with_grant(|_, _| Err(Error::internal("engine failed")));
	let store = advised_store(&TestDoc::new("x"), sink);

	let outcome = store.request_lock(LockFlags::READ_WRITE).unwrap();
	assert!(matches!(outcome, SessionResult::Granted(Err(Error::InternalFailure(_)))));
	assert_eq!(outcome.kind(), Some(ErrorKind::InternalFailure));
	assert!(!store.is_locked_any());
}

#[test]
fn lock_document_is_exclusive_and_released_on_drop() {
	let store = advised_store(&TestDoc::new("x"), ProbeSink::new());

	let guard = store.lock_document(LockFlags::READ_WRITE).unwrap();
	assert_eq!(guard.flags(), LockFlags::READ_WRITE);
	assert!(store.is_locked(LockFlags::READ));
	assert!(store.is_locked(LockFlags::READ_WRITE | LockFlags::SYNC));
	assert!(store.lock_document(LockFlags::READ).is_none());
	drop(guard);

	assert!(!store.is_locked_any());
	assert!(!store.is_locked(LockFlags::READ));
	assert!(!store.is_locked(LockFlags::empty()));
	let guard = store.lock_document(LockFlags::READ).unwrap();
	guard.release();
	assert_eq!(store.lock_state(), LockState::Unlocked);
}

#[test]
fn host_read_lock_defers_engine_upgrade() {
	let sink = ProbeSink::new();
	let store = advised_store(&TestDoc::new("x"), sink.clone());

	let guard = store.lock_document(LockFlags::READ).unwrap();
	let outcome = store.request_lock(LockFlags::READ_WRITE).unwrap();
	assert!(matches!(outcome, SessionResult::AsyncPending));
	assert!(sink.grants().is_empty());

	drop(guard);
	assert_eq!(sink.grants(), vec![LockFlags::READ_WRITE]);
	assert!(!store.has_pending_upgrade());
}

#[test]
fn lock_state_flags() {
	assert_eq!(LockState::Unlocked.flags(), LockFlags::empty());
	assert_eq!(LockState::ReadLocked.flags(), LockFlags::READ);
	assert_eq!(LockState::ReadWriteLocked.flags(), LockFlags::READ_WRITE);
	assert!(!LockState::default().is_locked());
}
