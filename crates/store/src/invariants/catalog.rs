//! Invariant catalog for [`crate::TextStore`].
#![allow(dead_code)]

/// The lock state is exactly one of unlocked, read-locked or read-write-locked, and
/// every grant is paired with exactly one release.
///
/// - Enforced in: [`crate::TextStore::request_lock`], `LockGuard::drop`
/// - Tested by: [`crate::invariants::test_lock_state_returns_to_unlocked_after_every_grant`]
/// - Failure symptom: The document stays locked after a grant and every later request is refused.
pub(crate) const LOCK_STATE_IS_SINGLE_VALUED: () = ();

/// A synchronous request against a held lock returns `SynchronousLockFailed` and leaves
/// the lock and the pending slot untouched.
///
/// - Enforced in: [`crate::TextStore::request_lock`]
/// - Tested by: [`crate::invariants::test_sync_request_under_lock_is_refused_without_mutation`]
/// - Failure symptom: A refused caller silently downgrades or queues over the active grant.
pub(crate) const SYNC_REQUEST_NEVER_MUTATES_HELD_LOCK: () = ();

/// At most one read-write upgrade waits at a time; a second is an internal failure and
/// leaves the first queued.
///
/// - Enforced in: [`crate::TextStore::request_lock`]
/// - Tested by: [`crate::invariants::test_second_upgrade_is_rejected_and_first_survives`]
/// - Failure symptom: An upgrade is lost or granted twice.
pub(crate) const ASYNC_UPGRADE_QUEUES_EXACTLY_ONE: () = ();

/// Releasing a lock with an upgrade queued grants it exactly once before the release
/// returns, and clears the slot first.
///
/// - Enforced in: `TextStore::release`, `TextStore::resolve_pending_upgrade`
/// - Tested by: [`crate::invariants::test_release_grants_pending_upgrade_before_returning`]
/// - Failure symptom: The engine waits forever for a write grant, or the grant loops.
pub(crate) const GUARD_RELEASE_RESOLVES_PENDING_UPGRADE: () = ();

/// The sink's grant callback runs with the lock already recorded as held.
///
/// - Enforced in: [`crate::TextStore::request_lock`]
/// - Tested by: [`crate::invariants::test_grant_callback_may_reenter_store`]
/// - Failure symptom: Edit operations inside the grant fail with `NoLock`.
pub(crate) const GRANT_CALLBACK_RUNS_UNDER_HELD_LOCK: () = ();

/// The session mutex is never held while the sink or a host hook runs.
///
/// - Enforced in: [`crate::TextStore::request_lock`], the `notify_*` methods,
///   [`crate::TextStore::enumerate_attributes`]
/// - Tested by: [`crate::invariants::test_grant_callback_may_reenter_store`]
/// - Failure symptom: Deadlock as soon as the grant callback calls back into the store.
pub(crate) const SESSION_MUTEX_NOT_HELD_ACROSS_CALLBACKS: () = ();

/// Gated operations report `NoLock` before consulting hooks or validating arguments.
///
/// - Enforced in: `TextStore::require_lock` callers in `store::edit`
/// - Tested by: [`crate::invariants::test_gated_operations_report_no_lock_first`]
/// - Failure symptom: Callers see argument errors and retry without taking a lock.
pub(crate) const OPERATIONS_CHECK_LOCK_BEFORE_ARGUMENTS: () = ();

/// Host notifications issued while any lock is held are dropped.
///
/// - Enforced in: `TextStore::notification_target`
/// - Tested by: [`crate::invariants::test_notify_inside_grant_is_dropped`]
/// - Failure symptom: The engine receives its own edits back as foreign changes.
pub(crate) const NOTIFICATIONS_UNDER_LOCK_ARE_SUPPRESSED: () = ();

/// Retrieval reports only requested attributes and clears their flags.
///
/// - Enforced in: [`crate::AttributeTable`] retrieval
/// - Tested by: [`crate::invariants::test_retrieve_never_reports_twice`]
/// - Failure symptom: Stale attribute values are reported on every later retrieval.
pub(crate) const RETRIEVAL_CLEARS_REQUEST_FLAGS: () = ();

/// At most one sink is registered; only its own id can update or remove it.
///
/// - Enforced in: [`crate::TextStore::advise_sink_with_services`], [`crate::TextStore::unadvise_sink`]
/// - Tested by: [`crate::invariants::test_second_sink_cannot_displace_first`]
/// - Failure symptom: Grants and notifications go to an engine that did not ask for them.
pub(crate) const SINGLE_SINK_REGISTRATION: () = ();

/// Inserting at the selection needs the host to report at least one selection and
/// deliver as many as it reports.
///
/// - Enforced in: [`crate::TextStore::insert_text_at_selection`]
/// - Tested by: [`crate::invariants::test_zero_selections_is_internal_failure`]
/// - Failure symptom: Insertions are silently dropped.
pub(crate) const INSERT_REQUIRES_AT_LEAST_ONE_SELECTION: () = ();
