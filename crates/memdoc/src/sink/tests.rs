use std::sync::Arc;

use acpstore::{SinkId, StoreConfig};
use acpstore_primitives::{AdviseMask, InsertFlags, LockFlags};
use pretty_assertions::assert_eq;

use super::*;
use crate::MemoryDocument;

fn advised(doc: &Arc<MemoryDocument>) -> (TextStore, Arc<RecordingSink>) {
	let store = TextStore::new(StoreConfig::default(), doc.hooks());
	let sink = Arc::new(RecordingSink::new());
	store
		.advise_sink(SinkId(7), sink.clone(), AdviseMask::ALL)
		.unwrap();
	(store, sink)
}

#[test]
fn scripts_run_in_grant_order() {
	let doc = MemoryDocument::new("hello");
	let (store, sink) = advised(&doc);
	sink.push_grant(|store, _| {
		store.insert_text_at_selection(InsertFlags::NO_QUERY, " world")?;
		Ok(())
	});
	sink.push_grant(|store, _| {
		let read = store.get_text(0, None, 64)?;
		assert_eq!(read.text, "hello world");
		Ok(())
	});

	assert!(store.request_lock(LockFlags::READ_WRITE).unwrap().is_granted());
	assert_eq!(sink.pending_scripts(), 1);
	assert!(store.request_lock(LockFlags::READ).unwrap().is_granted());
	assert_eq!(sink.pending_scripts(), 0);
	assert_eq!(sink.grants(), vec![LockFlags::READ_WRITE, LockFlags::READ]);
	assert_eq!(doc.text(), "hello world");
}

#[test]
fn refused_request_leaves_script_queued_until_cleared() {
	let doc = MemoryDocument::new("abc");
	let store = TextStore::new(StoreConfig::default(), doc.hooks());
	let sink = RecordingSink::new();
	sink.push_grant(|_, _| Ok(()));
	assert!(store.request_lock(LockFlags::READ).is_err());
	assert_eq!(sink.pending_scripts(), 1);
	assert_eq!(sink.clear_scripts(), 1);
	assert_eq!(sink.pending_scripts(), 0);
}

#[test]
fn grant_without_script_succeeds() {
	let doc = MemoryDocument::new("");
	let (store, sink) = advised(&doc);
	let outcome = store.request_lock(LockFlags::READ).unwrap();
	assert!(matches!(outcome, acpstore::SessionResult::Granted(Ok(()))));
	assert_eq!(sink.take_events(), vec![SinkEvent::LockGranted(LockFlags::READ)]);
	assert!(sink.events().is_empty());
}

#[test]
fn notifications_are_recorded() {
	let doc = MemoryDocument::new("abc");
	let (store, sink) = advised(&doc);
	let change = doc.edit(3..3, "d");
	store.notify_text_changed(change);
	store.notify_selection_changed();
	assert_eq!(
		sink.events(),
		vec![
			SinkEvent::TextChange(change),
			SinkEvent::LayoutChange(LayoutCode::Changed, ViewCookie(1)),
			SinkEvent::SelectionChange,
		]
	);
}

#[test]
fn display_is_one_line_per_event() {
	let events = [
		SinkEvent::TextChange(TextChange::new(5, 5, 11)),
		SinkEvent::SelectionChange,
		SinkEvent::Note("read \"hi\"".into()),
	];
	let lines: Vec<String> = events.iter().map(ToString::to_string).collect();
	assert_eq!(
		lines,
		vec!["text change 5..5 -> 11", "selection change", "read \"hi\""]
	);
}
