//! Executes a [`Script`] against a [`MemoryDocument`].
//!
//! Everything the sink observes lands in one ordered transcript, interleaved with notes
//! describing each step and its outcome. Notes written inside a grant are indented by
//! nesting depth.

use std::sync::Arc;

use acpstore::{SessionResult, SinkId, TextStore};
use acpstore_memdoc::{MemoryDocument, RecordingSink, SinkEvent};
use acpstore_primitives::{
	AcpSelection, ActiveSelEnd, AttrRequestFlags, InsertFlags, LockFlags, SelectionIndex,
	SetTextFlags, TextSelection,
};

use crate::script::{Action, CompositionEvent, Notification, Script, Step};


/// A live replay session.
#[derive(Debug)]
pub struct Replay {
	doc: Arc<MemoryDocument>,
	store: TextStore,
	sink: Arc<RecordingSink>,
}

impl Replay {
	/// Builds the document and store described by `script` without running any step.
	pub fn new(script: &Script) -> Self {
		let doc = MemoryDocument::new(&script.text);
		let store = TextStore::new(script.config.clone(), doc.hooks());
		Self {
			doc,
			store,
			sink: Arc::new(RecordingSink::new()),
		}
	}

	pub fn document(&self) -> &MemoryDocument {
		&self.doc
	}

	pub fn store(&self) -> &TextStore {
		&self.store
	}

	/// Everything recorded so far.
	pub fn transcript(&self) -> Vec<SinkEvent> {
		self.sink.events()
	}

	/// Runs `steps` in order. Failures are recorded, never fatal.
	pub fn run(&self, steps: &[Step]) {
		for (index, step) in steps.iter().enumerate() {
			tracing::debug!(index, ?step, "replay step");
			self.step(step);
		}
	}

	fn step(&self, step: &Step) {
		let note = |line: String| self.sink.note(line);
		match step {
			Step::Advise { sink, notify } => {
				let id = SinkId(*sink);
				let mask = Notification::mask(notify);
				let outcome = self.store.advise_sink(id, self.sink.clone(), mask);
				note(format!("advise {id} {mask:?}: {}", status(outcome)));
			}
			Step::Unadvise { sink } => {
				let id = SinkId(*sink);
				note(format!("unadvise {id}: {}", status(self.store.unadvise_sink(id))));
			}
			Step::Lock {
				access,
				sync,
				grant,
			} => {
				let flags = access.flags(*sync);
				note(format!("request_lock {flags:?}"));
				self.sink
					.push_grant(grant_script(self.sink.clone(), grant.clone(), 1));
				let outcome = self.store.request_lock(flags);
				let granted = matches!(outcome, Ok(SessionResult::Granted(_)));
				note(format!("-> {}", describe(outcome)));
				if !granted {
					self.sink.clear_scripts();
				}
			}
			Step::HostEdit { start, end, text } => {
				let change = self.doc.edit(*start..*end, text);
				note(format!("host edit {start}..{end} {text:?}"));
				self.store.notify_text_changed(change);
			}
			Step::HostInsert { text } => {
				note(format!("host insert {text:?}"));
				if let Err(e) = self.store.insert_text(text) {
					note(format!("-> error: {e}"));
				}
			}
			Step::HostSelect { start, end } => {
				self.doc.select(&[TextSelection::new(*start, *end)]);
				note(format!("host select {start}..{end}"));
				self.store.notify_selection_changed();
			}
			Step::HostReplace { text } => {
				let change = self.doc.replace_all(text);
				note(format!("host replace {text:?}"));
				self.store
					.notify_document_replaced(change.old_end, change.new_end);
			}
			Step::ReadOnly { value } => {
				self.doc.set_read_only(*value);
				note(format!("read_only {value}"));
				self.store.notify_status_changed();
			}
			Step::Loading { value } => {
				self.doc.set_loading(*value);
				note(format!("loading {value}"));
				self.store.notify_status_changed();
			}
			Step::AttrsChanged { start, end, attrs } => {
				note(format!("attrs changed {start}..{end}"));
				self.store.notify_attrs_changed(*start, *end, attrs);
			}
			Step::RequestAttrs { attrs, want_value } => {
				let flags = if *want_value {
					AttrRequestFlags::FIND_WANT_VALUE
				} else {
					AttrRequestFlags::empty()
				};
				self.store.request_supported_attrs(flags, attrs);
				note(format!("request attrs {} {flags:?}", attrs.len()));
			}
			Step::RetrieveAttrs { max } => {
				let values = self.store.retrieve_requested_attrs(*max);
				note(format!("retrieve attrs max {max}: {} values", values.len()));
				for value in values {
					note(format!("  {} = {:?}", value.attribute_id, value.value));
				}
			}
			Step::Composition { event, start, end } => match event {
				CompositionEvent::Start => {
					let ok = self.store.on_start_composition();
					note(format!("composition start: {ok}"));
				}
				CompositionEvent::Update => {
					let range = start.zip(*end).map(|(start, end)| start..end);
					note(format!("composition update {range:?}"));
					self.store.on_update_composition(range);
				}
				CompositionEvent::End => {
					note("composition end".to_string());
					self.store.on_end_composition();
				}
			},
			Step::Status => {
				let status = self.store.get_status();
				note(format!(
					"status {:?} {:?}",
					status.dynamic_flags, status.static_flags
				));
			}
		}
	}
}

/// Builds a script, runs all of its steps, and returns the finished session.
pub fn replay(script: &Script) -> Replay {
	let session = Replay::new(script);
	session.run(&script.steps);
	session
}

fn grant_script(
	sink: Arc<RecordingSink>,
	actions: Vec<Action>,
	depth: usize,
) -> impl FnOnce(&TextStore, LockFlags) -> acpstore::Result<()> + Send + 'static {
	move |store, _flags| run_actions(store, &sink, &actions, depth)
}

fn run_actions(
	store: &TextStore,
	sink: &Arc<RecordingSink>,
	actions: &[Action],
	depth: usize,
) -> acpstore::Result<()> {
	let indent = "  ".repeat(depth);
	for action in actions {
		let line = match action {
			Action::GetText { start, end, max } => {
				report("get_text", store.get_text(*start, *end, *max), |read| {
					format!("{:?} next {}", read.text, read.next_unread)
				})
			}
			Action::GetSelection { index, max } => {
				let index = index.map_or(SelectionIndex::Default, SelectionIndex::At);
				report("get_selection", store.get_selection(index, *max), |sels| {
					sels.iter()
						.map(|sel| format!("{}..{} {:?}", sel.start, sel.end, sel.style.active_end))
						.collect::<Vec<_>>()
						.join(", ")
				})
			}
			Action::SetSelection {
				start,
				end,
				active_start,
			} => {
				let active = if *active_start {
					ActiveSelEnd::Start
				} else {
					ActiveSelEnd::End
				};
				let sel = AcpSelection::new(*start, *end).with_active_end(active);
				report("set_selection", store.set_selection(&[sel]), |()| "ok".into())
			}
			Action::Insert { text, query_only } => {
				let flags = if *query_only {
					InsertFlags::QUERY_ONLY
				} else {
					InsertFlags::empty()
				};
				report("insert", store.insert_text_at_selection(flags, text), |out| {
					format!(
						"{}..{} change {}..{} -> {}",
						out.start, out.end, out.change.start, out.change.old_end, out.change.new_end
					)
				})
			}
			Action::SetText { start, end, text } => report(
				"set_text",
				store.set_text(SetTextFlags::empty(), *start, *end, text),
				|change| format!("{}..{} -> {}", change.start, change.old_end, change.new_end),
			),
			Action::QueryInsert { start, end, len } => {
				report("query_insert", store.query_insert(*start, *end, *len), |(s, e)| {
					format!("{s}..{e}")
				})
			}
			Action::EndAcp => report("end_acp", store.get_end_acp(), |end| end.to_string()),
			Action::TextExtent { start, end } => report(
				"text_extent",
				store.get_text_extent(store.active_view(), *start, *end),
				|(rect, clipped)| format!("{rect:?} clipped {clipped}"),
			),
			Action::ScreenExtent => report(
				"screen_extent",
				store.get_screen_extent(store.active_view()),
				|rect| format!("{rect:?}"),
			),
			Action::RequestLock {
				access,
				sync,
				grant,
			} => {
				let flags = access.flags(*sync);
				let outcome = store.request_lock(flags);
				if matches!(outcome, Ok(SessionResult::AsyncPending)) {
					sink.push_grant(grant_script(sink.clone(), grant.clone(), depth + 1));
				}
				format!("request_lock {flags:?}: {}", describe(outcome))
			}
			Action::NotifySelection => {
				store.notify_selection_changed();
				"notify_selection".to_string()
			}
			Action::Fail { message } => {
				sink.note(format!("{indent}fail {message:?}"));
				return Err(acpstore::Error::InternalFailure(message.clone()));
			}
		};
		sink.note(format!("{indent}{line}"));
	}
	Ok(())
}

fn report<T>(name: &str, result: acpstore::Result<T>, ok: impl FnOnce(T) -> String) -> String {
	match result {
		Ok(value) => format!("{name}: {}", ok(value)),
		Err(e) => format!("{name}: {:?} ({e})", e.kind()),
	}
}

fn status(result: acpstore::Result<()>) -> String {
	match result {
		Ok(()) => "ok".to_string(),
		Err(e) => format!("{:?} ({e})", e.kind()),
	}
}

fn describe(result: acpstore::Result<SessionResult>) -> String {
	match result {
		Ok(SessionResult::Granted(Ok(()))) => "granted".to_string(),
		Ok(SessionResult::Granted(Err(e))) => format!("granted, callback failed ({e})"),
		Ok(SessionResult::SynchronousLockFailed) => "SynchronousLockFailed".to_string(),
		Ok(SessionResult::AsyncPending) => "AsyncPending".to_string(),
		Err(e) => format!("{:?} ({e})", e.kind()),
	}
}
