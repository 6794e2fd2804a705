//! Doubles shared by the unit tests.

use std::sync::Arc;

use acpstore_primitives::{
	AdviseMask, AttrId, CharIdx, DynamicStatusFlags, LayoutCode, LockFlags, Point,
	SelectionIndex, TextChange, TextSelection, ViewCookie,
};
use parking_lot::Mutex;

use crate::{HostHooks, Result, SinkId, StoreConfig, TextStore, TextStoreSink};

/// A single-selection string document.
#[derive(Debug, Default)]
pub(crate) struct TestDoc {
	pub(crate) text: Mutex<String>,
	pub(crate) selection: Mutex<TextSelection>,
	pub(crate) inserts: Mutex<Vec<(String, TextSelection)>>,
	pub(crate) compositions: Mutex<Vec<String>>,
}

impl TestDoc {
	pub(crate) fn new(text: &str) -> Arc<Self> {
		let len = text.chars().count();
		Arc::new(Self {
			text: Mutex::new(text.to_string()),
			selection: Mutex::new(TextSelection::point(len)),
			..Default::default()
		})
	}

	pub(crate) fn text(&self) -> String {
		self.text.lock().clone()
	}

	pub(crate) fn hooks(self: &Arc<Self>) -> HostHooks {
		let len_doc = self.clone();
		let str_doc = self.clone();
		let sel_doc = self.clone();
		let set_doc = self.clone();
		let ins_doc = self.clone();
		let start_doc = self.clone();
		let upd_doc = self.clone();
		let end_doc = self.clone();
		HostHooks::new()
			.with_string_length(move || len_doc.text.lock().chars().count())
			.with_string(move |start, len| {
				str_doc.text.lock().chars().skip(start).take(len).collect()
			})
			.with_selections(move |_index: SelectionIndex, _max| vec![*sel_doc.selection.lock()])
			.with_set_selections(move |sels| *set_doc.selection.lock() = sels[0])
			.with_insert_at_selection(move |text, proposed| {
				ins_doc.inserts.lock().push((text.to_string(), proposed));
				let (low, high) = {
					let sel = ins_doc.selection.lock();
					sel.normalized()
				};
				let mut doc = ins_doc.text.lock();
				let chars: Vec<char> = doc.chars().collect();
				let mut out: String = chars[..low].iter().collect();
				out.push_str(text);
				out.extend(&chars[high..]);
				*doc = out;
				let caret = low + text.chars().count();
				let sel = TextSelection::point(caret);
				*ins_doc.selection.lock() = sel;
				Some(sel)
			})
			.with_screen_extent(|| (Point::new(0, 0), Point::new(640, 480)))
			.with_string_extent(|start, end| {
				(
					Point::new(start as i32 * 8, 0),
					Point::new(end as i32 * 8, 16),
				)
			})
			.with_composition_started(move || {
				start_doc.compositions.lock().push("start".into());
				true
			})
			.with_composition_updated(move |start, end| {
				upd_doc.compositions.lock().push(format!("update {start}..{end}"));
			})
			.with_composition_ended(move || end_doc.compositions.lock().push("end".into()))
	}
}

/// Event seen by [`ProbeSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Probe {
	Granted(LockFlags),
	Text(TextChange),
	Selection,
	Layout(LayoutCode, ViewCookie),
	Status(DynamicStatusFlags),
	Attrs(CharIdx, CharIdx, Vec<AttrId>),
}

type GrantFn = dyn Fn(&TextStore, LockFlags) -> Result<()> + Send + Sync;

/// Sink that records events and runs an optional closure inside each grant.
#[derive(Default)]
pub(crate) struct ProbeSink {
	pub(crate) events: Mutex<Vec<Probe>>,
	on_grant: Option<Box<GrantFn>>,
}

impl ProbeSink {
	pub(crate) fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub(crate) fn with_grant(
		f: impl Fn(&TextStore, LockFlags) -> Result<()> + Send + Sync + 'static,
	) -> Arc<Self> {
		Arc::new(Self {
			events: Mutex::new(Vec::new()),
			on_grant: Some(Box::new(f)),
		})
	}

	pub(crate) fn events(&self) -> Vec<Probe> {
		self.events.lock().clone()
	}

	pub(crate) fn grants(&self) -> Vec<LockFlags> {
		self.events
			.lock()
			.iter()
			.filter_map(|e| match e {
				Probe::Granted(flags) => Some(*flags),
				_ => None,
			})
			.collect()
	}
}

impl TextStoreSink for ProbeSink {
	fn on_lock_granted(&self, store: &TextStore, flags: LockFlags) -> Result<()> {
		self.events.lock().push(Probe::Granted(flags));
		match &self.on_grant {
			Some(f) => f(store, flags),
			None => Ok(()),
		}
	}

	fn on_text_change(&self, change: TextChange) {
		self.events.lock().push(Probe::Text(change));
	}

	fn on_selection_change(&self) {
		self.events.lock().push(Probe::Selection);
	}

	fn on_layout_change(&self, code: LayoutCode, view: ViewCookie) {
		self.events.lock().push(Probe::Layout(code, view));
	}

	fn on_status_change(&self, flags: DynamicStatusFlags) {
		self.events.lock().push(Probe::Status(flags));
	}

	fn on_attrs_change(&self, start: CharIdx, end: CharIdx, attrs: &[AttrId]) {
		self.events.lock().push(Probe::Attrs(start, end, attrs.to_vec()));
	}
}

pub(crate) const SINK: SinkId = SinkId(1);

/// A store over `doc` with `sink` advised for every notification.
pub(crate) fn advised_store(doc: &Arc<TestDoc>, sink: Arc<ProbeSink>) -> TextStore {
	advised_store_with(StoreConfig::default(), doc, sink)
}

pub(crate) fn advised_store_with(
	config: StoreConfig,
	doc: &Arc<TestDoc>,
	sink: Arc<ProbeSink>,
) -> TextStore {
	let store = TextStore::new(config, doc.hooks());
	store.advise_sink(SINK, sink, AdviseMask::ALL).unwrap();
	store
}
