//! Document session: state, sink registration and status queries.
//!
//! The operation families live in sibling modules:
//! - [`lock`]: grant/refusal/queueing of document locks
//! - [`edit`]: text and selection operations gated on the held lock
//! - [`notify`]: host-initiated change notifications
//! - [`attrs`]: out-of-band attribute negotiation
//! - [`composition`]: composition lifecycle relay
//! - [`display_attrs`]: display-attribute span enumeration

use std::fmt;
use std::sync::Arc;

use acpstore_primitives::{
	AdviseMask, AttrId, AttrValue, DocumentStatus, DynamicStatusFlags, StaticStatusFlags,
	ViewCookie,
};
use parking_lot::Mutex;

use crate::atoms::{AtomTable, DisplayAttributeProvider, GuidAtoms, PropertySource};
use crate::config::StoreConfig;
use crate::hooks::HostHooks;
use crate::sink::{SinkId, TextStoreSink};
use crate::{Error, Result};

mod attrs;
mod composition;
mod display_attrs;
mod edit;
mod lock;
mod notify;


pub use attrs::{AttrRecordFlags, AttributeRecord, AttributeTable};
pub use display_attrs::DisplayAttributes;
pub use edit::{InsertOutcome, TextRead};
pub use lock::{LockGuard, LockState, SessionResult};

/// The registered observer plus its notification mask and optional services.
#[derive(Clone)]
pub(crate) struct SinkRegistration {
	pub(crate) id: SinkId,
	pub(crate) sink: Arc<dyn TextStoreSink>,
	pub(crate) mask: AdviseMask,
	pub(crate) services: Option<Arc<dyn PropertySource>>,
}

/// Everything guarded by the session's critical section.
pub(crate) struct SessionState {
	pub(crate) lock: LockState,
	pub(crate) pending_upgrade: bool,
	pub(crate) sink: Option<SinkRegistration>,
	pub(crate) attributes: AttributeTable,
}

/// One document session.
///
/// All mutable session state sits behind a single mutex that is never held while
/// the sink or a host hook runs, so both may call back into the store.
pub struct TextStore {
	config: StoreConfig,
	hooks: HostHooks,
	atoms: Arc<dyn GuidAtoms>,
	display_attributes: Option<Arc<dyn DisplayAttributeProvider>>,
	state: Mutex<SessionState>,
}

impl TextStore {
	/// Creates a session with a private atom table and no display-attribute provider.
	pub fn new(config: StoreConfig, hooks: HostHooks) -> Self {
		Self::with_collaborators(config, hooks, Arc::new(AtomTable::new()), None)
	}

	/// Creates a session with explicit atom and display-attribute collaborators.
	///
	/// Attribute defaults given as GUIDs are registered in `atoms` here.
	pub fn with_collaborators(
		config: StoreConfig,
		hooks: HostHooks,
		atoms: Arc<dyn GuidAtoms>,
		display_attributes: Option<Arc<dyn DisplayAttributeProvider>>,
	) -> Self {
		let attributes = AttributeTable::from_config(&config.attributes, atoms.as_ref());
		tracing::debug!(
			attributes = attributes.len(),
			multi_selection = config.allow_multi_selection,
			"text store created"
		);
		Self {
			config,
			hooks,
			atoms,
			display_attributes,
			state: Mutex::new(SessionState {
				lock: LockState::Unlocked,
				pending_upgrade: false,
				sink: None,
				attributes,
			}),
		}
	}

	/// The session configuration.
	pub fn config(&self) -> &StoreConfig {
		&self.config
	}

	/// The host hooks.
	pub fn hooks(&self) -> &HostHooks {
		&self.hooks
	}

	/// The atom table used for attribute defaults and display attributes.
	pub fn atoms(&self) -> &Arc<dyn GuidAtoms> {
		&self.atoms
	}

	/// Registers `sink`, or updates the mask if `id` is already advised.
	///
	/// Re-advising keeps the registered sink object and services.
	pub fn advise_sink(
		&self,
		id: SinkId,
		sink: Arc<dyn TextStoreSink>,
		mask: AdviseMask,
	) -> Result<()> {
		self.advise_sink_with_services(id, sink, mask, None)
	}

	/// Like [`Self::advise_sink`], also supplying the property source used by
	/// [`Self::enumerate_attributes`].
	pub fn advise_sink_with_services(
		&self,
		id: SinkId,
		sink: Arc<dyn TextStoreSink>,
		mask: AdviseMask,
		services: Option<Arc<dyn PropertySource>>,
	) -> Result<()> {
		let mut guard = self.state.lock();
		let state = &mut *guard;
		match &mut state.sink {
			Some(reg) if reg.id == id => {
				tracing::debug!(%id, ?mask, "sink mask updated");
				reg.mask = mask;
				Ok(())
			}
			Some(reg) => {
				tracing::debug!(%id, active = %reg.id, "advise rejected");
				Err(Error::AlreadyAdvised)
			}
			None => {
				tracing::debug!(%id, ?mask, services = services.is_some(), "sink advised");
				state.sink = Some(SinkRegistration {
					id,
					sink,
					mask,
					services,
				});
				Ok(())
			}
		}
	}

	/// Removes the registration for `id`.
	pub fn unadvise_sink(&self, id: SinkId) -> Result<()> {
		let mut state = self.state.lock();
		match state.sink.as_ref().map(|reg| reg.id) {
			Some(advised) if advised == id => {
				state.sink = None;
				tracing::debug!(%id, "sink unadvised");
				Ok(())
			}
			_ => Err(Error::NotAdvised),
		}
	}

	/// The advised sink id, if any.
	pub fn advised_sink(&self) -> Option<SinkId> {
		self.state.lock().sink.as_ref().map(|reg| reg.id)
	}

	/// The advised sink's notification mask.
	pub fn advise_mask(&self) -> Option<AdviseMask> {
		self.state.lock().sink.as_ref().map(|reg| reg.mask)
	}

	/// Current document status. Requires no lock.
	pub fn get_status(&self) -> DocumentStatus {
		let mut dynamic_flags = DynamicStatusFlags::empty();
		if self.hooks.is_read_only().unwrap_or(false) {
			dynamic_flags |= DynamicStatusFlags::READ_ONLY;
		}
		if self.hooks.is_loading().unwrap_or(false) {
			dynamic_flags |= DynamicStatusFlags::LOADING;
		}
		let mut static_flags = StaticStatusFlags::REGIONS;
		if self.config.allow_multi_selection {
			static_flags |= StaticStatusFlags::DISJOINT_SELECTION;
		}
		DocumentStatus {
			dynamic_flags,
			static_flags,
		}
	}

	/// The view the engine should address geometry queries to.
	pub fn active_view(&self) -> ViewCookie {
		ViewCookie(self.config.active_view)
	}

	/// Snapshot of the negotiation record for `id`.
	pub fn attribute(&self, id: AttrId) -> Option<AttributeRecord> {
		self.state.lock().attributes.get(id).cloned()
	}

	/// Replaces the current value of a supported attribute.
	///
	/// Returns false if the attribute is not in the table.
	pub fn set_attribute_value(&self, id: AttrId, value: AttrValue) -> bool {
		self.state.lock().attributes.set_current(id, value)
	}

	pub(crate) fn sink_registration(&self) -> Option<SinkRegistration> {
		self.state.lock().sink.clone()
	}
}

impl fmt::Debug for TextStore {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.lock();
		f.debug_struct("TextStore")
			.field("config", &self.config)
			.field("lock", &state.lock)
			.field("pending_upgrade", &state.pending_upgrade)
			.field("sink", &state.sink.as_ref().map(|reg| (reg.id, reg.mask)))
			.field("hooks", &self.hooks)
			.finish_non_exhaustive()
	}
}
