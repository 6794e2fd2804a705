//! Scripted replay of text store lock sessions.
//!
//! A [`Script`] describes an initial document, a store configuration and a sequence of
//! host and engine steps. [`replay`] runs it against an in-memory document and returns
//! the session, whose transcript lists every grant, notification and outcome in order.

pub mod runner;
pub mod script;

pub use runner::{Replay, replay};
pub use script::{Access, Action, CompositionEvent, Notification, Script, Step};
