//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and Ledger layers.

pub mod ledger;
pub mod render;
pub mod ui_events;

pub use ledger::{LedgerAction, LedgerCommand, LedgerResponse};
pub use render::RenderState;
pub use ui_events::UiEvent;
