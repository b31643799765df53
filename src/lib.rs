//! # Lotwise
//!
//! A terminal dashboard for fractional, tokenized real-estate investing.
//!
//! ## Features
//! - Property listings with search, filters and sorting
//! - Token purchases and yield staking through a wallet transaction flow
//! - Portfolio positions, activity history and JSON export
//! - Persistent settings and wallet session
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Ledger Layer (Tokio runtime) - owns the [`TransactionFlow`]

pub mod app;
pub mod config;
pub mod constants;
pub mod data;
pub mod ledger;
pub mod messages;
pub mod models;
pub mod storage;
pub mod stores;
pub mod transaction;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::Settings;
pub use ledger::{Ledger, LedgerActor, LedgerError, MockLedger};
pub use messages::{LedgerAction, LedgerCommand, LedgerResponse, RenderState, UiEvent};
pub use storage::Storage;
pub use transaction::{FlowTimings, Receipt, RunError, TransactionFlow, TransactionState, TxStatus};
