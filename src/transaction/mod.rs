//! Transaction lifecycle - the state machine behind the status modal
//!
//! A [`TransactionFlow`] tracks one simulated operation at a time and
//! publishes [`TransactionState`] snapshots to whoever renders them.

pub mod flow;
pub mod state;

pub use flow::{FlowTimings, Receipt, RunError, TransactionFlow, TxOutcome};
pub use state::{TransactionState, TxStatus};
