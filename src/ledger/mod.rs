//! Ledger layer - the operation supplier behind every transaction
//!
//! The Ledger actor owns the single [`TransactionFlow`](crate::transaction::TransactionFlow),
//! runs requested actions through it and reports outcomes back to the app.

pub mod actor;
pub mod mock;

pub use actor::LedgerActor;
pub use mock::MockLedger;

use async_trait::async_trait;

use crate::transaction::{Receipt, TxOutcome};

/// Errors a ledger can report for an operation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    /// Wallet or chain refused the operation
    #[error("{reason}")]
    Rejected { reason: String },

    #[error("wallet not connected")]
    WalletNotConnected,

    #[error("unknown asset: {0}")]
    UnknownAsset(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

/// A connected wallet
#[derive(Debug, Clone, PartialEq)]
pub struct WalletSession {
    pub address: String,
    pub chain_id: u64,
    pub balance: f64,
}

impl TxOutcome for WalletSession {
    fn transaction_hash(&self) -> Option<&str> {
        None
    }
}

/// Chain-facing operations used by the app
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn connect_wallet(&self) -> Result<WalletSession, LedgerError>;

    async fn purchase_tokens(&self, property_id: &str, tokens: u32) -> Result<Receipt, LedgerError>;

    async fn start_earning(&self, opportunity_id: &str, amount: f64) -> Result<Receipt, LedgerError>;

    async fn balance(&self, address: &str) -> Result<f64, LedgerError>;
}
