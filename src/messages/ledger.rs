//! Ledger messages - communication between App and Ledger layers

use crate::transaction::TransactionState;

/// A user-initiated operation that runs through the transaction flow
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerAction {
    ConnectWallet,
    Purchase {
        property_id: String,
        property_name: String,
        symbol: String,
        tokens: u32,
        cost: f64,
    },
    Earn {
        opportunity_id: String,
        opportunity_title: String,
        amount: f64,
    },
}

impl LedgerAction {
    /// Modal title
    pub fn title(&self) -> String {
        match self {
            LedgerAction::ConnectWallet => String::from("Connect Wallet"),
            LedgerAction::Purchase { .. } => String::from("Purchase Property Tokens"),
            LedgerAction::Earn { .. } => String::from("Start Earning"),
        }
    }

    /// Modal description
    pub fn description(&self) -> String {
        match self {
            LedgerAction::ConnectWallet => String::from("Connecting to your Web3 wallet"),
            LedgerAction::Purchase {
                property_name,
                tokens,
                ..
            } => format!("Purchasing {} tokens for {}", tokens, property_name),
            LedgerAction::Earn {
                opportunity_title, ..
            } => format!("Starting to earn with {}", opportunity_title),
        }
    }
}

/// Commands sent from App layer to Ledger layer
#[derive(Debug, Clone)]
pub enum LedgerCommand {
    /// Run an action through the transaction flow
    Execute(LedgerAction),
    /// Resume balance refreshes for a session restored from disk
    ResumeSession { address: String },
    /// Forget the connected wallet
    DisconnectWallet,
    /// Hide the transaction modal
    CloseTransaction,
    /// Shutdown the ledger actor
    Shutdown,
}

/// Responses sent from Ledger layer to App layer
#[derive(Debug, Clone)]
pub enum LedgerResponse {
    /// Snapshot after every transaction transition
    Transaction(TransactionState),
    WalletConnected {
        address: String,
        chain_id: u64,
        balance: f64,
    },
    WalletDisconnected,
    BalanceUpdated {
        balance: f64,
    },
    Purchased {
        property_id: String,
        tokens: u32,
        cost: f64,
        hash: Option<String>,
    },
    Staked {
        opportunity_id: String,
        amount: f64,
        hash: Option<String>,
    },
    /// The operation failed; the flow already shows the message
    Failed {
        action: LedgerAction,
        message: String,
    },
    /// Rejected because another transaction is still running
    Busy {
        action: LedgerAction,
    },
}
