//! Transaction state - the data shown by the status surface

/// Phase of a transaction flow
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TxStatus {
    #[default]
    Signing,
    Pending,
    Success,
    Error,
}

impl TxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Signing => "signing",
            TxStatus::Pending => "pending",
            TxStatus::Success => "success",
            TxStatus::Error => "error",
        }
    }

    /// Terminal phases never advance on their own
    pub fn is_terminal(&self) -> bool {
        matches!(self, TxStatus::Success | TxStatus::Error)
    }
}

/// Snapshot of one transaction flow
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransactionState {
    pub is_open: bool,
    pub status: TxStatus,
    pub transaction_hash: Option<String>,
    pub error_message: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl TransactionState {
    /// Whether the surface may be dismissed by the user
    pub fn can_close(&self) -> bool {
        self.status.is_terminal()
    }

    /// Hash to display; hidden while still waiting for a signature
    pub fn visible_hash(&self) -> Option<&str> {
        match self.status {
            TxStatus::Signing => None,
            _ => self.transaction_hash.as_deref(),
        }
    }
}
