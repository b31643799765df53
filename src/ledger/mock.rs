//! In-memory ledger with random hashes, balances and optional failures

use async_trait::async_trait;
use rand::Rng;

use crate::constants::{MOCK_CHAIN_ID, MOCK_WALLET_ADDRESS};
use crate::ledger::{Ledger, LedgerError, WalletSession};
use crate::transaction::Receipt;

const REJECTION_REASONS: [&str; 2] = ["insufficient funds", "user rejected the request"];

/// `0x` followed by 64 random hex digits
pub fn random_hash() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    let mut hash = String::with_capacity(66);
    hash.push_str("0x");
    for b in bytes {
        hash.push_str(&format!("{:02x}", b));
    }
    hash
}

/// Balance in `[1000, 11000)`
pub fn random_balance() -> f64 {
    let raw: f64 = rand::thread_rng().gen_range(1_000.0..11_000.0);
    (raw * 100.0).round() / 100.0
}

/// Simulated chain; rejects operations with probability `failure_rate`
#[derive(Debug, Clone, Default)]
pub struct MockLedger {
    failure_rate: f64,
}

impl MockLedger {
    pub fn new(failure_rate: f64) -> Self {
        MockLedger {
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    fn maybe_reject(&self) -> Result<(), LedgerError> {
        if self.failure_rate <= 0.0 {
            return Ok(());
        }
        let mut rng = rand::thread_rng();
        if rng.gen_bool(self.failure_rate) {
            let reason = REJECTION_REASONS[rng.gen_range(0..REJECTION_REASONS.len())];
            return Err(LedgerError::Rejected {
                reason: reason.to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn connect_wallet(&self) -> Result<WalletSession, LedgerError> {
        self.maybe_reject()?;
        Ok(WalletSession {
            address: MOCK_WALLET_ADDRESS.to_string(),
            chain_id: MOCK_CHAIN_ID,
            balance: random_balance(),
        })
    }

    async fn purchase_tokens(&self, property_id: &str, tokens: u32) -> Result<Receipt, LedgerError> {
        if property_id.is_empty() {
            return Err(LedgerError::UnknownAsset(property_id.to_string()));
        }
        if tokens == 0 {
            return Err(LedgerError::InvalidAmount(String::from("token amount must be positive")));
        }
        self.maybe_reject()?;
        Ok(Receipt::with_hash(random_hash()))
    }

    async fn start_earning(&self, opportunity_id: &str, amount: f64) -> Result<Receipt, LedgerError> {
        if opportunity_id.is_empty() {
            return Err(LedgerError::UnknownAsset(opportunity_id.to_string()));
        }
        if !(amount.is_finite() && amount > 0.0) {
            return Err(LedgerError::InvalidAmount(format!("{}", amount)));
        }
        self.maybe_reject()?;
        Ok(Receipt::with_hash(random_hash()))
    }

    async fn balance(&self, address: &str) -> Result<f64, LedgerError> {
        if address.is_empty() {
            return Err(LedgerError::WalletNotConnected);
        }
        Ok(random_balance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_hash_shape() {
        let hash = random_hash();
        assert_eq!(hash.len(), 66);
        assert!(hash.starts_with("0x"));
        assert!(hash[2..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash, random_hash());
    }

    #[test]
    fn test_random_balance_range() {
        for _ in 0..100 {
            let b = random_balance();
            assert!((1_000.0..=11_000.0).contains(&b));
        }
    }

    #[tokio::test]
    async fn test_reliable_ledger_never_fails() {
        let ledger = MockLedger::new(0.0);
        let session = ledger.connect_wallet().await.unwrap();
        assert_eq!(session.address, MOCK_WALLET_ADDRESS);
        assert_eq!(session.chain_id, MOCK_CHAIN_ID);
        assert!(ledger.purchase_tokens("1", 5).await.unwrap().hash.is_some());
    }

    #[tokio::test]
    async fn test_always_failing_ledger_rejects() {
        let ledger = MockLedger::new(1.0);
        let err = ledger.start_earning("1", 1000.0).await.unwrap_err();
        assert!(matches!(err, LedgerError::Rejected { .. }));
        assert!(REJECTION_REASONS.contains(&err.to_string().as_str()));
    }

    #[tokio::test]
    async fn test_invalid_inputs_rejected_before_chain() {
        let ledger = MockLedger::new(0.0);
        assert!(matches!(
            ledger.purchase_tokens("1", 0).await,
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            ledger.start_earning("", 10.0).await,
            Err(LedgerError::UnknownAsset(_))
        ));
        assert!(matches!(
            ledger.start_earning("1", -5.0).await,
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[tokio::test]
    async fn test_balance_requires_wallet_address() {
        let ledger = MockLedger::new(0.0);
        assert_eq!(ledger.balance("").await, Err(LedgerError::WalletNotConnected));
        assert!(ledger.balance(MOCK_WALLET_ADDRESS).await.is_ok());
    }
}
