use serde::{Deserialize, Serialize};

/// Wallet session; persisted between runs by [`crate::storage::Storage`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalletStore {
    pub is_connected: bool,
    pub address: Option<String>,
    pub balance: f64,
    pub chain_id: Option<u64>,
}

impl Default for WalletStore {
    fn default() -> Self {
        WalletStore {
            is_connected: false,
            address: None,
            balance: 0.0,
            chain_id: None,
        }
    }
}

impl WalletStore {
    pub fn connect(&mut self, address: impl Into<String>, chain_id: u64) {
        self.is_connected = true;
        self.address = Some(address.into());
        self.chain_id = Some(chain_id);
    }

    pub fn disconnect(&mut self) {
        *self = WalletStore::default();
    }

    pub fn set_balance(&mut self, balance: f64) {
        self.balance = balance;
    }

    /// Short form of the address for the header bar
    pub fn display_address(&self) -> &str {
        self.address.as_deref().unwrap_or("not connected")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_then_disconnect_resets_everything() {
        let mut wallet = WalletStore::default();
        wallet.connect("0xabc", 1);
        wallet.set_balance(4200.5);
        assert!(wallet.is_connected);
        assert_eq!(wallet.chain_id, Some(1));

        wallet.disconnect();
        assert_eq!(wallet, WalletStore::default());
        assert_eq!(wallet.balance, 0.0);
        assert_eq!(wallet.display_address(), "not connected");
    }

    #[test]
    fn test_connect_keeps_balance() {
        let mut wallet = WalletStore::default();
        wallet.set_balance(10.0);
        wallet.connect("0xabc", 5);
        assert_eq!(wallet.balance, 10.0);
    }
}
