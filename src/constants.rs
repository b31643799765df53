//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Application name
pub const APP_NAME: &str = "Lotwise";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory under the home directory holding config and session files
pub const CONFIG_DIR_NAME: &str = ".lotwise";

/// Log file written in the working directory
pub const LOG_FILE_NAME: &str = "lotwise.log";

/// Simulated wallet signature latency
pub const DEFAULT_SIGNING_DELAY_MS: u64 = 1_000;

/// Simulated block confirmation latency
pub const DEFAULT_CONFIRMATION_DELAY_MS: u64 = 3_000;

/// Interval between simulated balance refreshes while connected
pub const DEFAULT_BALANCE_REFRESH_SECS: u64 = 5;

/// Shown when a failed operation carries no message
pub const FALLBACK_TX_ERROR: &str = "Transaction failed";

/// Block explorer prefix for transaction links
pub const EXPLORER_TX_URL: &str = "https://etherscan.io/tx/";

/// Address and chain reported by the mock wallet
pub const MOCK_WALLET_ADDRESS: &str = "0x1234...5678";
pub const MOCK_CHAIN_ID: u64 = 1;

/// Upper bound on kept notifications
pub const MAX_NOTIFICATIONS: usize = 20;
