//! State containers owned by the app layer
//!
//! Each store is a plain struct with explicit update methods. The app state
//! owns one of each and hands out references; nothing is global.

pub mod portfolio;
pub mod properties;
pub mod ui;
pub mod wallet;

pub use portfolio::PortfolioStore;
pub use properties::PropertiesStore;
pub use ui::UiStore;
pub use wallet::WalletStore;

/// Errors raised by store updates
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("unknown property: {0}")]
    UnknownProperty(String),

    #[error("unknown position: {0}")]
    UnknownPosition(String),

    #[error("only {available} tokens available, requested {requested}")]
    InsufficientTokens { requested: u32, available: u32 },
}
