//! Render state - data structure sent from App layer to UI for rendering

use crate::app::listing::{EarnFilters, InvestFilters};
use crate::config::Settings;
use crate::messages::ui_events::{InputMode, Page};
use crate::models::{
    ActivityKind, ActivityRecord, ActivityStatus, EarnOpportunity, LiquidationCandidate, Notification,
    Position, Property,
};
use crate::stores::WalletStore;
use crate::transaction::TransactionState;

/// Figures for the dashboard cards
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_supplied: f64,
    pub total_borrowed: f64,
    pub net_apy: f64,
    pub positions: usize,
    pub min_health_factor: Option<u8>,
    pub listed_value: f64,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Navigation
    pub page: Page,
    pub input_mode: InputMode,

    // Wallet
    pub wallet: WalletStore,

    // Dashboard
    pub stats: DashboardStats,
    pub recent_activity: Vec<ActivityRecord>,

    // Invest
    pub listings: Vec<Property>,
    pub invest_filters: InvestFilters,
    pub invest_selected: usize,

    // Property detail
    pub selected_property: Option<Property>,
    pub purchase_quantity: u32,

    // Portfolio
    pub positions: Vec<Position>,
    pub portfolio_selected: usize,

    // Activity
    pub activity: Vec<ActivityRecord>,
    pub activity_status: Option<ActivityStatus>,
    pub activity_kind: Option<ActivityKind>,
    pub activity_selected: usize,

    // Earn
    pub opportunities: Vec<EarnOpportunity>,
    pub earn_filters: EarnFilters,
    pub earn_selected: usize,
    pub stake_amount: String,

    // Liquidations
    pub liquidations: Vec<LiquidationCandidate>,
    pub liquidations_selected: usize,

    // Docs
    pub docs_scroll: u16,

    // Settings
    pub settings: Settings,
    pub settings_selected: usize,
    pub settings_dirty: bool,

    // Popups
    pub notifications: Vec<Notification>,
    pub show_notifications: bool,
    pub show_help: bool,

    // Transaction modal
    pub transaction: TransactionState,
    pub can_retry: bool,

    // Status bar feedback
    pub status_message: Option<String>,
}
