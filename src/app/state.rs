//! App state - pure data structure with no I/O logic

use crate::app::listing::{EarnFilters, InvestFilters};
use crate::config::Settings;
use crate::data;
use crate::messages::render::DashboardStats;
use crate::messages::ui_events::{InputMode, Page};
use crate::messages::{LedgerAction, RenderState};
use crate::models::{ActivityKind, ActivityStatus, EarnOpportunity, LiquidationCandidate};
use crate::storage::Storage;
use crate::stores::{PortfolioStore, PropertiesStore, UiStore, WalletStore};
use crate::transaction::{TransactionState, TxStatus};

/// Rows shown in the dashboard's recent activity card
const RECENT_ACTIVITY: usize = 5;

/// Main application state
pub struct AppState {
    // Navigation
    pub page: Page,
    pub input_mode: InputMode,

    // Stores
    pub wallet: WalletStore,
    pub portfolio: PortfolioStore,
    pub properties: PropertiesStore,
    pub ui: UiStore,
    pub opportunities: Vec<EarnOpportunity>,

    // Invest page
    pub invest_filters: InvestFilters,
    pub invest_selected: usize,
    pub purchase_quantity: u32,

    // Portfolio and activity pages
    pub portfolio_selected: usize,
    pub activity_status: Option<ActivityStatus>,
    pub activity_kind: Option<ActivityKind>,
    pub activity_selected: usize,

    // Earn page
    pub earn_filters: EarnFilters,
    pub earn_selected: usize,
    /// Raw stake amount as typed
    pub stake_amount: String,

    // Liquidations page
    pub liquidations: Vec<LiquidationCandidate>,
    pub liquidations_selected: usize,

    // Docs page
    pub docs_scroll: u16,

    // Settings page
    pub settings: Settings,
    pub settings_selected: usize,
    pub settings_dirty: bool,

    // Transaction modal, mirrored from the ledger layer
    pub transaction: TransactionState,
    pub last_action: Option<LedgerAction>,

    // Popups
    pub show_help: bool,
    pub show_notifications: bool,

    pub status_message: Option<String>,

    // Persistence
    pub storage: Storage,
}

impl AppState {
    /// Fresh state over the built-in datasets, restoring what `storage` holds
    pub fn new(storage: Storage) -> Self {
        let settings = storage.load_settings();
        let wallet = storage.load_wallet().unwrap_or_default();

        AppState {
            page: Page::Dashboard,
            input_mode: InputMode::Normal,
            wallet,
            portfolio: PortfolioStore::new(data::positions(), data::activity()),
            properties: PropertiesStore::new(data::properties()),
            ui: UiStore::new(settings.theme),
            opportunities: data::opportunities(),
            invest_filters: InvestFilters::default(),
            invest_selected: 0,
            purchase_quantity: 1,
            portfolio_selected: 0,
            activity_status: None,
            activity_kind: None,
            activity_selected: 0,
            earn_filters: EarnFilters::default(),
            earn_selected: 0,
            stake_amount: String::new(),
            liquidations: data::liquidations(),
            liquidations_selected: 0,
            docs_scroll: 0,
            settings,
            settings_selected: 0,
            settings_dirty: false,
            transaction: TransactionState::default(),
            last_action: None,
            show_help: false,
            show_notifications: false,
            status_message: None,
            storage,
        }
    }

    /// Whether the modal currently blocks new actions
    pub fn transaction_in_progress(&self) -> bool {
        self.transaction.is_open && !self.transaction.status.is_terminal()
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total_supplied: self.portfolio.total_supplied(),
            total_borrowed: self.portfolio.total_borrowed(),
            net_apy: self.portfolio.net_apy(),
            positions: self.portfolio.positions.len(),
            min_health_factor: self.portfolio.min_health_factor(),
            listed_value: self.properties.properties.iter().map(|p| p.price).sum(),
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            page: self.page,
            input_mode: self.input_mode,
            wallet: self.wallet.clone(),
            stats: self.stats(),
            recent_activity: self
                .portfolio
                .activity
                .iter()
                .take(RECENT_ACTIVITY)
                .cloned()
                .collect(),
            listings: self
                .invest_filters
                .apply(&self.properties.properties)
                .into_iter()
                .cloned()
                .collect(),
            invest_filters: self.invest_filters.clone(),
            invest_selected: self.invest_selected,
            selected_property: self.properties.selected_property().cloned(),
            purchase_quantity: self.purchase_quantity,
            positions: self.portfolio.positions.clone(),
            portfolio_selected: self.portfolio_selected,
            activity: self
                .portfolio
                .filtered_activity(self.activity_status, self.activity_kind)
                .into_iter()
                .cloned()
                .collect(),
            activity_status: self.activity_status,
            activity_kind: self.activity_kind,
            activity_selected: self.activity_selected,
            opportunities: self
                .earn_filters
                .apply(&self.opportunities)
                .into_iter()
                .cloned()
                .collect(),
            earn_filters: self.earn_filters.clone(),
            earn_selected: self.earn_selected,
            stake_amount: self.stake_amount.clone(),
            liquidations: self.liquidations.clone(),
            liquidations_selected: self.liquidations_selected,
            docs_scroll: self.docs_scroll,
            settings: self.settings.clone(),
            settings_selected: self.settings_selected,
            settings_dirty: self.settings_dirty,
            notifications: self.ui.notifications.clone(),
            show_notifications: self.show_notifications,
            show_help: self.show_help,
            transaction: self.transaction.clone(),
            can_retry: self.transaction.status == TxStatus::Error && self.last_action.is_some(),
            status_message: self.status_message.clone(),
        }
    }
}
