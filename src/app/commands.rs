//! Command handlers - business logic for processing UI events and ledger responses

use crate::app::listing::{
    cycle_filter, LISTING_STATUSES, PROPERTY_TYPES, RISK_LEVELS, STRATEGIES,
};
use crate::app::earn::parse_stake_amount;
use crate::app::AppState;
use crate::config::NotificationPref;
use crate::messages::ui_events::{InputMode, Page};
use crate::messages::{LedgerAction, LedgerCommand, LedgerResponse};
use crate::models::{format_usd, ActivityKind, ActivityStatus, ListingStatus, NotificationKind};
use crate::transaction::TxStatus;

/// Theme row plus one row per notification preference
const SETTINGS_ROWS: usize = 1 + NotificationPref::ALL.len();

const ACTIVITY_KINDS: [ActivityKind; 5] = [
    ActivityKind::Purchase,
    ActivityKind::Sale,
    ActivityKind::Yield,
    ActivityKind::Stake,
    ActivityKind::Connect,
];
const ACTIVITY_STATUSES: [ActivityStatus; 3] = [
    ActivityStatus::Completed,
    ActivityStatus::Pending,
    ActivityStatus::Failed,
];

fn step_down(selected: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (selected + 1).min(len - 1)
    }
}

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn switch_page(&mut self, page: Page) {
        self.page = page;
        self.input_mode = InputMode::Normal;
        self.status_message = None;
    }

    pub fn next_page(&mut self) {
        self.switch_page(self.page.next());
    }

    pub fn prev_page(&mut self) {
        self.switch_page(self.page.prev());
    }

    pub fn select_next(&mut self) {
        match self.page {
            Page::Invest => {
                let len = self.invest_filters.apply(&self.properties.properties).len();
                self.invest_selected = step_down(self.invest_selected, len);
            }
            Page::Portfolio => {
                self.portfolio_selected =
                    step_down(self.portfolio_selected, self.portfolio.positions.len());
            }
            Page::Activity => {
                let len = self
                    .portfolio
                    .filtered_activity(self.activity_status, self.activity_kind)
                    .len();
                self.activity_selected = step_down(self.activity_selected, len);
            }
            Page::Earn => {
                let len = self.earn_filters.apply(&self.opportunities).len();
                self.earn_selected = step_down(self.earn_selected, len);
            }
            Page::Liquidations => {
                self.liquidations_selected =
                    step_down(self.liquidations_selected, self.liquidations.len());
            }
            Page::Docs => {
                self.docs_scroll = self.docs_scroll.saturating_add(1);
            }
            Page::Settings => {
                self.settings_selected = step_down(self.settings_selected, SETTINGS_ROWS);
            }
            Page::Dashboard | Page::Property => {}
        }
    }

    pub fn select_prev(&mut self) {
        let selected = match self.page {
            Page::Invest => &mut self.invest_selected,
            Page::Portfolio => &mut self.portfolio_selected,
            Page::Activity => &mut self.activity_selected,
            Page::Earn => &mut self.earn_selected,
            Page::Liquidations => &mut self.liquidations_selected,
            Page::Settings => &mut self.settings_selected,
            Page::Docs => {
                self.docs_scroll = self.docs_scroll.saturating_sub(1);
                return;
            }
            Page::Dashboard | Page::Property => return,
        };
        *selected = selected.saturating_sub(1);
    }

    /// Open the highlighted listing on the property page
    pub fn open_selected(&mut self) {
        if self.page != Page::Invest {
            return;
        }
        let id = self
            .invest_filters
            .apply(&self.properties.properties)
            .get(self.invest_selected)
            .map(|p| p.id.clone());
        if let Some(id) = id {
            if self.properties.select(&id).is_ok() {
                self.purchase_quantity = 1;
                self.switch_page(Page::Property);
            }
        }
    }

    pub fn back(&mut self) {
        if self.page == Page::Property {
            self.properties.clear_selection();
            self.switch_page(Page::Invest);
        }
    }

    // ========================
    // Text input
    // ========================

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    /// Type a stake amount for the highlighted pool
    pub fn edit_amount(&mut self) {
        if self.page == Page::Earn {
            self.input_mode = InputMode::Editing;
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn enter_char(&mut self, c: char) {
        if self.page == Page::Earn {
            self.stake_amount.push(c);
        } else {
            self.invest_filters.query.push(c);
            self.invest_selected = 0;
        }
    }

    pub fn delete_char(&mut self) {
        if self.page == Page::Earn {
            self.stake_amount.pop();
        } else {
            self.invest_filters.query.pop();
            self.invest_selected = 0;
        }
    }

    // ========================
    // Filters
    // ========================

    pub fn cycle_type_filter(&mut self) {
        if self.page == Page::Invest {
            self.invest_filters.property_type =
                cycle_filter(self.invest_filters.property_type, &PROPERTY_TYPES);
            self.invest_selected = 0;
        }
    }

    pub fn cycle_status_filter(&mut self) {
        match self.page {
            Page::Invest => {
                self.invest_filters.status = cycle_filter(self.invest_filters.status, &LISTING_STATUSES);
                self.invest_selected = 0;
            }
            Page::Activity => {
                self.activity_status = cycle_filter(self.activity_status, &ACTIVITY_STATUSES);
                self.activity_selected = 0;
            }
            _ => {}
        }
    }

    pub fn cycle_kind_filter(&mut self) {
        self.activity_kind = cycle_filter(self.activity_kind, &ACTIVITY_KINDS);
        self.activity_selected = 0;
    }

    pub fn cycle_sort(&mut self) {
        match self.page {
            Page::Invest => {
                self.invest_filters.sort = self.invest_filters.sort.next();
                self.invest_selected = 0;
            }
            Page::Earn => {
                self.earn_filters.sort = self.earn_filters.sort.next();
                self.earn_selected = 0;
            }
            _ => {}
        }
    }

    pub fn cycle_risk_filter(&mut self) {
        self.earn_filters.risk = cycle_filter(self.earn_filters.risk, &RISK_LEVELS);
        self.earn_selected = 0;
    }

    pub fn cycle_strategy_filter(&mut self) {
        self.earn_filters.strategy = cycle_filter(self.earn_filters.strategy, &STRATEGIES);
        self.earn_selected = 0;
    }

    // ========================
    // Purchase quantity
    // ========================

    pub fn increase_quantity(&mut self) {
        let available = self
            .properties
            .selected_property()
            .map(|p| p.available_tokens)
            .unwrap_or(0);
        if self.purchase_quantity < available {
            self.purchase_quantity += 1;
        }
    }

    pub fn decrease_quantity(&mut self) {
        self.purchase_quantity = self.purchase_quantity.saturating_sub(1).max(1);
    }

    // ========================
    // Transactions
    // ========================

    fn begin_action(&mut self, action: LedgerAction) -> Option<LedgerCommand> {
        if self.transaction_in_progress() {
            self.ui
                .add_notification("Another transaction is in progress", NotificationKind::Info);
            return None;
        }
        self.last_action = Some(action.clone());
        Some(LedgerCommand::Execute(action))
    }

    fn require_wallet(&mut self) -> bool {
        if !self.wallet.is_connected {
            self.ui
                .add_notification("Connect your wallet first (press 'w')", NotificationKind::Error);
        }
        self.wallet.is_connected
    }

    pub fn connect_wallet(&mut self) -> Option<LedgerCommand> {
        if self.wallet.is_connected {
            self.ui.add_notification("Wallet already connected", NotificationKind::Info);
            return None;
        }
        self.begin_action(LedgerAction::ConnectWallet)
    }

    pub fn disconnect_wallet(&mut self) -> Option<LedgerCommand> {
        if !self.wallet.is_connected {
            return None;
        }
        self.wallet.disconnect();
        if let Err(e) = self.storage.clear_wallet() {
            tracing::warn!(error = %e, "Failed to clear wallet session");
        }
        self.ui.add_notification("Wallet disconnected", NotificationKind::Info);
        Some(LedgerCommand::DisconnectWallet)
    }

    pub fn buy_tokens(&mut self) -> Option<LedgerCommand> {
        if !self.require_wallet() {
            return None;
        }
        let property = self.properties.selected_property()?.clone();
        if property.status != ListingStatus::Active {
            self.ui.add_notification(
                format!("{} is not open for purchase", property.name),
                NotificationKind::Error,
            );
            return None;
        }
        let tokens = self.purchase_quantity;
        if tokens == 0 || tokens > property.available_tokens {
            self.ui.add_notification(
                format!("Only {} tokens available", property.available_tokens),
                NotificationKind::Error,
            );
            return None;
        }
        self.begin_action(LedgerAction::Purchase {
            symbol: property.symbol(),
            property_id: property.id,
            property_name: property.name,
            tokens,
            cost: f64::from(tokens) * property.token_price,
        })
    }

    pub fn start_earning(&mut self) -> Option<LedgerCommand> {
        if !self.require_wallet() {
            return None;
        }
        let opportunity = self
            .earn_filters
            .apply(&self.opportunities)
            .get(self.earn_selected)
            .map(|o| (o.id.clone(), o.title.clone(), o.min_investment))?;
        let (opportunity_id, opportunity_title, minimum) = opportunity;
        let amount = match parse_stake_amount(&self.stake_amount, minimum) {
            Ok(amount) => amount,
            Err(e) => {
                self.ui.add_notification(e.to_string(), NotificationKind::Error);
                return None;
            }
        };
        self.begin_action(LedgerAction::Earn {
            opportunity_id,
            opportunity_title,
            amount,
        })
    }

    pub fn close_transaction(&mut self) -> Option<LedgerCommand> {
        if !self.transaction.is_open || !self.transaction.can_close() {
            return None;
        }
        // Hide locally right away; the ledger's snapshot confirms it
        self.transaction.is_open = false;
        Some(LedgerCommand::CloseTransaction)
    }

    /// Rerun the last action after a failure
    pub fn retry_transaction(&mut self) -> Option<LedgerCommand> {
        if self.transaction.status != TxStatus::Error {
            return None;
        }
        let action = self.last_action.clone()?;
        tracing::info!(action = ?action, "Retrying transaction");
        self.begin_action(action)
    }

    // ========================
    // Ledger responses
    // ========================

    pub fn handle_response(&mut self, response: LedgerResponse) {
        match response {
            LedgerResponse::Transaction(state) => self.transaction = state,

            LedgerResponse::WalletConnected {
                address,
                chain_id,
                balance,
            } => {
                self.wallet.connect(address, chain_id);
                self.wallet.set_balance(balance);
                self.persist_wallet();
                self.ui.add_notification("Wallet connected", NotificationKind::Success);
            }

            LedgerResponse::WalletDisconnected => {}

            LedgerResponse::BalanceUpdated { balance } => {
                if self.wallet.is_connected {
                    self.wallet.set_balance(balance);
                    self.persist_wallet();
                }
            }

            LedgerResponse::Purchased {
                property_id,
                tokens,
                cost,
                hash,
            } => self.apply_purchase(&property_id, tokens, cost, hash),

            LedgerResponse::Staked {
                opportunity_id,
                amount,
                hash,
            } => self.apply_stake(&opportunity_id, amount, hash),

            LedgerResponse::Failed { action, message } => {
                match &action {
                    LedgerAction::Purchase { symbol, tokens, cost, .. } => {
                        self.portfolio.record_activity(
                            ActivityKind::Purchase,
                            symbol.clone(),
                            format!("{} tokens", tokens),
                            *cost,
                            ActivityStatus::Failed,
                            None,
                        );
                    }
                    LedgerAction::Earn { opportunity_title, amount, .. } => {
                        self.portfolio.record_activity(
                            ActivityKind::Stake,
                            opportunity_title.clone(),
                            format_usd(*amount),
                            *amount,
                            ActivityStatus::Failed,
                            None,
                        );
                    }
                    LedgerAction::ConnectWallet => {}
                }
                self.ui
                    .add_notification(format!("{}: {}", action.title(), message), NotificationKind::Error);
            }

            LedgerResponse::Busy { action } => {
                self.ui.add_notification(
                    format!("{} skipped: another transaction is in progress", action.title()),
                    NotificationKind::Info,
                );
            }
        }
    }

    fn apply_purchase(&mut self, property_id: &str, tokens: u32, cost: f64, hash: Option<String>) {
        let property = match self.properties.reserve_tokens(property_id, tokens) {
            Ok(property) => property.clone(),
            Err(e) => {
                // Confirmed on chain but out of sync locally; keep the record anyway
                tracing::warn!(property_id, tokens, error = %e, "Purchase confirmed but reservation failed");
                match self.properties.get(property_id) {
                    Some(property) => property.clone(),
                    None => return,
                }
            }
        };

        self.portfolio
            .supply(&format!("prop-{}", property.id), &property.name, cost, property.apy);
        self.portfolio.record_activity(
            ActivityKind::Purchase,
            property.symbol(),
            format!("{} tokens", tokens),
            cost,
            ActivityStatus::Completed,
            hash,
        );
        self.purchase_quantity = 1;
        self.ui.add_notification(
            format!("Purchased {} tokens of {} for {}", tokens, property.name, format_usd(cost)),
            NotificationKind::Success,
        );
    }

    fn apply_stake(&mut self, opportunity_id: &str, amount: f64, hash: Option<String>) {
        let Some(opportunity) = self.opportunities.iter_mut().find(|o| o.id == opportunity_id) else {
            tracing::warn!(opportunity_id, "Stake confirmed for unknown opportunity");
            return;
        };
        opportunity.total_locked += amount;
        let (title, apy) = (opportunity.title.clone(), opportunity.apy);
        self.stake_amount.clear();

        self.portfolio
            .supply(&format!("earn-{}", opportunity_id), &title, amount, apy);
        self.portfolio.record_activity(
            ActivityKind::Stake,
            title.clone(),
            format_usd(amount),
            amount,
            ActivityStatus::Completed,
            hash,
        );
        self.ui.add_notification(
            format!("Staked {} in {}", format_usd(amount), title),
            NotificationKind::Success,
        );
    }

    fn persist_wallet(&self) {
        if let Err(e) = self.storage.save_wallet(&self.wallet) {
            tracing::warn!(error = %e, "Failed to persist wallet session");
        }
    }

    // ========================
    // Settings
    // ========================

    pub fn toggle_setting(&mut self) {
        match self.settings_selected {
            0 => {
                self.settings.theme = self.settings.theme.next();
                self.ui.set_theme(self.settings.theme);
            }
            row => {
                if let Some(pref) = NotificationPref::ALL.get(row - 1) {
                    self.settings.notifications.toggle(*pref);
                }
            }
        }
        self.settings_dirty = true;
    }

    pub fn save_settings(&mut self) {
        match self.storage.save_settings(&self.settings) {
            Ok(()) => {
                self.settings_dirty = false;
                self.status_message = Some(String::from("Settings saved"));
                tracing::info!("Settings saved");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save settings");
                self.ui
                    .add_notification(format!("Could not save settings: {}", e), NotificationKind::Error);
            }
        }
    }

    // ========================
    // Activity export
    // ========================

    pub fn export_activity(&mut self) {
        match self.storage.export_activity(&self.portfolio.activity) {
            Ok(path) => {
                self.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => {
                tracing::error!(error = %e, "Activity export failed");
                self.ui
                    .add_notification(format!("Export failed: {}", e), NotificationKind::Error);
            }
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    pub fn toggle_notifications(&mut self) {
        self.show_notifications = !self.show_notifications;
    }

    /// Dismiss the newest notification
    pub fn dismiss_notification(&mut self) {
        if let Some(id) = self.ui.notifications.first().map(|n| n.id) {
            self.ui.remove_notification(id);
        }
    }

    pub fn clear_notifications(&mut self) {
        self.ui.clear_notifications();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use crate::transaction::{TransactionState, TxStatus};
    use tempfile::tempdir;

    fn state() -> (AppState, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let app = AppState::new(Storage::with_dir(dir.path()));
        (app, dir)
    }

    fn connected() -> (AppState, tempfile::TempDir) {
        let (mut app, dir) = state();
        app.handle_response(LedgerResponse::WalletConnected {
            address: "0x1234...5678".into(),
            chain_id: 1,
            balance: 5000.0,
        });
        (app, dir)
    }

    fn open_property(app: &mut AppState, name: &str) {
        app.switch_page(Page::Invest);
        while app.to_render_state().listings[app.invest_selected].name != name {
            app.select_next();
        }
        app.open_selected();
        assert_eq!(app.page, Page::Property);
    }

    #[test]
    fn test_buy_requires_wallet() {
        let (mut app, _dir) = state();
        open_property(&mut app, "Beachfront Villa");
        assert!(app.buy_tokens().is_none());
        assert_eq!(app.ui.notifications[0].kind, NotificationKind::Error);
    }

    #[test]
    fn test_buy_builds_purchase_action() {
        let (mut app, _dir) = connected();
        open_property(&mut app, "Beachfront Villa");
        app.increase_quantity();
        app.increase_quantity();

        let cmd = app.buy_tokens();
        let Some(LedgerCommand::Execute(LedgerAction::Purchase { tokens, cost, property_id, .. })) = cmd
        else {
            panic!("expected purchase command, got {:?}", cmd);
        };
        assert_eq!(tokens, 3);
        assert_eq!(cost, 7500.0);
        assert_eq!(property_id, "2");
        assert!(app.last_action.is_some());
    }

    #[test]
    fn test_sold_out_listing_cannot_be_bought() {
        let (mut app, _dir) = connected();
        open_property(&mut app, "Urban Loft in City Center");
        assert!(app.buy_tokens().is_none());
    }

    #[test]
    fn test_quantity_bounded_by_availability() {
        let (mut app, _dir) = state();
        open_property(&mut app, "Commercial Office Building");
        app.decrease_quantity();
        assert_eq!(app.purchase_quantity, 1);
        for _ in 0..500 {
            app.increase_quantity();
        }
        assert_eq!(app.purchase_quantity, 200);
    }

    #[test]
    fn test_confirmed_purchase_updates_stores() {
        let (mut app, _dir) = connected();
        let positions_before = app.portfolio.positions.len();
        app.handle_response(LedgerResponse::Purchased {
            property_id: "2".into(),
            tokens: 4,
            cost: 10_000.0,
            hash: Some("0xabc".into()),
        });

        assert_eq!(app.properties.get("2").unwrap().available_tokens, 396);
        assert_eq!(app.portfolio.positions.len(), positions_before + 1);
        let row = &app.portfolio.activity[0];
        assert_eq!(row.kind, ActivityKind::Purchase);
        assert_eq!(row.status, ActivityStatus::Completed);
        assert_eq!(row.hash.as_deref(), Some("0xabc"));
        assert_eq!(row.asset, "REAL-BV");
        assert_eq!(app.ui.notifications[0].kind, NotificationKind::Success);
    }

    #[test]
    fn test_failed_purchase_records_failed_row() {
        let (mut app, _dir) = connected();
        app.handle_response(LedgerResponse::Failed {
            action: LedgerAction::Purchase {
                property_id: "1".into(),
                property_name: "Luxury Downtown Apartment".into(),
                symbol: "REAL-LDA".into(),
                tokens: 1,
                cost: 1000.0,
            },
            message: "insufficient funds".into(),
        });
        assert_eq!(app.portfolio.activity[0].status, ActivityStatus::Failed);
        assert!(app.ui.notifications[0].message.contains("insufficient funds"));
        assert_eq!(app.properties.get("1").unwrap().available_tokens, 750);
    }

    fn type_amount(app: &mut AppState, amount: &str) {
        app.edit_amount();
        assert_eq!(app.input_mode, InputMode::Editing);
        for c in amount.chars() {
            app.enter_char(c);
        }
        app.stop_editing();
    }

    #[test]
    fn test_stake_updates_pool_and_portfolio() {
        let (mut app, _dir) = connected();
        app.switch_page(Page::Earn);
        type_amount(&mut app, "12,500");
        let cmd = app.start_earning();
        let Some(LedgerCommand::Execute(LedgerAction::Earn { opportunity_id, amount, .. })) = cmd else {
            panic!("expected earn command");
        };
        // Default sort is highest APY first
        assert_eq!(opportunity_id, "3");
        assert_eq!(amount, 12_500.0);

        app.handle_response(LedgerResponse::Staked {
            opportunity_id: "3".into(),
            amount,
            hash: Some("0xfeed".into()),
        });
        let pool = app.opportunities.iter().find(|o| o.id == "3").unwrap();
        assert_eq!(pool.total_locked, 1_812_500.0);
        assert!(app.portfolio.positions.iter().any(|p| p.id == "earn-3"));
        assert!(app.stake_amount.is_empty());
    }

    #[test]
    fn test_stake_rejects_invalid_amounts() {
        let (mut app, _dir) = connected();
        app.switch_page(Page::Earn);

        assert!(app.start_earning().is_none());
        assert_eq!(app.ui.notifications[0].kind, NotificationKind::Error);

        type_amount(&mut app, "9999");
        assert!(app.start_earning().is_none());
        assert_eq!(app.ui.notifications[0].message, "Minimum investment is $10,000.00");

        app.stake_amount.clear();
        type_amount(&mut app, "lots");
        assert!(app.start_earning().is_none());
        assert!(app.ui.notifications[0].message.contains("not a valid amount"));
        assert!(app.last_action.is_none());
    }

    #[test]
    fn test_amount_typing_leaves_search_alone() {
        let (mut app, _dir) = state();
        app.switch_page(Page::Earn);
        type_amount(&mut app, "500");
        app.delete_char();
        assert_eq!(app.stake_amount, "50");
        assert!(app.invest_filters.query.is_empty());

        app.switch_page(Page::Invest);
        app.edit_amount();
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_actions_blocked_while_modal_busy() {
        let (mut app, _dir) = state();
        app.transaction = TransactionState {
            is_open: true,
            status: TxStatus::Pending,
            ..Default::default()
        };
        assert!(app.connect_wallet().is_none());
        assert!(app.close_transaction().is_none());
    }

    #[test]
    fn test_close_and_retry_after_error() {
        let (mut app, _dir) = state();
        assert!(matches!(
            app.connect_wallet(),
            Some(LedgerCommand::Execute(LedgerAction::ConnectWallet))
        ));
        app.handle_response(LedgerResponse::Transaction(TransactionState {
            is_open: true,
            status: TxStatus::Error,
            error_message: Some("user rejected the request".into()),
            ..Default::default()
        }));
        assert!(app.to_render_state().can_retry);

        assert!(matches!(
            app.retry_transaction(),
            Some(LedgerCommand::Execute(LedgerAction::ConnectWallet))
        ));
        assert!(matches!(app.close_transaction(), Some(LedgerCommand::CloseTransaction)));
        assert!(!app.transaction.is_open);
        assert_eq!(app.transaction.status, TxStatus::Error);
    }

    #[test]
    fn test_successful_transaction_is_not_retried() {
        let (mut app, _dir) = state();
        app.connect_wallet();
        app.handle_response(LedgerResponse::Transaction(TransactionState {
            is_open: true,
            status: TxStatus::Success,
            ..Default::default()
        }));
        assert!(app.last_action.is_some());
        assert!(app.retry_transaction().is_none());
    }

    #[test]
    fn test_liquidations_selection_is_clamped() {
        let (mut app, _dir) = connected();
        app.switch_page(Page::Liquidations);
        app.select_prev();
        assert_eq!(app.liquidations_selected, 0);
        for _ in 0..20 {
            app.select_next();
        }
        assert_eq!(app.liquidations_selected, app.liquidations.len() - 1);
        assert_eq!(app.to_render_state().liquidations.len(), 5);
    }

    #[test]
    fn test_wallet_session_is_persisted_and_cleared() {
        let (mut app, dir) = connected();
        assert!(Storage::with_dir(dir.path()).load_wallet().is_some());

        assert!(matches!(app.disconnect_wallet(), Some(LedgerCommand::DisconnectWallet)));
        assert!(!app.wallet.is_connected);
        assert!(Storage::with_dir(dir.path()).load_wallet().is_none());
        assert!(app.disconnect_wallet().is_none());
    }

    #[test]
    fn test_search_resets_selection() {
        let (mut app, _dir) = state();
        app.switch_page(Page::Invest);
        app.select_next();
        app.start_search();
        for c in "miami".chars() {
            app.enter_char(c);
        }
        assert_eq!(app.invest_selected, 0);
        let listings = app.to_render_state().listings;
        assert_eq!(listings.len(), 1);
        app.stop_editing();
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_settings_toggle_and_save() {
        let (mut app, dir) = connected();
        app.switch_page(Page::Settings);
        app.toggle_setting();
        app.select_next();
        app.select_next();
        app.toggle_setting();
        assert!(app.settings_dirty);

        app.save_settings();
        assert!(!app.settings_dirty);
        let saved = Storage::with_dir(dir.path()).load_settings();
        assert_eq!(saved.theme, crate::models::Theme::Light);
        assert!(!saved.notifications.push);
    }

    #[test]
    fn test_dismiss_newest_notification() {
        let (mut app, _dir) = state();
        app.ui.add_notification("old", NotificationKind::Info);
        app.ui.add_notification("new", NotificationKind::Info);
        app.dismiss_notification();
        assert_eq!(app.ui.notifications.len(), 1);
        assert_eq!(app.ui.notifications[0].message, "old");
    }
}
