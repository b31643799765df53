//! App actor - message loop processing UI events and ledger responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::ui_events::InputMode;
use crate::messages::{LedgerCommand, LedgerResponse, RenderState, UiEvent};

/// App actor that processes UI events and ledger responses
pub struct AppActor {
    state: AppState,
    ledger_tx: mpsc::UnboundedSender<LedgerCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        ledger_tx: mpsc::UnboundedSender<LedgerCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            ledger_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut ledger_rx: mpsc::UnboundedReceiver<LedgerResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        tracing::info!("Quit requested");
                        let _ = self.ledger_tx.send(LedgerCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = ledger_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, cmd: Option<LedgerCommand>) {
        if let Some(cmd) = cmd {
            tracing::debug!(command = ?cmd, "Sending ledger command");
            let _ = self.ledger_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Navigation
            UiEvent::SwitchPage(page) => self.state.switch_page(page),
            UiEvent::NextPage => self.state.next_page(),
            UiEvent::PrevPage => self.state.prev_page(),
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::OpenSelected => self.state.open_selected(),
            UiEvent::Back => self.state.back(),

            // Search input
            UiEvent::StartSearch => self.state.start_search(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::EditAmount => self.state.edit_amount(),

            // Filters
            UiEvent::CycleTypeFilter => self.state.cycle_type_filter(),
            UiEvent::CycleStatusFilter => self.state.cycle_status_filter(),
            UiEvent::CycleSort => self.state.cycle_sort(),
            UiEvent::CycleRiskFilter => self.state.cycle_risk_filter(),
            UiEvent::CycleStrategyFilter => self.state.cycle_strategy_filter(),
            UiEvent::CycleKindFilter => self.state.cycle_kind_filter(),

            // Transactions
            UiEvent::IncreaseQuantity => self.state.increase_quantity(),
            UiEvent::DecreaseQuantity => self.state.decrease_quantity(),
            UiEvent::BuyTokens => {
                let cmd = self.state.buy_tokens();
                self.send(cmd);
            }
            UiEvent::StartEarning => {
                let cmd = self.state.start_earning();
                self.send(cmd);
            }
            UiEvent::ConnectWallet => {
                if self.state.input_mode == InputMode::Editing {
                    self.state.stop_editing();
                }
                let cmd = self.state.connect_wallet();
                self.send(cmd);
            }
            UiEvent::DisconnectWallet => {
                let cmd = self.state.disconnect_wallet();
                self.send(cmd);
            }
            UiEvent::CloseTransaction => {
                let cmd = self.state.close_transaction();
                self.send(cmd);
            }
            UiEvent::RetryTransaction => {
                let cmd = self.state.retry_transaction();
                self.send(cmd);
            }

            // Settings and activity
            UiEvent::ToggleSetting => self.state.toggle_setting(),
            UiEvent::SaveSettings => self.state.save_settings(),
            UiEvent::ExportActivity => self.state.export_activity(),

            // Popups
            UiEvent::ToggleNotifications => self.state.toggle_notifications(),
            UiEvent::DismissNotification => self.state.dismiss_notification(),
            UiEvent::ClearNotifications => self.state.clear_notifications(),
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::LedgerAction;
    use crate::storage::Storage;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_connect_flows_to_ledger_and_quit_shuts_down() {
        let dir = tempdir().unwrap();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (ledger_tx, mut ledger_rx) = mpsc::unbounded_channel();
        let (_resp_tx, resp_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(AppState::new(Storage::with_dir(dir.path())), ledger_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, resp_rx));

        let initial = render_rx.recv().await.unwrap();
        assert!(!initial.wallet.is_connected);

        ui_tx.send(UiEvent::ConnectWallet).unwrap();
        ui_tx.send(UiEvent::Quit).unwrap();

        assert!(matches!(
            ledger_rx.recv().await,
            Some(LedgerCommand::Execute(LedgerAction::ConnectWallet))
        ));
        assert!(matches!(ledger_rx.recv().await, Some(LedgerCommand::Shutdown)));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_responses_trigger_render() {
        let dir = tempdir().unwrap();
        let (_ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (ledger_tx, _ledger_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(AppState::new(Storage::with_dir(dir.path())), ledger_tx, render_tx);
        tokio::spawn(actor.run(ui_rx, resp_rx));
        render_rx.recv().await.unwrap();

        resp_tx
            .send(LedgerResponse::WalletConnected {
                address: "0xabc".into(),
                chain_id: 1,
                balance: 1234.0,
            })
            .unwrap();
        let rendered = render_rx.recv().await.unwrap();
        assert!(rendered.wallet.is_connected);
        assert_eq!(rendered.wallet.balance, 1234.0);
    }
}
