//! Ledger actor - runs transactions in the Tokio runtime

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

use crate::ledger::{Ledger, LedgerError};
use crate::messages::{LedgerAction, LedgerCommand, LedgerResponse};
use crate::transaction::{RunError, TransactionFlow};

/// What a finished task tells the actor
enum TaskOutcome {
    /// Wallet connected while `session` was current
    Connected { address: String, session: u64 },
    Done,
}

/// Ledger actor that owns the transaction flow
pub struct LedgerActor {
    ledger: Arc<dyn Ledger>,
    flow: Arc<TransactionFlow>,
    response_tx: mpsc::UnboundedSender<LedgerResponse>,
    active_tasks: JoinSet<TaskOutcome>,
    address: Option<String>,
    /// Bumped on every disconnect so late connects are ignored
    session: u64,
    balance_refresh: Duration,
}

impl LedgerActor {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        flow: TransactionFlow,
        balance_refresh: Duration,
        response_tx: mpsc::UnboundedSender<LedgerResponse>,
    ) -> Self {
        LedgerActor {
            ledger,
            flow: Arc::new(flow),
            response_tx,
            active_tasks: JoinSet::new(),
            address: None,
            session: 0,
            balance_refresh,
        }
    }

    /// Run the ledger actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<LedgerCommand>) {
        let mut flow_rx = self.flow.subscribe();
        let mut balance_ticker = tokio::time::interval(self.balance_refresh);
        balance_ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(LedgerCommand::Execute(action)) => {
                            if self.flow.is_running() {
                                tracing::warn!(action = ?action, "Transaction already in flight");
                                let _ = self.response_tx.send(LedgerResponse::Busy { action });
                                continue;
                            }
                            let ledger = Arc::clone(&self.ledger);
                            let flow = Arc::clone(&self.flow);
                            let response_tx = self.response_tx.clone();
                            let session = self.session;
                            self.active_tasks.spawn(async move {
                                execute_action(&flow, ledger.as_ref(), action, session, &response_tx).await
                            });
                        }

                        Some(LedgerCommand::ResumeSession { address }) => {
                            tracing::info!(address = %address, "Resuming wallet session");
                            self.address = Some(address);
                        }

                        Some(LedgerCommand::DisconnectWallet) => {
                            tracing::info!("Wallet disconnected");
                            self.address = None;
                            self.session = self.session.wrapping_add(1);
                            let _ = self.response_tx.send(LedgerResponse::WalletDisconnected);
                        }

                        Some(LedgerCommand::CloseTransaction) => self.flow.close(),

                        Some(LedgerCommand::Shutdown) | None => break,
                    }
                }

                Some(state) = flow_rx.recv() => {
                    let _ = self.response_tx.send(LedgerResponse::Transaction(state));
                }

                _ = balance_ticker.tick(), if self.address.is_some() => {
                    if let Some(address) = self.address.clone() {
                        let ledger = Arc::clone(&self.ledger);
                        let response_tx = self.response_tx.clone();
                        self.active_tasks.spawn(async move {
                            match ledger.balance(&address).await {
                                Ok(balance) => {
                                    let _ = response_tx.send(LedgerResponse::BalanceUpdated { balance });
                                }
                                Err(e) => tracing::warn!(error = %e, "Balance refresh failed"),
                            }
                            TaskOutcome::Done
                        });
                    }
                }

                Some(result) = self.active_tasks.join_next() => {
                    match result {
                        Ok(TaskOutcome::Connected { address, session }) if session == self.session => {
                            self.address = Some(address);
                        }
                        Ok(TaskOutcome::Connected { address, .. }) => {
                            tracing::debug!(address = %address, "Ignoring connect finished after disconnect");
                        }
                        Ok(TaskOutcome::Done) => {}
                        Err(e) => tracing::error!(error = %e, "Ledger task panicked"),
                    }
                }
            }
        }

        self.active_tasks.abort_all();
    }
}

/// Run one action through the flow and report its outcome
async fn execute_action(
    flow: &TransactionFlow,
    ledger: &dyn Ledger,
    action: LedgerAction,
    session: u64,
    response_tx: &mpsc::UnboundedSender<LedgerResponse>,
) -> TaskOutcome {
    let title = Some(action.title());
    let description = Some(action.description());

    match &action {
        LedgerAction::ConnectWallet => {
            match flow.run(|| ledger.connect_wallet(), title, description).await {
                Ok(wallet) => {
                    tracing::info!(address = %wallet.address, chain_id = wallet.chain_id, "Wallet connected");
                    let address = wallet.address.clone();
                    let _ = response_tx.send(LedgerResponse::WalletConnected {
                        address: wallet.address,
                        chain_id: wallet.chain_id,
                        balance: wallet.balance,
                    });
                    TaskOutcome::Connected { address, session }
                }
                Err(e) => {
                    report_failure(response_tx, action.clone(), e);
                    TaskOutcome::Done
                }
            }
        }

        LedgerAction::Purchase {
            property_id,
            tokens,
            cost,
            ..
        } => {
            let result = flow
                .run(|| ledger.purchase_tokens(property_id, *tokens), title, description)
                .await;
            match result {
                Ok(receipt) => {
                    let _ = response_tx.send(LedgerResponse::Purchased {
                        property_id: property_id.clone(),
                        tokens: *tokens,
                        cost: *cost,
                        hash: receipt.hash,
                    });
                }
                Err(e) => report_failure(response_tx, action.clone(), e),
            }
            TaskOutcome::Done
        }

        LedgerAction::Earn {
            opportunity_id,
            amount,
            ..
        } => {
            let result = flow
                .run(|| ledger.start_earning(opportunity_id, *amount), title, description)
                .await;
            match result {
                Ok(receipt) => {
                    let _ = response_tx.send(LedgerResponse::Staked {
                        opportunity_id: opportunity_id.clone(),
                        amount: *amount,
                        hash: receipt.hash,
                    });
                }
                Err(e) => report_failure(response_tx, action.clone(), e),
            }
            TaskOutcome::Done
        }
    }
}

fn report_failure(
    response_tx: &mpsc::UnboundedSender<LedgerResponse>,
    action: LedgerAction,
    err: RunError<LedgerError>,
) {
    match err {
        RunError::Busy => {
            let _ = response_tx.send(LedgerResponse::Busy { action });
        }
        RunError::Failed(e) => {
            tracing::warn!(action = ?action, error = %e, "Ledger action failed");
            let _ = response_tx.send(LedgerResponse::Failed {
                action,
                message: e.to_string(),
            });
        }
    }
}
