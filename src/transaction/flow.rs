//! Transaction flow - drives one simulated operation through its phases
//!
//! ```text
//! start ──> [Signing] ──op ok, hash──> [Pending] ──confirm──> [Success]
//!               │  └──────op ok, no hash────────────────────> [Success]
//!               └──────────op failed─────────────────────────> [Error]
//! ```
//!
//! Every transition publishes a full [`TransactionState`] snapshot to all
//! subscribers, so a status surface can replay the exact phase sequence.

use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::constants::{
    DEFAULT_CONFIRMATION_DELAY_MS, DEFAULT_SIGNING_DELAY_MS, FALLBACK_TX_ERROR,
};
use crate::transaction::state::{TransactionState, TxStatus};

/// Anything an operation can resolve to, as long as it may carry a hash
pub trait TxOutcome {
    fn transaction_hash(&self) -> Option<&str>;
}

/// Plain result of an operation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Receipt {
    pub hash: Option<String>,
}

impl Receipt {
    pub fn with_hash(hash: impl Into<String>) -> Self {
        Receipt {
            hash: Some(hash.into()),
        }
    }
}

impl TxOutcome for Receipt {
    fn transaction_hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }
}

/// Simulated latencies for the signature and confirmation phases
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlowTimings {
    pub signing: Duration,
    pub confirmation: Duration,
}

impl FlowTimings {
    pub fn from_millis(signing_ms: u64, confirmation_ms: u64) -> Self {
        FlowTimings {
            signing: Duration::from_millis(signing_ms),
            confirmation: Duration::from_millis(confirmation_ms),
        }
    }
}

impl Default for FlowTimings {
    fn default() -> Self {
        Self::from_millis(DEFAULT_SIGNING_DELAY_MS, DEFAULT_CONFIRMATION_DELAY_MS)
    }
}

/// Failure of [`TransactionFlow::run`]
#[derive(Debug, thiserror::Error)]
pub enum RunError<E> {
    /// Another run is still in flight on this flow
    #[error("another transaction is already in progress")]
    Busy,
    /// The operation itself failed; carries the original error
    #[error("{0}")]
    Failed(E),
}

impl<E> RunError<E> {
    pub fn into_failure(self) -> Option<E> {
        match self {
            RunError::Failed(err) => Some(err),
            RunError::Busy => None,
        }
    }
}

/// Clears the in-flight flag when a run finishes or its future is dropped
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// State holder for one transaction at a time
pub struct TransactionFlow {
    state: Mutex<TransactionState>,
    subscribers: Mutex<Vec<mpsc::UnboundedSender<TransactionState>>>,
    in_flight: AtomicBool,
    timings: FlowTimings,
}

impl Default for TransactionFlow {
    fn default() -> Self {
        Self::new(FlowTimings::default())
    }
}

impl TransactionFlow {
    pub fn new(timings: FlowTimings) -> Self {
        TransactionFlow {
            state: Mutex::new(TransactionState::default()),
            subscribers: Mutex::new(Vec::new()),
            in_flight: AtomicBool::new(false),
            timings,
        }
    }

    pub fn timings(&self) -> FlowTimings {
        self.timings
    }

    /// Current state
    pub fn snapshot(&self) -> TransactionState {
        lock(&self.state).clone()
    }

    /// Receive a snapshot after every transition
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<TransactionState> {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.subscribers).push(tx);
        rx
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn update(&self, apply: impl FnOnce(&mut TransactionState)) {
        // Publishing under the state lock keeps subscribers in transition order
        let mut state = lock(&self.state);
        apply(&mut state);
        tracing::debug!(
            status = state.status.as_str(),
            open = state.is_open,
            hash = ?state.transaction_hash,
            "Transaction state changed"
        );
        lock(&self.subscribers).retain(|tx| tx.send(state.clone()).is_ok());
    }

    /// Open the surface in the signing phase, discarding any previous outcome
    pub fn start(&self, title: Option<String>, description: Option<String>) {
        self.update(|state| {
            *state = TransactionState {
                is_open: true,
                status: TxStatus::Signing,
                transaction_hash: None,
                error_message: None,
                title,
                description,
            };
        });
    }

    pub fn mark_pending(&self, hash: Option<String>) {
        self.update(|state| {
            state.status = TxStatus::Pending;
            if hash.is_some() {
                state.transaction_hash = hash;
            }
        });
    }

    pub fn mark_success(&self, hash: Option<String>) {
        self.update(|state| {
            state.status = TxStatus::Success;
            if hash.is_some() {
                state.transaction_hash = hash;
            }
        });
    }

    pub fn mark_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.update(|state| {
            state.status = TxStatus::Error;
            state.error_message = Some(message);
        });
    }

    /// Hide the surface; the last phase stays as it was
    pub fn close(&self) {
        self.update(|state| state.is_open = false);
    }

    /// Run `operation` through signing, optional confirmation and a terminal
    /// phase. Returns the operation's own result or its original error.
    ///
    /// A second call while one is in flight is rejected with
    /// [`RunError::Busy`] and leaves the state untouched. There is no
    /// cancellation or timeout: closing the surface does not stop the run.
    pub async fn run<F, Fut, T, E>(
        &self,
        operation: F,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<T, RunError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: TxOutcome,
        E: Display,
    {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            tracing::warn!(title = ?title, "Rejected transaction while another is in flight");
            return Err(RunError::Busy);
        }
        let _in_flight = InFlight(&self.in_flight);

        tracing::info!(title = ?title, "Transaction started");
        self.start(title, description);
        tokio::time::sleep(self.timings.signing).await;

        match operation().await {
            Ok(outcome) => {
                match outcome.transaction_hash().map(str::to_owned) {
                    Some(hash) => {
                        self.mark_pending(Some(hash.clone()));
                        tokio::time::sleep(self.timings.confirmation).await;
                        tracing::info!(hash = %hash, "Transaction confirmed");
                        self.mark_success(Some(hash));
                    }
                    None => {
                        tracing::info!("Transaction completed without hash");
                        self.mark_success(None);
                    }
                }
                Ok(outcome)
            }
            Err(err) => {
                let message = err.to_string();
                let message = if message.trim().is_empty() {
                    FALLBACK_TX_ERROR.to_string()
                } else {
                    message
                };
                tracing::warn!(error = %message, "Transaction failed");
                self.mark_error(message);
                Err(RunError::Failed(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Debug, PartialEq)]
    struct Failure(&'static str);

    impl Display for Failure {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    fn phases(rx: &mut mpsc::UnboundedReceiver<TransactionState>) -> Vec<TxStatus> {
        let mut seen = Vec::new();
        while let Ok(state) = rx.try_recv() {
            seen.push(state.status);
        }
        seen
    }

    #[test]
    fn test_start_always_resets_to_signing() {
        let flow = TransactionFlow::default();
        flow.mark_error("boom");
        flow.mark_pending(Some("0x1".into()));
        flow.start(Some("Buy".into()), None);

        let state = flow.snapshot();
        assert!(state.is_open);
        assert_eq!(state.status, TxStatus::Signing);
        assert_eq!(state.transaction_hash, None);
        assert_eq!(state.error_message, None);
        assert_eq!(state.title.as_deref(), Some("Buy"));
    }

    #[test]
    fn test_close_keeps_outcome() {
        let flow = TransactionFlow::default();
        flow.start(None, None);
        flow.mark_success(Some("0xdead".into()));
        flow.close();

        let state = flow.snapshot();
        assert!(!state.is_open);
        assert_eq!(state.status, TxStatus::Success);
        assert_eq!(state.transaction_hash.as_deref(), Some("0xdead"));

        flow.mark_error("late failure");
        flow.close();
        assert_eq!(flow.snapshot().error_message.as_deref(), Some("late failure"));
    }

    #[test]
    fn test_mark_without_hash_keeps_existing_hash() {
        let flow = TransactionFlow::default();
        flow.mark_pending(Some("0xabc".into()));
        flow.mark_success(None);
        assert_eq!(flow.snapshot().transaction_hash.as_deref(), Some("0xabc"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_with_hash_goes_through_pending() {
        let flow = TransactionFlow::default();
        let mut rx = flow.subscribe();

        let receipt = flow
            .run(
                || async { Ok::<_, Failure>(Receipt::with_hash("0xabc")) },
                Some("Buy".into()),
                Some("desc".into()),
            )
            .await
            .unwrap();

        assert_eq!(receipt.hash.as_deref(), Some("0xabc"));
        assert_eq!(
            phases(&mut rx),
            vec![TxStatus::Signing, TxStatus::Pending, TxStatus::Success]
        );
        assert_eq!(
            flow.snapshot(),
            TransactionState {
                is_open: true,
                status: TxStatus::Success,
                transaction_hash: Some("0xabc".into()),
                error_message: None,
                title: Some("Buy".into()),
                description: Some("desc".into()),
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_without_hash_skips_pending() {
        let flow = TransactionFlow::default();
        let mut rx = flow.subscribe();

        flow.run(|| async { Ok::<_, Failure>(Receipt::default()) }, None, None)
            .await
            .unwrap();

        assert_eq!(phases(&mut rx), vec![TxStatus::Signing, TxStatus::Success]);
        let state = flow.snapshot();
        assert_eq!(state.status, TxStatus::Success);
        assert_eq!(state.transaction_hash, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_failure_records_message_and_returns_error() {
        let flow = TransactionFlow::default();
        let mut rx = flow.subscribe();

        let err = flow
            .run(
                || async { Err::<Receipt, _>(Failure("insufficient funds")) },
                None,
                None,
            )
            .await
            .unwrap_err();

        assert_eq!(err.into_failure(), Some(Failure("insufficient funds")));
        assert_eq!(phases(&mut rx), vec![TxStatus::Signing, TxStatus::Error]);
        let state = flow.snapshot();
        assert_eq!(state.status, TxStatus::Error);
        assert_eq!(state.error_message.as_deref(), Some("insufficient funds"));
        assert!(!flow.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_failure_without_message_uses_fallback() {
        let flow = TransactionFlow::default();
        let result = flow
            .run(|| async { Err::<Receipt, _>(Failure("")) }, None, None)
            .await;

        assert!(matches!(result, Err(RunError::Failed(Failure("")))));
        assert_eq!(
            flow.snapshot().error_message.as_deref(),
            Some(FALLBACK_TX_ERROR)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_waits_for_both_delays() {
        let flow = TransactionFlow::new(FlowTimings::from_millis(1_000, 3_000));
        let started = tokio::time::Instant::now();
        flow.run(
            || async { Ok::<_, Failure>(Receipt::with_hash("0x1")) },
            None,
            None,
        )
        .await
        .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(4_000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_run_is_rejected() {
        let flow = Arc::new(TransactionFlow::default());
        let first = {
            let flow = Arc::clone(&flow);
            tokio::spawn(async move {
                flow.run(
                    || async { Ok::<_, Failure>(Receipt::with_hash("0xfirst")) },
                    Some("First".into()),
                    None,
                )
                .await
                .is_ok()
            })
        };
        tokio::task::yield_now().await;
        assert!(flow.is_running());

        let second = flow
            .run(
                || async { Ok::<_, Failure>(Receipt::with_hash("0xsecond")) },
                Some("Second".into()),
                None,
            )
            .await;
        assert!(matches!(second, Err(RunError::Busy)));
        assert_eq!(flow.snapshot().title.as_deref(), Some("First"));

        assert!(first.await.unwrap());
        let state = flow.snapshot();
        assert_eq!(state.transaction_hash.as_deref(), Some("0xfirst"));
        assert!(!flow.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_subscriber_is_pruned() {
        let flow = TransactionFlow::default();
        let rx = flow.subscribe();
        drop(rx);
        flow.start(None, None);
        assert!(lock(&flow.subscribers).is_empty());
    }
}
