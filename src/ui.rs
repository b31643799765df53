use ratatui::{prelude::*, widgets::*};

use crate::constants::EXPLORER_TX_URL;
use crate::models::{ActivityStatus, ListingStatus, NotificationKind, RiskLevel};
use crate::transaction::{TransactionState, TxStatus};

/// Presentation of one transaction phase in the modal
#[derive(Debug, Clone, PartialEq)]
pub struct StatusConfig {
    pub heading: &'static str,
    pub message: &'static str,
    pub badge: &'static str,
    pub color: Color,
    /// Footer line under the modal body
    pub hint: &'static str,
}

pub fn status_config(status: TxStatus) -> StatusConfig {
    match status {
        TxStatus::Signing => StatusConfig {
            heading: "Sign Transaction",
            message: "Please sign the transaction in your wallet to continue.",
            badge: "Waiting for Signature",
            color: Color::Blue,
            hint: "Check your wallet for the transaction approval",
        },
        TxStatus::Pending => StatusConfig {
            heading: "Transaction Pending",
            message: "Your transaction is being processed on the blockchain.",
            badge: "Confirming",
            color: Color::Yellow,
            hint: "This may take a few minutes depending on network congestion",
        },
        TxStatus::Success => StatusConfig {
            heading: "Transaction Successful",
            message: "Your transaction has been confirmed on the blockchain.",
            badge: "Confirmed",
            color: Color::Green,
            hint: "Enter/Esc: close",
        },
        TxStatus::Error => StatusConfig {
            heading: "Transaction Failed",
            message: "Your transaction failed to process. Please try again.",
            badge: "Failed",
            color: Color::Red,
            hint: "r: try again | Enter/Esc: close",
        },
    }
}

/// Body text of the modal: the failure reason on error, else the caller's description
pub fn modal_body(state: &TransactionState) -> String {
    let config = status_config(state.status);
    match state.status {
        TxStatus::Error => state
            .error_message
            .clone()
            .unwrap_or_else(|| config.message.to_string()),
        _ => state
            .description
            .clone()
            .unwrap_or_else(|| config.message.to_string()),
    }
}

/// Block explorer link for a transaction hash
pub fn explorer_url(hash: &str) -> String {
    format!("{}{}", EXPLORER_TX_URL, hash)
}

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!(" {}:{} ", i + 1, t)))
        .collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold())
        .divider(" ")
}

pub fn risk_color(risk: RiskLevel) -> Color {
    match risk {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
    }
}

pub fn listing_status_color(status: ListingStatus) -> Color {
    match status {
        ListingStatus::Active => Color::Green,
        ListingStatus::Pending => Color::Yellow,
        ListingStatus::SoldOut => Color::DarkGray,
    }
}

pub fn activity_status_color(status: ActivityStatus) -> Color {
    match status {
        ActivityStatus::Completed => Color::Green,
        ActivityStatus::Pending => Color::Yellow,
        ActivityStatus::Failed => Color::Red,
    }
}

pub fn notification_color(kind: NotificationKind) -> Color {
    match kind {
        NotificationKind::Success => Color::Green,
        NotificationKind::Error => Color::Red,
        NotificationKind::Info => Color::Cyan,
    }
}

/// Health factor color; lower is closer to liquidation
pub fn health_color(health: u8) -> Color {
    match health {
        0..=49 => Color::Red,
        50..=74 => Color::Yellow,
        _ => Color::Green,
    }
}

/// Liquidation health factor color; below 1.0 the position can be liquidated
pub fn liquidation_health_color(health_factor: f64) -> Color {
    if health_factor < 0.9 {
        Color::Red
    } else if health_factor < 0.95 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// Text progress bar, e.g. `[#####-----]`
pub fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = ((ratio.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
