use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Property category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    Residential,
    Commercial,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Residential => "Residential",
            PropertyType::Commercial => "Commercial",
        }
    }
}

/// Risk rating shared by listings and earn opportunities
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Sale state of a listing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStatus {
    Active,
    Pending,
    SoldOut,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "Active",
            ListingStatus::Pending => "Pending",
            ListingStatus::SoldOut => "Sold out",
        }
    }
}

/// A tokenized property listing
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: String,
    pub name: String,
    pub location: String,
    pub property_type: PropertyType,
    pub price: f64,
    pub token_price: f64,
    pub total_tokens: u32,
    pub available_tokens: u32,
    pub apy: f64,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub square_footage: u32,
    pub year_built: u16,
    pub rating: f32,
    pub risk: RiskLevel,
    pub status: ListingStatus,
    pub parking: String,
}

impl Property {
    /// Share of tokens still on sale, 0.0 ..= 1.0
    pub fn availability(&self) -> f64 {
        if self.total_tokens == 0 {
            return 0.0;
        }
        f64::from(self.available_tokens) / f64::from(self.total_tokens)
    }

    /// Ticker shown in activity rows, e.g. `REAL-LDA`
    pub fn symbol(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .filter(|c| c.is_ascii_alphabetic())
            .take(3)
            .collect();
        format!("REAL-{}", initials.to_ascii_uppercase())
    }
}

/// Earning strategy of a pool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    YieldFarming,
    Staking,
    LiquidityMining,
    GrowthFarming,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::YieldFarming => "Yield Farming",
            Strategy::Staking => "Staking",
            Strategy::LiquidityMining => "Liquidity Mining",
            Strategy::GrowthFarming => "Growth Farming",
        }
    }
}

/// A yield pool users can stake into
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EarnOpportunity {
    pub id: String,
    pub title: String,
    pub description: String,
    pub apy: f64,
    pub min_investment: f64,
    pub total_locked: f64,
    pub capacity: f64,
    pub duration_months: u32,
    pub risk: RiskLevel,
    pub strategy: Strategy,
    pub features: Vec<String>,
}

impl EarnOpportunity {
    /// Filled share of the pool, clamped to 1.0
    pub fn utilization(&self) -> f64 {
        if self.capacity <= 0.0 {
            return 1.0;
        }
        (self.total_locked / self.capacity).clamp(0.0, 1.0)
    }
}

/// A lending position in the portfolio
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub asset: String,
    pub supplied: f64,
    pub borrowed: f64,
    pub apy: f64,
    pub borrow_apy: f64,
    pub health_factor: u8,
}

/// A borrower position close to liquidation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LiquidationCandidate {
    pub user: String,
    pub collateral: String,
    pub debt: String,
    /// Collateral over debt; liquidatable below 1.0
    pub health_factor: f64,
    pub liquidation_price: f64,
}

/// Partial update applied to a [`Position`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionUpdate {
    pub supplied: Option<f64>,
    pub borrowed: Option<f64>,
    pub apy: Option<f64>,
    pub borrow_apy: Option<f64>,
    pub health_factor: Option<u8>,
}

impl PositionUpdate {
    pub fn apply(&self, position: &mut Position) {
        if let Some(v) = self.supplied {
            position.supplied = v;
        }
        if let Some(v) = self.borrowed {
            position.borrowed = v;
        }
        if let Some(v) = self.apy {
            position.apy = v;
        }
        if let Some(v) = self.borrow_apy {
            position.borrow_apy = v;
        }
        if let Some(v) = self.health_factor {
            position.health_factor = v;
        }
    }
}

/// Kind of an activity row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Purchase,
    Sale,
    Yield,
    Stake,
    Connect,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Purchase => "Purchase",
            ActivityKind::Sale => "Sale",
            ActivityKind::Yield => "Yield",
            ActivityKind::Stake => "Stake",
            ActivityKind::Connect => "Connect",
        }
    }
}

/// Outcome of an activity row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityStatus {
    Completed,
    Pending,
    Failed,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Completed => "Completed",
            ActivityStatus::Pending => "Pending",
            ActivityStatus::Failed => "Failed",
        }
    }
}

/// A row of transaction history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: String,
    pub kind: ActivityKind,
    pub asset: String,
    pub amount: String,
    pub value: f64,
    pub status: ActivityStatus,
    pub timestamp: DateTime<Utc>,
    pub hash: Option<String>,
}

/// Severity of a notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub kind: NotificationKind,
    pub timestamp: DateTime<Utc>,
}

/// Color scheme preference
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::System => "system",
        }
    }

    pub fn next(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::System,
            Theme::System => Theme::Dark,
        }
    }
}

/// Format a dollar amount with thousands separators, e.g. `$1,250.00`
pub fn format_usd(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}${}.{:02}", if negative { "-" } else { "" }, grouped, cents % 100)
}

/// Compact dollar amount for stat cards, e.g. `$12.5M`
pub fn format_usd_compact(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        format!("${:.0}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(1250.0), "$1,250.00");
        assert_eq!(format_usd(1_000_000.5), "$1,000,000.50");
        assert_eq!(format_usd(-42.1), "-$42.10");
    }

    #[test]
    fn test_format_usd_compact() {
        assert_eq!(format_usd_compact(12_500_000.0), "$12.5M");
        assert_eq!(format_usd_compact(8_200.0), "$8.2K");
        assert_eq!(format_usd_compact(890.0), "$890");
    }

    #[test]
    fn test_position_update_is_partial() {
        let mut position = Position {
            id: "1".into(),
            asset: "Ethereum".into(),
            supplied: 5000.0,
            borrowed: 2000.0,
            apy: 2.5,
            borrow_apy: 4.0,
            health_factor: 80,
        };
        PositionUpdate {
            borrowed: Some(1500.0),
            ..Default::default()
        }
        .apply(&mut position);
        assert_eq!(position.borrowed, 1500.0);
        assert_eq!(position.supplied, 5000.0);
        assert_eq!(position.health_factor, 80);
    }

    #[test]
    fn test_theme_cycles() {
        assert_eq!(Theme::Dark.next(), Theme::Light);
        assert_eq!(Theme::Light.next(), Theme::System);
        assert_eq!(Theme::System.next(), Theme::Dark);
    }
}
