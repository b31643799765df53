//! Built-in mock datasets
//!
//! Stand-ins for what a listing service and an indexer would return.

use chrono::{TimeZone, Utc};

use crate::models::{
    ActivityKind, ActivityRecord, ActivityStatus, EarnOpportunity, LiquidationCandidate,
    ListingStatus, Position, Property, PropertyType, RiskLevel, Strategy,
};

#[allow(clippy::too_many_arguments)]
fn property(
    id: &str,
    name: &str,
    location: &str,
    property_type: PropertyType,
    price: f64,
    total_tokens: u32,
    available_tokens: u32,
    apy: f64,
    rooms: (u8, u8),
    square_footage: u32,
    year_built: u16,
    rating: f32,
    risk: RiskLevel,
    status: ListingStatus,
    parking: &str,
) -> Property {
    Property {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        property_type,
        price,
        token_price: price / f64::from(total_tokens),
        total_tokens,
        available_tokens,
        apy,
        bedrooms: rooms.0,
        bathrooms: rooms.1,
        square_footage,
        year_built,
        rating,
        risk,
        status,
        parking: parking.to_string(),
    }
}

pub fn properties() -> Vec<Property> {
    use ListingStatus::*;
    use PropertyType::*;
    use RiskLevel::*;

    vec![
        property("1", "Luxury Downtown Apartment", "New York, NY", Residential, 1_000_000.0, 1000, 750, 5.2, (3, 2), 1500, 2005, 4.8, Low, Active, "2-Car Garage"),
        property("2", "Beachfront Villa", "Miami, FL", Residential, 2_500_000.0, 1000, 400, 6.1, (5, 4), 3200, 2012, 4.9, Medium, Active, "Private Driveway"),
        property("3", "Commercial Office Building", "San Francisco, CA", Commercial, 5_000_000.0, 1000, 200, 7.3, (0, 0), 15000, 1998, 4.7, High, Active, "Underground Lot"),
        property("4", "Suburban Family Home", "Austin, TX", Residential, 750_000.0, 1000, 600, 4.8, (4, 3), 2400, 2015, 4.6, Low, Active, "2-Car Garage"),
        property("5", "Retail Shopping Center", "Los Angeles, CA", Commercial, 3_200_000.0, 1000, 300, 6.8, (0, 0), 25000, 2001, 4.5, Medium, Active, "Surface Lot"),
        property("6", "Mountain Chalet", "Denver, CO", Residential, 1_200_000.0, 1000, 450, 5.5, (3, 2), 1800, 2009, 4.7, Medium, Active, "Carport"),
        property("7", "Urban Loft in City Center", "New York, NY", Residential, 900_000.0, 12000, 0, 8.1, (2, 1), 1100, 1925, 4.4, Medium, SoldOut, "Street"),
        property("8", "Suburban Home in Green Meadows", "Green Meadows, TX", Residential, 1_080_000.0, 9000, 9000, 6.9, (4, 3), 2600, 2018, 4.3, Low, Pending, "2-Car Garage"),
    ]
}

fn features(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn opportunities() -> Vec<EarnOpportunity> {
    vec![
        EarnOpportunity {
            id: "1".into(),
            title: "High-Yield Residential Pool".into(),
            description: "Diversified portfolio of residential properties across major US cities".into(),
            apy: 7.2,
            min_investment: 1000.0,
            total_locked: 2_500_000.0,
            capacity: 5_000_000.0,
            duration_months: 12,
            risk: RiskLevel::Medium,
            strategy: Strategy::YieldFarming,
            features: features(&["Auto-compounding", "Monthly payouts", "Diversified portfolio"]),
        },
        EarnOpportunity {
            id: "2".into(),
            title: "Commercial Real Estate Vault".into(),
            description: "Premium commercial properties with stable long-term returns".into(),
            apy: 5.8,
            min_investment: 5000.0,
            total_locked: 8_200_000.0,
            capacity: 10_000_000.0,
            duration_months: 24,
            risk: RiskLevel::Low,
            strategy: Strategy::Staking,
            features: features(&["Stable returns", "Quarterly payouts", "Blue-chip properties"]),
        },
        EarnOpportunity {
            id: "3".into(),
            title: "Luxury Property Liquidity Pool".into(),
            description: "High-end luxury properties with premium yield potential".into(),
            apy: 9.1,
            min_investment: 10_000.0,
            total_locked: 1_800_000.0,
            capacity: 3_000_000.0,
            duration_months: 6,
            risk: RiskLevel::High,
            strategy: Strategy::LiquidityMining,
            features: features(&["High APY", "Weekly rewards", "Premium properties"]),
        },
        EarnOpportunity {
            id: "4".into(),
            title: "Suburban Growth Fund".into(),
            description: "Emerging suburban markets with high growth potential".into(),
            apy: 6.5,
            min_investment: 2500.0,
            total_locked: 3_200_000.0,
            capacity: 5_000_000.0,
            duration_months: 18,
            risk: RiskLevel::Medium,
            strategy: Strategy::GrowthFarming,
            features: features(&["Growth focused", "Bi-weekly payouts", "Emerging markets"]),
        },
    ]
}

pub fn positions() -> Vec<Position> {
    vec![
        Position {
            id: "1".into(),
            asset: "Ethereum".into(),
            supplied: 5000.0,
            borrowed: 2000.0,
            apy: 2.5,
            borrow_apy: 4.0,
            health_factor: 80,
        },
        Position {
            id: "2".into(),
            asset: "Bitcoin".into(),
            supplied: 7000.0,
            borrowed: 3000.0,
            apy: 3.0,
            borrow_apy: 5.0,
            health_factor: 75,
        },
        Position {
            id: "3".into(),
            asset: "Solana".into(),
            supplied: 345.0,
            borrowed: 678.0,
            apy: 1.8,
            borrow_apy: 2.2,
            health_factor: 90,
        },
    ]
}

pub fn liquidations() -> Vec<LiquidationCandidate> {
    let row = |user: &str, collateral: &str, debt: &str, health_factor: f64, liquidation_price: f64| {
        LiquidationCandidate {
            user: user.to_string(),
            collateral: collateral.to_string(),
            debt: debt.to_string(),
            health_factor,
            liquidation_price,
        }
    };

    vec![
        row("User 1", "ETH", "DAI", 0.95, 1_800.0),
        row("User 2", "BTC", "USDC", 0.88, 25_000.0),
        row("User 3", "LINK", "USDT", 0.92, 15.0),
        row("User 4", "AVAX", "DAI", 0.98, 30.0),
        row("User 5", "SOL", "USDC", 0.85, 200.0),
    ]
}

pub fn activity() -> Vec<ActivityRecord> {
    let row = |id: &str,
               kind: ActivityKind,
               asset: &str,
               amount: &str,
               value: f64,
               status: ActivityStatus,
               (y, mo, d, h, mi): (i32, u32, u32, u32, u32),
               hash: &str| ActivityRecord {
        id: id.to_string(),
        kind,
        asset: asset.to_string(),
        amount: amount.to_string(),
        value,
        status,
        timestamp: Utc
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .unwrap_or_else(Utc::now),
        hash: Some(hash.to_string()),
    };

    vec![
        row("tx_001", ActivityKind::Purchase, "REAL-LAC", "100 tokens", 10_000.0, ActivityStatus::Completed, (2024, 1, 15, 14, 30), "0x1234...5678"),
        row("tx_002", ActivityKind::Yield, "REAL-LAC", "$1,250", 1_250.0, ActivityStatus::Completed, (2024, 1, 10, 9, 15), "0x2345...6789"),
        row("tx_003", ActivityKind::Sale, "REAL-BFV", "50 tokens", 12_500.0, ActivityStatus::Pending, (2024, 1, 8, 16, 45), "0x3456...7890"),
        row("tx_004", ActivityKind::Purchase, "REAL-MCA", "75 tokens", 11_250.0, ActivityStatus::Completed, (2024, 1, 5, 11, 20), "0x4567...8901"),
        row("tx_005", ActivityKind::Yield, "REAL-BFV", "$890", 890.0, ActivityStatus::Failed, (2024, 1, 3, 8, 30), "0x5678...9012"),
    ]
}

/// Documentation sections shown on the docs page: (title, body)
pub fn docs() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "Getting Started",
            "Connect a wallet with 'w', browse listings on the Invest page and open a \
             property with Enter. Every purchase runs through a signing step in your wallet \
             followed by on-chain confirmation.",
        ),
        (
            "Property Tokens",
            "Each property is split into a fixed number of tokens. Holding tokens entitles \
             you to a pro-rata share of rental yield, distributed as the property earns.",
        ),
        (
            "Earning",
            "Earn pools combine several properties under one strategy. Staking locks your \
             deposit for the pool's duration; the displayed APY is an estimate, not a promise.",
        ),
        (
            "Transactions",
            "A transaction is first signed, then confirmed. If it fails the reason is shown \
             and nothing is retried automatically; press 'r' to try again.",
        ),
        (
            "Risk",
            "Risk levels summarise vacancy, leverage and market volatility. Health factor \
             on lending positions drops as borrowing approaches the collateral limit.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_property_ids_are_unique() {
        let props = properties();
        let ids: HashSet<_> = props.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), props.len());
    }

    #[test]
    fn test_token_price_matches_valuation() {
        for p in properties() {
            let implied = p.token_price * f64::from(p.total_tokens);
            assert!((implied - p.price).abs() < 1e-6, "{}", p.name);
            assert!(p.available_tokens <= p.total_tokens);
        }
    }

    #[test]
    fn test_liquidation_candidates_are_under_water() {
        let rows = liquidations();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.health_factor < 1.0));
    }

    #[test]
    fn test_sold_out_listing_has_no_tokens() {
        for p in properties().into_iter().filter(|p| p.status == ListingStatus::SoldOut) {
            assert_eq!(p.available_tokens, 0);
        }
    }
}
