use crate::models::{ActivityKind, ActivityRecord, ActivityStatus, Position, PositionUpdate};
use crate::stores::StoreError;

/// Lending positions and transaction history
#[derive(Clone, Debug, Default)]
pub struct PortfolioStore {
    pub positions: Vec<Position>,
    pub activity: Vec<ActivityRecord>,
    pub loading: bool,
    next_activity: u64,
}

impl PortfolioStore {
    pub fn new(positions: Vec<Position>, activity: Vec<ActivityRecord>) -> Self {
        let next_activity = activity.len() as u64 + 1;
        PortfolioStore {
            positions,
            activity,
            loading: false,
            next_activity,
        }
    }

    pub fn add_position(&mut self, position: Position) {
        self.positions.push(position);
    }

    pub fn remove_position(&mut self, id: &str) {
        self.positions.retain(|p| p.id != id);
    }

    pub fn update_position(&mut self, id: &str, update: &PositionUpdate) -> Result<(), StoreError> {
        let position = self
            .positions
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::UnknownPosition(id.to_string()))?;
        update.apply(position);
        Ok(())
    }

    /// Add `amount` to the supplied side of a position, creating it if needed
    pub fn supply(&mut self, id: &str, asset: &str, amount: f64, apy: f64) {
        match self.positions.iter_mut().find(|p| p.id == id) {
            Some(position) => position.supplied += amount,
            None => self.positions.push(Position {
                id: id.to_string(),
                asset: asset.to_string(),
                supplied: amount,
                borrowed: 0.0,
                apy,
                borrow_apy: 0.0,
                health_factor: 100,
            }),
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn total_supplied(&self) -> f64 {
        self.positions.iter().map(|p| p.supplied).sum()
    }

    pub fn total_borrowed(&self) -> f64 {
        self.positions.iter().map(|p| p.borrowed).sum()
    }

    /// Supply-weighted APY across positions
    pub fn net_apy(&self) -> f64 {
        let supplied = self.total_supplied();
        if supplied <= 0.0 {
            return 0.0;
        }
        self.positions.iter().map(|p| p.supplied * p.apy).sum::<f64>() / supplied
    }

    /// Lowest health factor, the one that matters for liquidation
    pub fn min_health_factor(&self) -> Option<u8> {
        self.positions.iter().map(|p| p.health_factor).min()
    }

    /// Prepend a history row and return its generated id
    pub fn record_activity(
        &mut self,
        kind: ActivityKind,
        asset: impl Into<String>,
        amount: impl Into<String>,
        value: f64,
        status: ActivityStatus,
        hash: Option<String>,
    ) -> String {
        let id = format!("tx_{:03}", self.next_activity);
        self.next_activity += 1;
        self.activity.insert(
            0,
            ActivityRecord {
                id: id.clone(),
                kind,
                asset: asset.into(),
                amount: amount.into(),
                value,
                status,
                timestamp: chrono::Utc::now(),
                hash,
            },
        );
        id
    }

    /// History rows matching the optional status and kind filters
    pub fn filtered_activity(
        &self,
        status: Option<ActivityStatus>,
        kind: Option<ActivityKind>,
    ) -> Vec<&ActivityRecord> {
        self.activity
            .iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .filter(|r| kind.map_or(true, |k| r.kind == k))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    #[test]
    fn test_totals_follow_positions() {
        let store = PortfolioStore::new(data::positions(), Vec::new());
        assert_eq!(store.total_supplied(), 12_345.0);
        assert_eq!(store.total_borrowed(), 5_678.0);
        assert_eq!(store.min_health_factor(), Some(75));
        let expected = (5000.0 * 2.5 + 7000.0 * 3.0 + 345.0 * 1.8) / 12_345.0;
        assert!((store.net_apy() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_empty_portfolio_has_zero_apy() {
        let store = PortfolioStore::default();
        assert_eq!(store.net_apy(), 0.0);
        assert_eq!(store.min_health_factor(), None);
    }

    #[test]
    fn test_update_and_remove_position() {
        let mut store = PortfolioStore::new(data::positions(), Vec::new());
        store
            .update_position("2", &PositionUpdate { health_factor: Some(60), ..Default::default() })
            .unwrap();
        assert_eq!(store.positions[1].health_factor, 60);
        assert_eq!(store.positions[1].supplied, 7000.0);

        assert_eq!(
            store.update_position("99", &PositionUpdate::default()),
            Err(StoreError::UnknownPosition("99".into()))
        );

        store.remove_position("1");
        assert_eq!(store.positions.len(), 2);
        assert!(store.positions.iter().all(|p| p.id != "1"));
    }

    #[test]
    fn test_supply_creates_then_accumulates() {
        let mut store = PortfolioStore::default();
        store.supply("prop-1", "Beachfront Villa", 2500.0, 6.1);
        store.supply("prop-1", "Beachfront Villa", 500.0, 6.1);
        assert_eq!(store.positions.len(), 1);
        assert_eq!(store.positions[0].supplied, 3000.0);
        assert_eq!(store.positions[0].health_factor, 100);
    }

    #[test]
    fn test_record_activity_prepends_with_fresh_ids() {
        let mut store = PortfolioStore::new(Vec::new(), data::activity());
        let id = store.record_activity(
            ActivityKind::Purchase,
            "REAL-BV",
            "2 tokens",
            5000.0,
            ActivityStatus::Completed,
            Some("0xabc".into()),
        );
        assert_eq!(id, "tx_006");
        assert_eq!(store.activity[0].id, "tx_006");

        let failed = store.filtered_activity(Some(ActivityStatus::Failed), None);
        assert_eq!(failed.len(), 1);
        let purchases = store.filtered_activity(None, Some(ActivityKind::Purchase));
        assert_eq!(purchases.len(), 3);
    }
}
