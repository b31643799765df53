//! Search, filter and sort for the invest and earn pages

use crate::models::{EarnOpportunity, ListingStatus, Property, PropertyType, RiskLevel, Strategy};

/// Sort order of the listing table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PropertySort {
    #[default]
    ApyDesc,
    PriceAsc,
    PriceDesc,
    AvailabilityDesc,
}

impl PropertySort {
    pub fn label(&self) -> &'static str {
        match self {
            PropertySort::ApyDesc => "Highest APY",
            PropertySort::PriceAsc => "Price: Low to High",
            PropertySort::PriceDesc => "Price: High to Low",
            PropertySort::AvailabilityDesc => "Most Available",
        }
    }

    pub fn next(&self) -> PropertySort {
        match self {
            PropertySort::ApyDesc => PropertySort::PriceAsc,
            PropertySort::PriceAsc => PropertySort::PriceDesc,
            PropertySort::PriceDesc => PropertySort::AvailabilityDesc,
            PropertySort::AvailabilityDesc => PropertySort::ApyDesc,
        }
    }
}

/// Sort order of the earn table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EarnSort {
    #[default]
    ApyDesc,
    TvlDesc,
    MinInvestmentAsc,
}

impl EarnSort {
    pub fn label(&self) -> &'static str {
        match self {
            EarnSort::ApyDesc => "Highest APY",
            EarnSort::TvlDesc => "Highest TVL",
            EarnSort::MinInvestmentAsc => "Lowest Minimum",
        }
    }

    pub fn next(&self) -> EarnSort {
        match self {
            EarnSort::ApyDesc => EarnSort::TvlDesc,
            EarnSort::TvlDesc => EarnSort::MinInvestmentAsc,
            EarnSort::MinInvestmentAsc => EarnSort::ApyDesc,
        }
    }
}

/// Step an optional filter through `values`, wrapping back to "all"
pub fn cycle_filter<T: Copy + PartialEq>(current: Option<T>, values: &[T]) -> Option<T> {
    match current {
        None => values.first().copied(),
        Some(value) => {
            let pos = values.iter().position(|v| *v == value);
            pos.and_then(|i| values.get(i + 1)).copied()
        }
    }
}

pub const PROPERTY_TYPES: [PropertyType; 2] = [PropertyType::Residential, PropertyType::Commercial];
pub const LISTING_STATUSES: [ListingStatus; 3] =
    [ListingStatus::Active, ListingStatus::Pending, ListingStatus::SoldOut];
pub const RISK_LEVELS: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];
pub const STRATEGIES: [Strategy; 4] = [
    Strategy::YieldFarming,
    Strategy::Staking,
    Strategy::LiquidityMining,
    Strategy::GrowthFarming,
];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InvestFilters {
    pub query: String,
    pub property_type: Option<PropertyType>,
    pub status: Option<ListingStatus>,
    pub sort: PropertySort,
}

impl InvestFilters {
    pub fn matches(&self, property: &Property) -> bool {
        let query = self.query.trim().to_lowercase();
        let matches_search = query.is_empty()
            || property.name.to_lowercase().contains(&query)
            || property.location.to_lowercase().contains(&query);
        let matches_type = self.property_type.map_or(true, |t| property.property_type == t);
        let matches_status = self.status.map_or(true, |s| property.status == s);
        matches_search && matches_type && matches_status
    }

    pub fn apply<'a>(&self, properties: &'a [Property]) -> Vec<&'a Property> {
        let mut out: Vec<&Property> = properties.iter().filter(|p| self.matches(p)).collect();
        match self.sort {
            PropertySort::ApyDesc => out.sort_by(|a, b| b.apy.total_cmp(&a.apy)),
            PropertySort::PriceAsc => out.sort_by(|a, b| a.price.total_cmp(&b.price)),
            PropertySort::PriceDesc => out.sort_by(|a, b| b.price.total_cmp(&a.price)),
            PropertySort::AvailabilityDesc => {
                out.sort_by(|a, b| b.availability().total_cmp(&a.availability()))
            }
        }
        out
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EarnFilters {
    pub risk: Option<RiskLevel>,
    pub strategy: Option<Strategy>,
    pub sort: EarnSort,
}

impl EarnFilters {
    pub fn apply<'a>(&self, opportunities: &'a [EarnOpportunity]) -> Vec<&'a EarnOpportunity> {
        let mut out: Vec<&EarnOpportunity> = opportunities
            .iter()
            .filter(|o| self.risk.map_or(true, |r| o.risk == r))
            .filter(|o| self.strategy.map_or(true, |s| o.strategy == s))
            .collect();
        match self.sort {
            EarnSort::ApyDesc => out.sort_by(|a, b| b.apy.total_cmp(&a.apy)),
            EarnSort::TvlDesc => out.sort_by(|a, b| b.total_locked.total_cmp(&a.total_locked)),
            EarnSort::MinInvestmentAsc => {
                out.sort_by(|a, b| a.min_investment.total_cmp(&b.min_investment))
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    fn names<'a>(props: &[&'a Property]) -> Vec<&'a str> {
        props.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_cycle_filter_wraps_to_all() {
        let mut f = None;
        f = cycle_filter(f, &RISK_LEVELS);
        assert_eq!(f, Some(RiskLevel::Low));
        f = cycle_filter(f, &RISK_LEVELS);
        f = cycle_filter(f, &RISK_LEVELS);
        assert_eq!(f, Some(RiskLevel::High));
        assert_eq!(cycle_filter(f, &RISK_LEVELS), None);
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_location() {
        let props = data::properties();
        let filters = InvestFilters {
            query: "MIAMI".into(),
            ..Default::default()
        };
        assert_eq!(names(&filters.apply(&props)), vec!["Beachfront Villa"]);

        let filters = InvestFilters {
            query: "chalet".into(),
            ..Default::default()
        };
        assert_eq!(names(&filters.apply(&props)), vec!["Mountain Chalet"]);
    }

    #[test]
    fn test_type_and_status_filters_combine() {
        let props = data::properties();
        let filters = InvestFilters {
            property_type: Some(PropertyType::Commercial),
            status: Some(ListingStatus::Active),
            sort: PropertySort::PriceAsc,
            ..Default::default()
        };
        assert_eq!(
            names(&filters.apply(&props)),
            vec!["Retail Shopping Center", "Commercial Office Building"]
        );
    }

    #[test]
    fn test_default_sort_is_highest_apy() {
        let props = data::properties();
        let sorted = InvestFilters::default().apply(&props);
        assert_eq!(sorted.len(), props.len());
        assert!(sorted.windows(2).all(|w| w[0].apy >= w[1].apy));
        assert_eq!(sorted[0].name, "Urban Loft in City Center");
    }

    #[test]
    fn test_earn_filters() {
        let opps = data::opportunities();
        let filters = EarnFilters {
            risk: Some(RiskLevel::Medium),
            sort: EarnSort::MinInvestmentAsc,
            ..Default::default()
        };
        let titles: Vec<_> = filters.apply(&opps).iter().map(|o| o.title.as_str()).collect();
        assert_eq!(titles, vec!["High-Yield Residential Pool", "Suburban Growth Fund"]);

        let filters = EarnFilters {
            strategy: Some(Strategy::Staking),
            ..Default::default()
        };
        assert_eq!(filters.apply(&opps).len(), 1);
    }
}
