//! View-model converter — normalizes raw catalog entries from either
//! backend into the canonical [`Product`] shape.
//!
//! The two backends return differently-shaped records. Both are adapted
//! behind the [`StrategyRecord`] trait so conversion (and everything
//! downstream of it) operates on one capability set: identifier, display
//! fields, numeric metrics, tags, allocation, historical series.

use crate::api::portfolio::{PortfolioData, PortfolioStats};
use crate::api::search::SearchHit;
use crate::format::derive_ticker;
use crate::types::{AllocationSlice, Product, RiskLevel};

/// Substituted when a record carries no profile image
pub const DEFAULT_PROFILE_IMAGE: &str =
    "https://d1vuy7y9jvyriv.cloudfront.net/portfolios/default/default.png";

/// Rebalance activity above this reads as high risk
const HIGH_ACTIVITY: f64 = 5.0;
/// Rebalance activity above this reads as medium risk
const MEDIUM_ACTIVITY: f64 = 2.0;

/// Uniform ingestion interface over the raw entry shapes of both backends.
///
/// Tag order must be the stable backend-returned order; extraction picks
/// the first qualifying tag and is only deterministic if the order is.
pub trait StrategyRecord {
    fn record_id(&self) -> String;
    fn name(&self) -> String;
    fn description(&self) -> String;
    fn ticker(&self) -> Option<String>;
    fn tags(&self) -> Vec<String>;
    fn profile_image_url(&self) -> Option<String>;
    fn total_capital(&self) -> f64;
    fn copies_count(&self) -> Option<u64>;
    fn last_month_return(&self) -> f64;
    fn total_return(&self) -> f64;
    /// Average rebalance activity scalar; drives the risk label
    fn rebalance_activity(&self) -> f64;
    fn historical_returns(&self) -> Vec<f64>;
    fn allocation(&self) -> Vec<AllocationSlice>;
}

/// Convert any raw entry into the canonical product shape.
///
/// Pure and total: missing optional fields get documented defaults
/// (default profile image, zero copies) instead of failing.
pub fn to_product(record: &impl StrategyRecord) -> Product {
    let tags = record.tags();
    let name = record.name();
    let ticker = record
        .ticker()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| derive_ticker(&name));

    Product {
        id: record.record_id(),
        description: record.description(),
        ticker,
        risk: risk_level(record.rebalance_activity()),
        expected_return: format!("{:.1}%", record.total_return() * 100.0),
        category: category_label(&tags),
        sub_category_id: sub_category_id(&tags),
        profile_image_url: record
            .profile_image_url()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE_IMAGE.to_string()),
        total_capital: record.total_capital(),
        copies_count: record.copies_count().unwrap_or(0),
        last_month_return: record.last_month_return(),
        total_return: record.total_return(),
        rebalance_activity: record.rebalance_activity(),
        historical_returns: record.historical_returns(),
        allocation: record.allocation(),
        name,
    }
}

fn risk_level(activity: f64) -> RiskLevel {
    if activity > HIGH_ACTIVITY {
        RiskLevel::High
    } else if activity > MEDIUM_ACTIVITY {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// First tag with a single `:` separator (and no `::`), substring before
/// the separator. Falls back to `"Other"`.
fn category_label(tags: &[String]) -> String {
    tags.iter()
        .find(|t| t.contains(':') && !t.contains("::"))
        .and_then(|t| t.split(':').next())
        .map(str::to_string)
        .unwrap_or_else(|| "Other".to_string())
}

/// First tag with a `::` separator; falls back to the first tag, then to
/// the empty string.
fn sub_category_id(tags: &[String]) -> String {
    tags.iter()
        .find(|t| t.contains("::"))
        .cloned()
        .unwrap_or_else(|| tags.first().cloned().unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Adapter: search backend entry
// ---------------------------------------------------------------------------

impl StrategyRecord for SearchHit {
    fn record_id(&self) -> String {
        self.id.to_string()
    }

    fn name(&self) -> String {
        self.strategy_name.clone()
    }

    fn description(&self) -> String {
        self.strategy_tagline.clone()
    }

    fn ticker(&self) -> Option<String> {
        Some(self.strategy_ticker.clone())
    }

    fn tags(&self) -> Vec<String> {
        self.tags.clone()
    }

    fn profile_image_url(&self) -> Option<String> {
        self.profile_image_url.clone()
    }

    fn total_capital(&self) -> f64 {
        self.total_capital
    }

    fn copies_count(&self) -> Option<u64> {
        self.copies_count
    }

    fn last_month_return(&self) -> f64 {
        self.last_month_returns
    }

    fn total_return(&self) -> f64 {
        self.total_returns
    }

    fn rebalance_activity(&self) -> f64 {
        self.average_rebalance_activity
    }

    fn historical_returns(&self) -> Vec<f64> {
        self.historical_returns.clone()
    }

    fn allocation(&self) -> Vec<AllocationSlice> {
        self.current_allocation.clone()
    }
}

// ---------------------------------------------------------------------------
// Adapter: composed REST backend detail
// ---------------------------------------------------------------------------

/// The REST backend splits one portfolio across three endpoints; this
/// composes them into a single record for conversion.
#[derive(Debug, Clone)]
pub struct PortfolioDetail {
    pub data: PortfolioData,
    pub stats: PortfolioStats,
    pub series: Vec<f64>,
}

impl StrategyRecord for PortfolioDetail {
    fn record_id(&self) -> String {
        self.data.strategy_info.strategy_id.clone()
    }

    fn name(&self) -> String {
        self.data.strategy_info.strategy_name.clone()
    }

    fn description(&self) -> String {
        self.data
            .strategy_info
            .strategy_tagline
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.data.strategy_info.strategy_description.clone())
    }

    fn ticker(&self) -> Option<String> {
        Some(self.data.strategy_info.ticker_name.clone())
    }

    fn tags(&self) -> Vec<String> {
        self.data
            .strategy_info
            .strategy_category_type
            .iter()
            .map(|c| c.external_id.clone())
            .collect()
    }

    fn profile_image_url(&self) -> Option<String> {
        self.data.strategy_info.profile_image_url.clone()
    }

    fn total_capital(&self) -> f64 {
        self.stats.dubbing_capital.parse().unwrap_or(0.0)
    }

    fn copies_count(&self) -> Option<u64> {
        self.stats.dubbers_quantity.parse().ok()
    }

    fn last_month_return(&self) -> f64 {
        // The REST backend exposes no 30-day figure; stays at the zero
        // default until the search record supplies one.
        0.0
    }

    fn total_return(&self) -> f64 {
        self.stats.all_time_returns
    }

    fn rebalance_activity(&self) -> f64 {
        // Stats report cadence in days between rebalances; invert to the
        // per-month activity scalar the risk thresholds are defined on.
        if self.stats.average_days_between_rebalances > 0.0 {
            30.0 / self.stats.average_days_between_rebalances
        } else {
            0.0
        }
    }

    fn historical_returns(&self) -> Vec<f64> {
        self.series.clone()
    }

    fn allocation(&self) -> Vec<AllocationSlice> {
        self.data
            .current_allocation
            .equities
            .iter()
            .map(|e| AllocationSlice {
                ticker: e.instrument_dto.ticker.clone(),
                sector: e.instrument_dto.sector.clone(),
                fraction: e.fraction.parse().unwrap_or(0.0),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Adapter: the canonical shape itself
// ---------------------------------------------------------------------------

// A Product is a valid record too, which makes re-conversion a fixpoint:
// to_product(to_product(x)) == to_product(x).
impl StrategyRecord for Product {
    fn record_id(&self) -> String {
        self.id.clone()
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn description(&self) -> String {
        self.description.clone()
    }

    fn ticker(&self) -> Option<String> {
        Some(self.ticker.clone())
    }

    fn tags(&self) -> Vec<String> {
        // Reconstruct a minimal tag set that extracts back to the same
        // labels: the subcategory id first (also the first-tag fallback),
        // then a single-separator tag carrying the category label.
        let slug = self.sub_category_id.split("::").nth(1).unwrap_or("general");
        vec![
            self.sub_category_id.clone(),
            format!("{}:{}", self.category, slug),
        ]
    }

    fn profile_image_url(&self) -> Option<String> {
        Some(self.profile_image_url.clone())
    }

    fn total_capital(&self) -> f64 {
        self.total_capital
    }

    fn copies_count(&self) -> Option<u64> {
        Some(self.copies_count)
    }

    fn last_month_return(&self) -> f64 {
        self.last_month_return
    }

    fn total_return(&self) -> f64 {
        self.total_return
    }

    fn rebalance_activity(&self) -> f64 {
        self.rebalance_activity
    }

    fn historical_returns(&self) -> Vec<f64> {
        self.historical_returns.clone()
    }

    fn allocation(&self) -> Vec<AllocationSlice> {
        self.allocation.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_hit() -> SearchHit {
        serde_json::from_value(serde_json::json!({
            "objectID": "obj-1",
            "Id": 101,
            "StrategyName": "Tech Innovators",
            "ExternalId": "ext-101",
            "StrategyTicker": "TINV",
            "StrategyTagline": "Riding the innovation wave",
            "averageRebalanceActivity": 3.4,
            "totalCapital": 3_200_000.0,
            "copiesCount": 812,
            "lastMonthReturns": 0.08,
            "totalReturns": 0.42,
            "historicalReturns": [0.01, 0.03, 0.02],
            "currentAllocation": [
                { "ticker": "NVDA", "sector": "Technology", "fraction": 0.4 },
                { "ticker": "MSFT", "sector": "Technology", "fraction": 0.3 },
            ],
            "tags": ["sector:technology_ai", "sector::technology_ai", "growth"],
        }))
        .unwrap()
    }

    #[test]
    fn converts_search_hit_to_product() {
        let product = to_product(&make_hit());

        assert_eq!(product.id, "101");
        assert_eq!(product.ticker, "TINV");
        assert_eq!(product.risk, RiskLevel::Medium);
        assert_eq!(product.expected_return, "42.0%");
        assert_eq!(product.category, "sector");
        assert_eq!(product.sub_category_id, "sector::technology_ai");
        assert_eq!(product.copies_count, 812);
        assert_eq!(product.profile_image_url, DEFAULT_PROFILE_IMAGE);
        assert_eq!(product.allocation.len(), 2);
    }

    #[test]
    fn reconversion_is_idempotent() {
        let once = to_product(&make_hit());
        let twice = to_product(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn reconversion_is_idempotent_without_tags() {
        let mut hit = make_hit();
        hit.tags.clear();
        let once = to_product(&hit);
        assert_eq!(once.category, "Other");
        assert_eq!(once.sub_category_id, "");

        let twice = to_product(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn tag_extraction_is_deterministic_for_fixed_order() {
        let mut hit = make_hit();
        hit.tags = vec![
            "stage:growth".to_string(),
            "sector:technology_ai".to_string(),
            "thesis::innovation_wave".to_string(),
            "sector::technology_ai".to_string(),
        ];

        // First qualifying tag wins, every time.
        for _ in 0..3 {
            let product = to_product(&hit);
            assert_eq!(product.category, "stage");
            assert_eq!(product.sub_category_id, "thesis::innovation_wave");
        }
    }

    #[test]
    fn missing_optionals_get_defaults() {
        let hit: SearchHit = serde_json::from_value(serde_json::json!({
            "objectID": "obj-2",
            "Id": 7,
            "StrategyName": "Quiet Value Fund",
        }))
        .unwrap();
        let product = to_product(&hit);

        assert_eq!(product.copies_count, 0);
        assert_eq!(product.profile_image_url, DEFAULT_PROFILE_IMAGE);
        assert_eq!(product.category, "Other");
        assert_eq!(product.sub_category_id, "");
        // No backend ticker: derived from the name instead
        assert_eq!(product.ticker, "QUIE");
        assert_eq!(product.risk, RiskLevel::Low);
    }

    #[test]
    fn risk_bands_follow_activity_thresholds() {
        assert_eq!(risk_level(6.0), RiskLevel::High);
        assert_eq!(risk_level(5.0), RiskLevel::Medium);
        assert_eq!(risk_level(2.5), RiskLevel::Medium);
        assert_eq!(risk_level(2.0), RiskLevel::Low);
        assert_eq!(risk_level(0.0), RiskLevel::Low);
    }

    #[test]
    fn rest_detail_converts_through_the_same_path() {
        let data: PortfolioData = serde_json::from_value(serde_json::json!({
            "creator": { "handle": "alice", "displayName": "Alice" },
            "strategyInfo": {
                "strategyId": "ext-55",
                "strategyName": "Dividend Engine",
                "strategyTagline": null,
                "strategyDescription": "Income compounding",
                "tickerName": "DIVE",
                "strategyCategoryType": [
                    { "externalId": "sector::finance_value", "displayName": "Finance & Value" },
                ],
            },
            "currentAllocation": {
                "equities": [
                    { "instrumentDto": { "ticker": "JPM", "sector": "Financials" }, "fraction": "0.25" },
                ],
            },
        }))
        .unwrap();
        let stats: PortfolioStats = serde_json::from_value(serde_json::json!({
            "dubbersQuantity": "1523",
            "dubbingCapital": "220000",
            "allTimeReturns": 0.3,
            "averageDaysBetweenRebalances": 10.0,
        }))
        .unwrap();

        let detail = PortfolioDetail {
            data,
            stats,
            series: vec![100.0, 104.0, 103.0],
        };
        let product = to_product(&detail);

        assert_eq!(product.id, "ext-55");
        assert_eq!(product.description, "Income compounding");
        assert_eq!(product.sub_category_id, "sector::finance_value");
        assert_eq!(product.copies_count, 1523);
        assert_eq!(product.total_capital, 220000.0);
        assert_eq!(product.allocation[0].fraction, 0.25);
        // 30 / 10 days = activity 3.0 -> medium band
        assert_eq!(product.risk, RiskLevel::Medium);
    }
}
