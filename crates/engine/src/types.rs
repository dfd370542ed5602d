//! View-model types for the discovery engine

use serde::{Deserialize, Serialize};

/// Top-level browse category. Static taxonomy, loaded at process start,
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub detailed_description: String,
}

/// Second taxonomy level. `id` follows the `"<categoryId>::<slug>"`
/// convention; `category_id` always references an existing [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: String,
    pub category_id: String,
    pub name: String,
    pub description: String,
}

/// Qualitative risk band derived from rebalance activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// One holding inside a portfolio allocation. Fractions are passed through
/// from the backend and are not guaranteed to sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub ticker: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub fraction: f64,
}

/// Canonical product shape consumed by presentation.
///
/// `last_month_return` and `total_return` are fractions (0.08 = 8%);
/// presentation multiplies by 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ticker: String,
    pub risk: RiskLevel,
    pub expected_return: String,
    pub category: String,
    pub sub_category_id: String,
    pub profile_image_url: String,
    pub total_capital: f64,
    pub copies_count: u64,
    pub last_month_return: f64,
    pub total_return: f64,
    pub rebalance_activity: f64,
    pub historical_returns: Vec<f64>,
    pub allocation: Vec<AllocationSlice>,
}

/// Named, ordered group of products produced by one aggregation call.
/// Ephemeral: built per request, discarded after render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultGroup {
    pub title: String,
    pub entries: Vec<Product>,
}

/// One coordinate of a normalized chart path
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}
