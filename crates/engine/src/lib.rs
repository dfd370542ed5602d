//! Dub Discover Engine — catalog discovery for copy-trading strategy
//! portfolios.
//!
//! The engine exposes a browsable taxonomy (categories and subcategories),
//! fans faceted queries out to a hosted search index, composes portfolio
//! detail from a REST backend, and normalizes everything into one canonical
//! product shape for presentation. A static mock catalog backs every read
//! path when no live backend is configured.

pub mod api;
pub mod browse;
pub mod catalog;
pub mod chart;
pub mod convert;
pub mod error;
pub mod format;
pub mod similar;
pub mod tags;
pub mod types;

pub use api::portfolio::{PortfolioClient, PortfolioData, PortfolioStats, DEFAULT_BASE_URL};
pub use api::search::{SearchClient, SearchHit, SearchQuery, SearchResponse};
pub use browse::{search_products, BrowseAggregator, Section};
pub use chart::{fallback_series, series_or_fallback, svg_path, to_points, ChartFrame};
pub use convert::{to_product, PortfolioDetail, StrategyRecord, DEFAULT_PROFILE_IMAGE};
pub use error::{EngineError, Result};
pub use similar::find_similar;
pub use tags::TagResolver;
pub use types::{
    AllocationSlice, Category, ChartPoint, Product, ResultGroup, RiskLevel, SubCategory,
};
