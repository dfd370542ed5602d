//! Hosted search index client — queries the strategy catalog by tag,
//! facet, filter expression, and sort replica.
//!
//! Sort orders are separate replica indexes on the backend; each query names
//! the index it wants. Credentials and base URL are injected so tests can
//! point the client at a local mock server.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::types::AllocationSlice;

/// Primary index, relevance-ranked
pub const BASE_INDEX: &str = "Strategies";
/// Replica sorted by 7-day rebalance activity, descending
pub const TRENDING_INDEX: &str = "Strategies_CountLast7Days_desc";
/// Replica sorted by total copies, descending
pub const COPIES_INDEX: &str = "Strategies_TotalCopies_desc";
/// Replica sorted by total copied capital, descending
pub const CAPITAL_INDEX: &str = "Strategies_TotalCapital_desc";
/// Replica sorted by creation time, newest first
pub const NEWEST_INDEX: &str = "Strategies_CreatedAt_desc";
/// Replica sorted by creation time, oldest first
pub const OLDEST_INDEX: &str = "Strategies_CreatedAt_asc";
/// Replica sorted by distinct holding count, descending
pub const HOLDINGS_INDEX: &str = "Strategies_NumberOfTickers_desc";

// ---------------------------------------------------------------------------
// Deserialization structs
// ---------------------------------------------------------------------------

/// One strategy record as indexed by the search backend.
///
/// Field casing mirrors the index schema (a PascalCase/camelCase mix).
/// Everything presentation-optional carries a default so a sparse record
/// still deserializes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "objectID", default)]
    pub object_id: String,
    #[serde(rename = "Id", default)]
    pub id: i64,
    #[serde(rename = "StrategyName", default)]
    pub strategy_name: String,
    #[serde(rename = "ExternalId", default)]
    pub external_id: String,
    /// Unix seconds; the backend filters on this numerically
    #[serde(rename = "CreatedAt", default)]
    pub created_at: i64,
    #[serde(rename = "StrategyTicker", default)]
    pub strategy_ticker: String,
    #[serde(rename = "ProfileImageUrl", default)]
    pub profile_image_url: Option<String>,
    #[serde(rename = "StrategyDescription", default)]
    pub strategy_description: String,
    #[serde(rename = "StrategyTagline", default)]
    pub strategy_tagline: String,
    #[serde(rename = "averageRebalanceActivity", default)]
    pub average_rebalance_activity: f64,
    #[serde(rename = "CountLast7Days", default)]
    pub count_last_7_days: i64,
    #[serde(rename = "totalCapital", default)]
    pub total_capital: f64,
    #[serde(rename = "creatorHandle", default)]
    pub creator_handle: String,
    #[serde(rename = "creatorName", default)]
    pub creator_name: String,
    #[serde(rename = "copiesCount", default)]
    pub copies_count: Option<u64>,
    #[serde(rename = "lastMonthReturns", default)]
    pub last_month_returns: f64,
    #[serde(rename = "totalReturns", default)]
    pub total_returns: f64,
    #[serde(rename = "historicalReturns", default)]
    pub historical_returns: Vec<f64>,
    #[serde(rename = "currentAllocation", default)]
    pub current_allocation: Vec<AllocationSlice>,
    #[serde(rename = "numberOfTickers", default)]
    pub number_of_tickers: u32,
    /// Ordered as returned by the backend; tag extraction depends on
    /// this order being stable
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Single page of search results
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<SearchHit>,
    #[serde(default)]
    pub nb_hits: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub nb_pages: u32,
    #[serde(default)]
    pub hits_per_page: u32,
}

// ---------------------------------------------------------------------------
// Query builder
// ---------------------------------------------------------------------------

/// One search request: index name plus the query parameters the backend
/// understands. Build with the chained `with_*` methods.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub index: String,
    pub query: String,
    pub hits_per_page: u32,
    pub filters: Option<String>,
    pub facet_filters: Option<Vec<Vec<String>>>,
    pub optional_filters: Option<Vec<String>>,
}

impl SearchQuery {
    pub fn index(index: &str) -> Self {
        Self {
            index: index.to_string(),
            query: String::new(),
            hits_per_page: 20,
            filters: None,
            facet_filters: None,
            optional_filters: None,
        }
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = query.to_string();
        self
    }

    pub fn with_hits(mut self, hits_per_page: u32) -> Self {
        self.hits_per_page = hits_per_page;
        self
    }

    /// Structured filter expression, e.g. `"lastMonthReturns > 0.1"`
    pub fn with_filters(mut self, filters: String) -> Self {
        self.filters = Some(filters);
        self
    }

    /// Exact-match constraint on one tag dimension
    pub fn with_facet_tag(mut self, tag: &str) -> Self {
        self.facet_filters = Some(vec![vec![format!("tags:{tag}")]]);
        self
    }

    /// Non-mandatory ranking boosts: matching is not required, ranking
    /// is influenced
    pub fn with_optional_filters(mut self, boosts: Vec<String>) -> Self {
        self.optional_filters = Some(boosts);
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryBody<'a> {
    query: &'a str,
    hits_per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    filters: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    facet_filters: Option<&'a Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    optional_filters: Option<&'a Vec<String>>,
}

// ---------------------------------------------------------------------------
// Client implementation
// ---------------------------------------------------------------------------

/// Search backend client
#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    app_id: String,
    api_key: String,
    base_url: String,
}

impl SearchClient {
    pub fn new(app_id: &str, api_key: &str) -> Self {
        let base_url = format!("https://{}-dsn.algolia.net", app_id.to_lowercase());
        Self::with_base_url(app_id, api_key, &base_url)
    }

    /// Client against an explicit base URL (tests, self-hosted mirrors)
    pub fn with_base_url(app_id: &str, api_key: &str, base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            app_id: app_id.to_string(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// POST /1/indexes/{index}/query — run one search
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let url = format!("{}/1/indexes/{}/query", self.base_url, query.index);
        debug!(index = %query.index, hits_per_page = query.hits_per_page, "Searching strategy index");

        let body = QueryBody {
            query: &query.query,
            hits_per_page: query.hits_per_page,
            filters: query.filters.as_ref(),
            facet_filters: query.facet_filters.as_ref(),
            optional_filters: query.optional_filters.as_ref(),
        };

        let resp = self
            .client
            .post(&url)
            .header("X-Algolia-Application-Id", &self.app_id)
            .header("X-Algolia-API-Key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(EngineError::Backend { status, body });
        }

        let parsed: SearchResponse = resp.json().await?;
        debug!(hits = parsed.hits.len(), "Search complete");
        Ok(parsed)
    }

    /// Exact identifier lookup: single-hit query against the base index.
    /// Zero hits resolve to `None`, never an error.
    pub async fn lookup(&self, external_id: &str) -> Result<Option<SearchHit>> {
        let query = SearchQuery::index(BASE_INDEX)
            .with_query(external_id)
            .with_hits(1);
        let resp = self.search(&query).await?;
        Ok(resp.hits.into_iter().next())
    }
}
