//! Portfolio REST backend client — read-only portfolio metadata, stats,
//! and historical close series, keyed by entry identifier.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, Result};

pub const DEFAULT_BASE_URL: &str = "https://prod.blue";

// ---------------------------------------------------------------------------
// Deserialization structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_image_url: String,
}

/// One taxonomy tag attached to a strategy by the REST backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyCategoryTag {
    #[serde(default)]
    pub external_id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyInfo {
    #[serde(default)]
    pub strategy_id: String,
    #[serde(default)]
    pub strategy_name: String,
    #[serde(default)]
    pub strategy_tagline: Option<String>,
    #[serde(default)]
    pub strategy_description: String,
    #[serde(default)]
    pub ticker_name: String,
    #[serde(default)]
    pub strategy_category_type: Vec<StrategyCategoryTag>,
    #[serde(default)]
    pub inception_date: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentDto {
    #[serde(default)]
    pub external_id: String,
    #[serde(default)]
    pub ticker: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub sector: Option<String>,
}

/// One equity position; the backend sends the fraction as a string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equity {
    pub instrument_dto: InstrumentDto,
    #[serde(default)]
    pub fraction: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentAllocation {
    #[serde(default)]
    pub equities: Vec<Equity>,
}

/// Full portfolio metadata (the v2 endpoint)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub creator: Creator,
    pub strategy_info: StrategyInfo,
    #[serde(default)]
    pub current_allocation: CurrentAllocation,
}

/// Aggregate stats (the v1 endpoint). Counts and capital arrive as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    #[serde(default)]
    pub dubbers_quantity: String,
    #[serde(default)]
    pub dubbing_capital: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub annual_yield: String,
    #[serde(default)]
    pub all_time_returns: f64,
    #[serde(default)]
    pub average_days_between_rebalances: f64,
    #[serde(default)]
    pub rebalances_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoricalSeries {
    #[serde(default)]
    close: Vec<f64>,
}

/// One window of the historical endpoint's response array
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoricalWindow {
    #[serde(default)]
    #[allow(dead_code)]
    window: String,
    strategy_historical_data: HistoricalSeries,
}

// ---------------------------------------------------------------------------
// Client implementation
// ---------------------------------------------------------------------------

/// Portfolio REST backend client
#[derive(Clone)]
pub struct PortfolioClient {
    client: Client,
    base_url: String,
}

impl Default for PortfolioClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PortfolioClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T> {
        let resp = self.client.get(&url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(EngineError::Backend { status, body });
        }
        Ok(resp.json().await?)
    }

    /// GET /strategies/v2/{id} — full portfolio metadata
    pub async fn get_portfolio(&self, id: &str) -> Result<PortfolioData> {
        let url = format!("{}/strategies/v2/{}", self.base_url, id);
        debug!(id, "Fetching portfolio metadata");
        self.get_json(url).await
    }

    /// GET /strategies/v1/{id} — aggregate stats
    pub async fn get_stats(&self, id: &str) -> Result<PortfolioStats> {
        let url = format!("{}/strategies/v1/{}", self.base_url, id);
        debug!(id, "Fetching portfolio stats");
        self.get_json(url).await
    }

    /// GET /historical/portfolios/v3/{id}?windows={window} — close series
    /// for one window label (e.g. "YTD"). An empty response array yields an
    /// empty series; callers substitute the fallback chart.
    pub async fn get_historical(&self, id: &str, window: &str) -> Result<Vec<f64>> {
        let url = format!(
            "{}/historical/portfolios/v3/{}?windows={}",
            self.base_url, id, window
        );
        debug!(id, window, "Fetching historical series");

        let windows: Vec<HistoricalWindow> = self.get_json(url).await?;
        let series = windows
            .into_iter()
            .next()
            .map(|w| w.strategy_historical_data.close)
            .unwrap_or_default();
        debug!(points = series.len(), "Historical series fetched");
        Ok(series)
    }
}
