//! Similarity resolver — derives a similarity query from one catalog entry
//! and excludes the entry from its own result set.

use std::cmp::Ordering;

use tracing::debug;

use crate::api::search::{SearchClient, SearchQuery, BASE_INDEX};
use crate::convert::to_product;
use crate::error::Result;
use crate::types::Product;

/// Symmetric half-width of the last-month-return match band
const RETURN_BAND: f64 = 0.05;
/// How many of the heaviest holdings become ranking boosts
const TOP_HOLDINGS: usize = 3;

/// Build the mandatory return-band filter around a base return
fn return_band_filter(base_return: f64) -> String {
    format!(
        "lastMonthReturns >= {:.4} AND lastMonthReturns <= {:.4}",
        base_return - RETURN_BAND,
        base_return + RETURN_BAND
    )
}

/// Find portfolios similar to `external_id`.
///
/// The base entry's tags and top-3 holdings are non-mandatory ranking
/// boosts; only the return band is a hard constraint. An unknown id
/// resolves to an empty list, never an error. Backend ranking is treated
/// as opaque: no local re-sorting, no randomness.
pub async fn find_similar(
    search: &SearchClient,
    external_id: &str,
    limit: u32,
) -> Result<Vec<Product>> {
    let base = match search.lookup(external_id).await? {
        Some(hit) => hit,
        None => {
            debug!(external_id, "Base entry not found, no similar results");
            return Ok(Vec::new());
        }
    };

    // Heaviest holdings first; stable sort keeps backend order on ties
    let mut holdings = base.current_allocation.clone();
    holdings.sort_by(|a, b| {
        b.fraction
            .partial_cmp(&a.fraction)
            .unwrap_or(Ordering::Equal)
    });

    let boosts: Vec<String> = base
        .tags
        .iter()
        .map(|tag| format!("tags:{tag}"))
        .chain(
            holdings
                .iter()
                .take(TOP_HOLDINGS)
                .map(|h| format!("currentAllocation.ticker:{}", h.ticker)),
        )
        .collect();

    let query = SearchQuery::index(BASE_INDEX)
        .with_hits(limit)
        .with_filters(return_band_filter(base.last_month_returns))
        .with_optional_filters(boosts);

    let resp = search.search(&query).await?;
    debug!(external_id, hits = resp.hits.len(), "Similarity query complete");

    Ok(resp
        .hits
        .iter()
        .filter(|hit| hit.external_id != external_id)
        .map(to_product)
        .collect())
}
