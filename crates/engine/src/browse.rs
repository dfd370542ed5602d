//! Result aggregator — fans out the eight browse section queries for one
//! resolved tag and assembles the non-empty ones into ordered groups.

use chrono::Utc;
use tracing::warn;

use crate::api::search::{
    SearchClient, SearchHit, SearchQuery, BASE_INDEX, CAPITAL_INDEX, COPIES_INDEX, HOLDINGS_INDEX,
    NEWEST_INDEX, OLDEST_INDEX, TRENDING_INDEX,
};
use crate::convert::to_product;
use crate::error::Result;
use crate::types::{Product, ResultGroup};

/// "Recent Peak" keeps entries with a last-month return above this fraction
const RECENT_PEAK_MIN_RETURN: f64 = 0.1;
/// "Diversified" keeps entries holding more than this many distinct tickers
const DIVERSIFIED_MIN_HOLDINGS: u32 = 10;
/// "Fresh" keeps entries younger than this
const FRESH_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;
/// "Long Time in Market" keeps entries older than this
const TENURE_MIN_AGE_SECS: i64 = 365 * 24 * 60 * 60;

const DEFAULT_HITS_PER_PAGE: u32 = 10;

/// The named browse sections, in fixed priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Trending,
    MostCopied,
    HighestCapital,
    RecentPeak,
    Discover,
    Fresh,
    Diversified,
    LongTimeInMarket,
}

impl Section {
    /// Output group order; empty groups are omitted but never reordered
    pub const PRIORITY: [Section; 8] = [
        Section::Trending,
        Section::MostCopied,
        Section::HighestCapital,
        Section::RecentPeak,
        Section::Discover,
        Section::Fresh,
        Section::Diversified,
        Section::LongTimeInMarket,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Trending => "Trending",
            Section::MostCopied => "Most Copied",
            Section::HighestCapital => "Highest Capital",
            Section::RecentPeak => "Recent Peak",
            Section::Discover => "Discover",
            Section::Fresh => "Fresh",
            Section::Diversified => "Diversified",
            Section::LongTimeInMarket => "Long Time in Market",
        }
    }

    /// Build this section's query against one subcategory facet
    pub fn query(&self, tag: &str, hits_per_page: u32) -> SearchQuery {
        let now = Utc::now().timestamp();
        let base = match self {
            Section::Trending => SearchQuery::index(TRENDING_INDEX),
            Section::MostCopied => SearchQuery::index(COPIES_INDEX),
            Section::HighestCapital => SearchQuery::index(CAPITAL_INDEX),
            Section::RecentPeak => SearchQuery::index(BASE_INDEX)
                .with_filters(format!("lastMonthReturns > {RECENT_PEAK_MIN_RETURN}"))
                .with_optional_filters(vec!["CountLast7Days > 10".to_string()]),
            Section::Discover => SearchQuery::index(BASE_INDEX),
            Section::Fresh => SearchQuery::index(NEWEST_INDEX)
                .with_filters(format!("CreatedAt >= {}", now - FRESH_MAX_AGE_SECS)),
            Section::Diversified => SearchQuery::index(HOLDINGS_INDEX)
                .with_filters(format!("numberOfTickers > {DIVERSIFIED_MIN_HOLDINGS}")),
            Section::LongTimeInMarket => SearchQuery::index(OLDEST_INDEX)
                .with_filters(format!("CreatedAt <= {}", now - TENURE_MIN_AGE_SECS)),
        };
        base.with_facet_tag(tag).with_hits(hits_per_page)
    }
}

/// Fans out one query per section and folds the answers into groups
#[derive(Clone)]
pub struct BrowseAggregator {
    search: SearchClient,
    hits_per_page: u32,
}

impl BrowseAggregator {
    pub fn new(search: SearchClient) -> Self {
        Self {
            search,
            hits_per_page: DEFAULT_HITS_PER_PAGE,
        }
    }

    pub fn with_hits_per_page(mut self, hits_per_page: u32) -> Self {
        self.hits_per_page = hits_per_page;
        self
    }

    async fn run(&self, section: Section, tag: &str) -> Result<Vec<SearchHit>> {
        let query = section.query(tag, self.hits_per_page);
        Ok(self.search.search(&query).await?.hits)
    }

    /// Run all eight section queries concurrently and assemble the
    /// non-empty results into named groups in priority order.
    ///
    /// Partial-failure policy: a failed sub-query is logged and omitted
    /// exactly like an empty one. The call as a whole errors only when
    /// every sub-query failed.
    pub async fn aggregate(&self, tag: &str) -> Result<Vec<ResultGroup>> {
        let (trending, most_copied, capital, peak, discover, fresh, diversified, tenure) = tokio::join!(
            self.run(Section::Trending, tag),
            self.run(Section::MostCopied, tag),
            self.run(Section::HighestCapital, tag),
            self.run(Section::RecentPeak, tag),
            self.run(Section::Discover, tag),
            self.run(Section::Fresh, tag),
            self.run(Section::Diversified, tag),
            self.run(Section::LongTimeInMarket, tag),
        );

        let outcomes = [
            (Section::Trending, trending),
            (Section::MostCopied, most_copied),
            (Section::HighestCapital, capital),
            (Section::RecentPeak, peak),
            (Section::Discover, discover),
            (Section::Fresh, fresh),
            (Section::Diversified, diversified),
            (Section::LongTimeInMarket, tenure),
        ];

        let total = outcomes.len();
        let mut groups = Vec::new();
        let mut failures = 0;
        let mut last_error = None;

        for (section, outcome) in outcomes {
            match outcome {
                Ok(hits) if hits.is_empty() => {}
                Ok(hits) => groups.push(ResultGroup {
                    title: section.title().to_string(),
                    entries: hits.iter().map(to_product).collect(),
                }),
                Err(e) => {
                    warn!(section = ?section, error = %e, "Section query failed, omitting group");
                    failures += 1;
                    last_error = Some(e);
                }
            }
        }

        if failures == total {
            // Full backend outage; nothing to degrade to
            return Err(last_error.expect("failures imply an error"));
        }
        Ok(groups)
    }
}

/// Free-text search over the base index, converted to products
pub async fn search_products(
    search: &SearchClient,
    term: &str,
    limit: u32,
) -> Result<Vec<Product>> {
    let query = SearchQuery::index(BASE_INDEX)
        .with_query(term)
        .with_hits(limit);
    let resp = search.search(&query).await?;
    Ok(resp.hits.iter().map(to_product).collect())
}
