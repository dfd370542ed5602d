//! Query normalizer — maps subcategory ids onto the tag vocabulary the
//! search backend actually indexes.
//!
//! The app convention is `"<category>::<slug>"` but the index may store the
//! tag as `"<category>:<slug>"`, `"<slug>"`, or `"<category>_<slug>"`.
//! Resolution probes deterministic variants in order and keeps the first
//! one that yields a hit. Successful resolutions are memoized per
//! subcategory id; the mapping is near-static so the memo never evicts.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::api::search::{SearchClient, SearchQuery, BASE_INDEX};
use crate::error::Result;

pub struct TagResolver {
    search: SearchClient,
    cache: RwLock<HashMap<String, String>>,
}

impl TagResolver {
    pub fn new(search: SearchClient) -> Self {
        Self {
            search,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Candidate tag spellings for one subcategory id, in probe order:
    /// as-is, single-colon, bare slug, underscore-joined.
    pub fn candidate_tags(sub_category_id: &str) -> Vec<String> {
        let slug = sub_category_id
            .split("::")
            .nth(1)
            .unwrap_or(sub_category_id);
        vec![
            sub_category_id.to_string(),
            sub_category_id.replace("::", ":"),
            slug.to_string(),
            sub_category_id.replace("::", "_"),
        ]
    }

    /// Resolve the working tag for a subcategory.
    ///
    /// Probes candidates sequentially with a 1-hit facet query and returns
    /// the first spelling with at least one hit; `Ok(None)` when every
    /// candidate misses. Misses are not cached (they may be transient);
    /// backend errors propagate.
    pub async fn resolve(&self, sub_category_id: &str) -> Result<Option<String>> {
        if let Some(tag) = self.cache.read().unwrap().get(sub_category_id) {
            return Ok(Some(tag.clone()));
        }

        for candidate in Self::candidate_tags(sub_category_id) {
            let query = SearchQuery::index(BASE_INDEX)
                .with_facet_tag(&candidate)
                .with_hits(1);
            let resp = self.search.search(&query).await?;
            if !resp.hits.is_empty() {
                debug!(sub_category_id, tag = %candidate, "Resolved working tag");
                self.cache
                    .write()
                    .unwrap()
                    .insert(sub_category_id.to_string(), candidate.clone());
                return Ok(Some(candidate));
            }
        }

        debug!(sub_category_id, "No working tag found");
        Ok(None)
    }
}
