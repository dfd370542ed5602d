//! Integration tests for the search-backed flows: tag resolution,
//! section aggregation, and similarity, against a mocked search backend.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use engine::{find_similar, BrowseAggregator, SearchClient, TagResolver};

fn client_for(server: &MockServer) -> SearchClient {
    SearchClient::with_base_url("TESTAPP", "test-key", &server.uri())
}

fn hit(id: i64, external_id: &str) -> serde_json::Value {
    json!({
        "objectID": format!("obj-{id}"),
        "Id": id,
        "StrategyName": format!("Strategy {id}"),
        "ExternalId": external_id,
        "StrategyTicker": "STRT",
        "lastMonthReturns": 0.05,
        "totalReturns": 0.2,
        "tags": ["sector::technology_ai", "sector:technology_ai"],
    })
}

fn page(hits: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "hits": hits,
        "nbHits": 0,
        "page": 0,
        "nbPages": 1,
        "hitsPerPage": 10,
    })
}

async fn mount_query(
    server: &MockServer,
    index: &str,
    body: serde_json::Value,
    response: serde_json::Value,
) {
    Mock::given(method("POST"))
        .and(path(format!("/1/indexes/{index}/query")))
        .and(body_partial_json(body))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Tag resolution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resolver_probes_variants_in_order_and_memoizes_the_winner() {
    let server = MockServer::start().await;

    // First two spellings miss, the bare slug hits
    mount_query(
        &server,
        "Strategies",
        json!({ "facetFilters": [["tags:sector::technology_ai"]] }),
        page(vec![]),
    )
    .await;
    mount_query(
        &server,
        "Strategies",
        json!({ "facetFilters": [["tags:sector:technology_ai"]] }),
        page(vec![]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/1/indexes/Strategies/query"))
        .and(body_partial_json(
            json!({ "facetFilters": [["tags:technology_ai"]] }),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![hit(1, "ext-1")])))
        .expect(1) // the second resolve must come from the memo
        .mount(&server)
        .await;

    let resolver = TagResolver::new(client_for(&server));

    let tag = resolver.resolve("sector::technology_ai").await.unwrap();
    assert_eq!(tag.as_deref(), Some("technology_ai"));

    let again = resolver.resolve("sector::technology_ai").await.unwrap();
    assert_eq!(again.as_deref(), Some("technology_ai"));
}

#[tokio::test]
async fn resolver_returns_none_when_every_variant_misses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![])))
        .expect(4) // one probe per candidate spelling
        .mount(&server)
        .await;

    let resolver = TagResolver::new(client_for(&server));
    let tag = resolver.resolve("sector::no_such_thing").await.unwrap();
    assert_eq!(tag, None);
}

#[tokio::test]
async fn resolver_misses_are_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![])))
        .expect(8) // two full probe rounds
        .mount(&server)
        .await;

    let resolver = TagResolver::new(client_for(&server));
    assert_eq!(resolver.resolve("sector::gone").await.unwrap(), None);
    assert_eq!(resolver.resolve("sector::gone").await.unwrap(), None);
}

// ---------------------------------------------------------------------------
// Browse aggregation
// ---------------------------------------------------------------------------

async fn mount_index(server: &MockServer, index: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(format!("/1/indexes/{index}/query")))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn aggregate_omits_empty_groups_and_keeps_priority_order() {
    let server = MockServer::start().await;

    let empty = ResponseTemplate::new(200).set_body_json(page(vec![]));
    let one = |id| ResponseTemplate::new(200).set_body_json(page(vec![hit(id, "ext")]));

    mount_index(&server, "Strategies_CountLast7Days_desc", one(1)).await;
    mount_index(&server, "Strategies_TotalCopies_desc", empty.clone()).await;
    mount_index(&server, "Strategies_TotalCapital_desc", one(2)).await;
    mount_index(&server, "Strategies_CreatedAt_desc", one(3)).await;
    mount_index(&server, "Strategies_CreatedAt_asc", empty.clone()).await;
    mount_index(&server, "Strategies_NumberOfTickers_desc", empty.clone()).await;
    // Recent Peak and Discover both query the base index
    mount_index(&server, "Strategies", empty).await;

    let aggregator = BrowseAggregator::new(client_for(&server));
    let groups = aggregator.aggregate("technology_ai").await.unwrap();

    let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["Trending", "Highest Capital", "Fresh"]);
    assert_eq!(groups[0].entries[0].id, "1");
    assert_eq!(groups[1].entries[0].id, "2");
}

#[tokio::test]
async fn aggregate_degrades_when_a_sub_query_fails() {
    let server = MockServer::start().await;

    let empty = ResponseTemplate::new(200).set_body_json(page(vec![]));
    mount_index(
        &server,
        "Strategies_CountLast7Days_desc",
        ResponseTemplate::new(200).set_body_json(page(vec![hit(1, "ext")])),
    )
    .await;
    mount_index(&server, "Strategies_TotalCopies_desc", empty.clone()).await;
    mount_index(&server, "Strategies_TotalCapital_desc", empty.clone()).await;
    mount_index(&server, "Strategies_CreatedAt_desc", empty.clone()).await;
    mount_index(&server, "Strategies_CreatedAt_asc", empty.clone()).await;
    mount_index(&server, "Strategies_NumberOfTickers_desc", empty).await;
    // Base index is down; Recent Peak and Discover drop out
    mount_index(&server, "Strategies", ResponseTemplate::new(500)).await;

    let aggregator = BrowseAggregator::new(client_for(&server));
    let groups = aggregator.aggregate("technology_ai").await.unwrap();

    let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["Trending"]);
}

#[tokio::test]
async fn aggregate_errors_only_when_every_sub_query_fails() {
    // Nothing mounted: every request 404s
    let server = MockServer::start().await;
    let aggregator = BrowseAggregator::new(client_for(&server));
    assert!(aggregator.aggregate("technology_ai").await.is_err());
}

// ---------------------------------------------------------------------------
// Similarity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn find_similar_excludes_the_base_entry_from_its_own_results() {
    let server = MockServer::start().await;

    let base = json!({
        "objectID": "obj-1",
        "Id": 1,
        "StrategyName": "Base",
        "ExternalId": "ext-1",
        "lastMonthReturns": 0.08,
        "tags": ["sector::technology_ai"],
        "currentAllocation": [
            { "ticker": "MSFT", "fraction": 0.2 },
            { "ticker": "NVDA", "fraction": 0.5 },
            { "ticker": "AAPL", "fraction": 0.3 },
        ],
    });

    // Identifier lookup: single-hit query for the base entry
    mount_query(
        &server,
        "Strategies",
        json!({ "query": "ext-1", "hitsPerPage": 1 }),
        page(vec![base]),
    )
    .await;

    // Similarity query: mandatory return band, heaviest holdings as boosts.
    // The backend echoes the base entry among the matches.
    mount_query(
        &server,
        "Strategies",
        json!({
            "filters": "lastMonthReturns >= 0.0300 AND lastMonthReturns <= 0.1300",
            "optionalFilters": [
                "tags:sector::technology_ai",
                "currentAllocation.ticker:NVDA",
                "currentAllocation.ticker:AAPL",
                "currentAllocation.ticker:MSFT",
            ],
        }),
        page(vec![hit(1, "ext-1"), hit(2, "ext-2"), hit(3, "ext-3")]),
    )
    .await;

    let client = client_for(&server);
    let similar = find_similar(&client, "ext-1", 4).await.unwrap();

    let ids: Vec<&str> = similar.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "3"]);
}

#[tokio::test]
async fn find_similar_for_an_unknown_id_is_empty_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![])))
        .expect(1) // no similarity query after an empty lookup
        .mount(&server)
        .await;

    let client = client_for(&server);
    let similar = find_similar(&client, "ext-missing", 4).await.unwrap();
    assert!(similar.is_empty());
}
