//! Dub-Discover — discovery front-end for copy-trading strategy portfolios
//!
//! Usage:
//!   dub-discover serve --port 3001          — Launch the JSON API server
//!   dub-discover search --query "tech"      — Run a catalog search from CLI

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use clap::{Parser, Subcommand};
use engine::{
    catalog, chart, find_similar, search_products, to_product, BrowseAggregator, ChartFrame,
    EngineError, PortfolioClient, PortfolioDetail, Product, SearchClient, TagResolver,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

const APP_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "-", env!("GIT_HASH"));

/// Historical window requested for the detail chart
const CHART_WINDOW: &str = "YTD";

#[derive(Parser)]
#[command(name = "dub-discover")]
#[command(about = "Discovery front-end for copy-trading strategy portfolios", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the discovery API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value_t = 3001)]
        port: u16,
    },
    /// Run a free-text catalog search from CLI (no web server)
    Search {
        /// Search term
        #[arg(long)]
        query: String,
        /// Maximum number of results
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
}

/// Live backend handles; absent when no search credentials are configured,
/// in which case every read path serves the static mock catalog.
struct LiveBackend {
    search: SearchClient,
    portfolio: PortfolioClient,
    resolver: TagResolver,
    aggregator: BrowseAggregator,
}

#[derive(Clone)]
struct AppState {
    backend: Option<Arc<LiveBackend>>,
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug,engine=debug,dub_discover=debug")
    } else {
        EnvFilter::new("info,engine=info,dub_discover=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).compact())
        .with(filter)
        .init();
}

/// Build the live backend from environment, or None for mock-only mode
fn build_backend() -> Option<Arc<LiveBackend>> {
    let app_id = std::env::var("DUB_SEARCH_APP_ID").ok()?;
    let api_key = std::env::var("DUB_SEARCH_API_KEY").ok()?;
    let portfolio_url = std::env::var("DUB_PORTFOLIO_API_URL")
        .unwrap_or_else(|_| engine::DEFAULT_BASE_URL.to_string());

    let search = SearchClient::new(&app_id, &api_key);
    Some(Arc::new(LiveBackend {
        resolver: TagResolver::new(search.clone()),
        aggregator: BrowseAggregator::new(search.clone()),
        portfolio: PortfolioClient::new(&portfolio_url),
        search,
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dotenvy::dotenv().ok();

    match cli.command {
        Commands::Serve { host, port } => {
            cmd_serve(&host, port).await?;
        }
        Commands::Search { query, limit } => {
            cmd_search(&query, limit).await?;
        }
    }

    Ok(())
}

// ============================================================================
// Serve command — Axum web server
// ============================================================================

async fn cmd_serve(host: &str, port: u16) -> anyhow::Result<()> {
    info!("Dub-Discover v{} starting...", APP_VERSION);

    let backend = build_backend();
    let mode = if backend.is_some() { "live" } else { "mock" };
    info!("Catalog backend mode: {}", mode);

    let state = AppState { backend };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(api_health))
        .route("/categories", get(api_categories))
        .route("/categories/:id/subcategories", get(api_subcategories))
        .route("/browse/:sub_category_id", get(api_browse))
        .route("/search", get(api_search))
        .route("/portfolio/:id", get(api_portfolio))
        .route("/portfolio/:id/similar", get(api_similar))
        .with_state(state);

    let app = Router::new().nest("/api", api_routes).layer(cors);

    let addr: std::net::SocketAddr = format!("{}:{}", host, port).parse()?;
    println!("\n=== Dub-Discover v{} ===", APP_VERSION);
    println!("Strategy Catalog Server ({} mode)", mode);
    println!("Listening on http://{}", addr);
    println!("\nEndpoints:");
    println!("  GET  /api/health                        - Health check");
    println!("  GET  /api/categories                    - Browse categories");
    println!("  GET  /api/categories/:id/subcategories  - Subcategories of one category");
    println!("  GET  /api/browse/:sub_category_id       - Grouped strategy results");
    println!("  GET  /api/search?q=&limit=              - Free-text catalog search");
    println!("  GET  /api/portfolio/:id                 - Portfolio detail + chart");
    println!("  GET  /api/portfolio/:id/similar         - Similar portfolios");
    println!("\nPress Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Search command — CLI mode (no web server)
// ============================================================================

async fn cmd_search(query: &str, limit: u32) -> anyhow::Result<()> {
    println!("\n=== Dub-Discover v{} ===", APP_VERSION);

    let products = match build_backend() {
        Some(backend) => {
            println!("Searching live catalog for {:?}...", query);
            search_products(&backend.search, query, limit).await?
        }
        None => {
            println!("No search credentials set, searching mock catalog for {:?}...", query);
            mock_search(query, limit)
        }
    };

    if products.is_empty() {
        println!("\nNo results.");
        return Ok(());
    }

    println!("\n  {:>3}  {:<28} {:<6} {:<8} {:>10} {:>8}", "#", "Name", "Ticker", "Risk", "Capital", "Return");
    println!("  {}", "-".repeat(72));
    for (i, p) in products.iter().enumerate() {
        println!(
            "  {:>3}  {:<28} {:<6} {:<8} {:>10} {:>8}",
            i + 1,
            p.name,
            p.ticker,
            format!("{:?}", p.risk).to_lowercase(),
            engine::format::format_capital(p.total_capital),
            engine::format::format_return(p.last_month_return),
        );
    }

    Ok(())
}

// ============================================================================
// API Handlers
// ============================================================================

type ApiResult = Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)>;

fn backend_failure(e: EngineError) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::BAD_GATEWAY,
        Json(serde_json::json!({
            "success": false,
            "error": format!("Backend request failed: {}", e),
        })),
    )
}

fn not_found(what: &str) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "error": format!("{} not found", what),
        })),
    )
}

/// GET /api/health
async fn api_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "dub-discover",
        "version": APP_VERSION,
    }))
}

/// GET /api/categories — static browse taxonomy, top level
async fn api_categories() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "data": catalog::categories(),
    }))
}

/// GET /api/categories/:id/subcategories — second taxonomy level;
/// an unknown category id yields an empty list, not an error
async fn api_subcategories(Path(id): Path<String>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "data": catalog::subcategories(&id),
    }))
}

/// GET /api/browse/:sub_category_id — grouped results for one subcategory.
///
/// Live mode resolves the working tag and fans out the section queries;
/// an unresolvable tag or mock mode serves the static catalog rows. Only
/// a subcategory id absent from the static taxonomy is a 404.
async fn api_browse(State(state): State<AppState>, Path(sub_category_id): Path<String>) -> ApiResult {
    if catalog::subcategory(&sub_category_id).is_none() {
        return Err(not_found("Subcategory"));
    }

    let backend = match &state.backend {
        Some(backend) => backend,
        None => return Ok(grouped(catalog::entry_rows(&sub_category_id))),
    };

    match backend.resolver.resolve(&sub_category_id).await {
        Ok(Some(tag)) => {
            let groups = backend
                .aggregator
                .aggregate(&tag)
                .await
                .map_err(backend_failure)?;
            Ok(grouped(groups))
        }
        Ok(None) => {
            info!(sub_category_id, "No indexed tag, serving static rows");
            Ok(grouped(catalog::entry_rows(&sub_category_id)))
        }
        Err(e) => Err(backend_failure(e)),
    }
}

fn grouped(groups: Vec<engine::ResultGroup>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "data": groups,
    }))
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    limit: Option<u32>,
}

/// GET /api/search?q=&limit= — free-text catalog search
async fn api_search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> ApiResult {
    let limit = params.limit.unwrap_or(20);
    let products = match &state.backend {
        Some(backend) => search_products(&backend.search, &params.q, limit)
            .await
            .map_err(backend_failure)?,
        None => mock_search(&params.q, limit),
    };

    Ok(Json(serde_json::json!({
        "success": true,
        "data": products,
        "total": products.len(),
    })))
}

/// GET /api/portfolio/:id — composed portfolio detail.
///
/// Metadata and stats are fatal to the view; the historical series
/// degrades to the flat placeholder chart.
async fn api_portfolio(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult {
    let backend = match &state.backend {
        Some(backend) => backend,
        None => {
            let product = catalog::mock_product(&id).ok_or_else(|| not_found("Portfolio"))?;
            return Ok(detail_payload(&product, serde_json::Value::Null));
        }
    };

    let (data, stats) = tokio::join!(
        backend.portfolio.get_portfolio(&id),
        backend.portfolio.get_stats(&id),
    );
    let data = data.map_err(backend_failure)?;
    let stats = stats.map_err(backend_failure)?;

    let series = match backend.portfolio.get_historical(&id, CHART_WINDOW).await {
        Ok(series) => chart::series_or_fallback(series),
        Err(e) => {
            warn!(id, error = %e, "Historical fetch failed, using placeholder chart");
            chart::fallback_series()
        }
    };

    let creator = serde_json::to_value(&data.creator).unwrap_or(serde_json::Value::Null);
    let detail = PortfolioDetail { data, stats, series };
    let product = to_product(&detail);
    Ok(detail_payload(&product, creator))
}

fn detail_payload(product: &Product, creator: serde_json::Value) -> Json<serde_json::Value> {
    let series = chart::series_or_fallback(product.historical_returns.clone());
    let points = chart::to_points(&series, &ChartFrame::DETAIL);
    Json(serde_json::json!({
        "success": true,
        "data": {
            "product": product,
            "creator": creator,
            "chart": {
                "points": points,
                "path": chart::svg_path(&points),
            },
        },
    }))
}

#[derive(Deserialize)]
struct SimilarParams {
    limit: Option<u32>,
}

/// GET /api/portfolio/:id/similar — similar portfolios; an unknown id is
/// an empty list, never an error
async fn api_similar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<SimilarParams>,
) -> ApiResult {
    let limit = params.limit.unwrap_or(4);
    let products = match &state.backend {
        Some(backend) => find_similar(&backend.search, &id, limit)
            .await
            .map_err(backend_failure)?,
        None => mock_similar(&id, limit),
    };

    Ok(Json(serde_json::json!({
        "success": true,
        "data": products,
        "total": products.len(),
    })))
}

// ============================================================================
// Mock catalog helpers
// ============================================================================

/// Case-insensitive substring match over the static catalog
fn mock_search(term: &str, limit: u32) -> Vec<Product> {
    let needle = term.to_lowercase();
    catalog::mock_products()
        .into_iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .take(limit as usize)
        .collect()
}

/// Mock similarity: same category, the entry itself excluded
fn mock_similar(id: &str, limit: u32) -> Vec<Product> {
    let Some(base) = catalog::mock_product(id) else {
        return Vec::new();
    };
    catalog::mock_products()
        .into_iter()
        .filter(|p| p.category == base.category && p.id != base.id)
        .take(limit as usize)
        .collect()
}
