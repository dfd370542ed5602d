//! Backend API clients (search index and portfolio REST API)

pub mod portfolio;
pub mod search;

pub use portfolio::{PortfolioClient, PortfolioData, PortfolioStats};
pub use search::{SearchClient, SearchHit, SearchQuery, SearchResponse};
