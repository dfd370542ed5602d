//! Static catalog model — the built-in taxonomy and mock product list.
//!
//! Pure reads over fixed data: categories, subcategories, and a small
//! product set grouped into rows. Doubles as the fallback data source when
//! no search backend credentials are configured.

use crate::types::{Category, Product, ResultGroup, RiskLevel, SubCategory};

const CATEGORY_ROWS: &[(&str, &str, &str, &str)] = &[
    (
        "sector",
        "Sector",
        "Dominant Economic Sectors",
        "Used to identify the structural economic theme of the portfolio. This category helps you understand which economic sectors will drive the performance of your investments.",
    ),
    (
        "thesis",
        "Thesis",
        "Core Investment Narrative",
        "This is the layer that explains why the portfolio exists. It represents the central investment hypothesis and the fundamental reasoning behind the strategy.",
    ),
    (
        "stage",
        "Stage",
        "Thesis Maturity Phase",
        "Used to convey the maturity profile of assets without explicitly discussing risk. This helps understand whether investments are in early, growth, or mature phases.",
    ),
    (
        "geo",
        "Geo",
        "Geographic Exposure",
        "Defines where value comes from, not just where the company is listed. This category focuses on the geographical sources of revenue and economic exposure.",
    ),
    (
        "horizon",
        "Horizon",
        "Thesis Maturation Time",
        "Helps communicate time expectations without suggesting returns. This category guides you on the expected timeframe for the investment thesis to materialize.",
    ),
    (
        "composition",
        "Composition",
        "Portfolio Structure",
        "Helps users understand the format and structure of the portfolio, not the risk. This focuses on how the portfolio is constructed and what types of instruments it contains.",
    ),
];

// (id, category_id, name, description)
const SUBCATEGORY_ROWS: &[(&str, &str, &str, &str)] = &[
    ("sector::technology_ai", "sector", "Technology & AI", "Tech innovation and artificial intelligence"),
    ("sector::consumer_trends", "sector", "Consumer Trends", "Evolving consumer behavior & brands"),
    ("sector::biotech_healthcare", "sector", "Biotech & Healthcare", "Medical breakthroughs & healthcare services"),
    ("sector::industrials_core", "sector", "Industrials Core", "Manufacturing, infrastructure & logistics"),
    ("sector::defense_aerospace", "sector", "Defense & Aerospace", "Military contracts & space technology"),
    ("sector::finance_value", "sector", "Finance & Value", "Banking, insurance & financial services"),
    ("sector::metals_mining", "sector", "Metals & Mining", "Precious metals, copper, lithium extraction"),
    ("sector::real_assets", "sector", "Real Assets", "Real estate, infrastructure & tangible assets"),
    ("thesis::innovation_wave", "thesis", "Innovation Wave", "Disruptive technologies reshaping industries"),
    ("thesis::long_term_compounders", "thesis", "Long-term Compounders", "Quality businesses with sustainable moats"),
    ("thesis::deep_value_recovery", "thesis", "Deep Value Recovery", "Undervalued assets with turnaround potential"),
    ("thesis::electrification_pipeline", "thesis", "Electrification Pipeline", "Electric vehicles & energy storage ecosystem"),
    ("thesis::nuclear_cycle", "thesis", "Nuclear Cycle", "Nuclear energy renaissance & uranium supply"),
    ("thesis::commodity_supercycle", "thesis", "Commodity Supercycle", "Multi-year commodity price appreciation"),
    ("thesis::space_economy", "thesis", "Space Economy", "Commercial space ventures & satellite tech"),
    ("thesis::defense_spending_cycle", "thesis", "Defense Spending Cycle", "Geopolitical tensions driving military spending"),
    ("thesis::demographic_trend", "thesis", "Demographic Trend", "Aging populations & healthcare demand"),
    ("stage::early_stage", "stage", "Early Stage", "Emerging companies with high growth potential"),
    ("stage::growth", "stage", "Growth", "Scaling companies with proven business models"),
    ("stage::established", "stage", "Established", "Mature market leaders with stable returns"),
    ("stage::mixed", "stage", "Mixed", "Diversified portfolio across all growth stages"),
    ("geo::us_focus", "geo", "US Focus", "American market concentration & exposure"),
    ("geo::global_multi_region", "geo", "Global Multi-Region", "Diversified international exposure"),
    ("geo::commodity_exporters", "geo", "Commodity Exporters", "Resource-rich emerging market exposure"),
    ("geo::china_focus", "geo", "China Focus", "Chinese market & supply chain exposure"),
    ("horizon::long_term_structural", "horizon", "Long-term Structural", "5-10 year mega-trend positioning"),
    ("horizon::thematic", "horizon", "Thematic", "2-5 year investment themes"),
    ("horizon::cyclical_repricing", "horizon", "Cyclical Repricing", "1-3 year economic cycle plays"),
    ("horizon::tactical_opportunity", "horizon", "Tactical Opportunity", "6-18 month market inefficiencies"),
    ("composition::single_stocks_only", "composition", "Single Stocks Only", "Individual stock selection strategy"),
    ("composition::mixed_assets", "composition", "Mixed Assets", "Stocks, bonds, REITs & alternatives"),
    ("composition::etf_core", "composition", "ETF Core", "ETF-focused portfolio construction"),
    ("composition::etf_satellite", "composition", "ETF Satellite", "Core holdings with targeted ETF exposure"),
];

// (id, name, description, risk, category label, sub_category_id, ticker)
const PRODUCT_ROWS: &[(&str, &str, &str, RiskLevel, &str, &str, &str)] = &[
    ("1", "NVIDIA Corp", "Leading AI chip manufacturer", RiskLevel::High, "AI Hardware", "sector::technology_ai", "NVDA"),
    ("2", "Microsoft Corp", "Cloud computing & AI services", RiskLevel::Medium, "Cloud Computing", "sector::technology_ai", "MSFT"),
    ("3", "VanEck Semiconductor ETF", "Semiconductor industry exposure", RiskLevel::Medium, "Tech Hardware", "sector::technology_ai", "SMH"),
    ("4", "Moderna Inc", "mRNA technology pioneer", RiskLevel::High, "Biotechnology", "sector::biotech_healthcare", "MRNA"),
    ("5", "Johnson & Johnson", "Diversified healthcare giant", RiskLevel::Low, "Pharmaceuticals", "sector::biotech_healthcare", "JNJ"),
    ("6", "Lockheed Martin", "Defense contractor leader", RiskLevel::Medium, "Defense Contractors", "sector::defense_aerospace", "LMT"),
    ("7", "SpaceX Ventures Fund", "Private space company exposure", RiskLevel::High, "Space Technology", "sector::defense_aerospace", "SPACEX"),
    ("8", "ARK Innovation ETF", "Disruptive innovation fund", RiskLevel::High, "Innovation Funds", "thesis::innovation_wave", "ARKK"),
    ("9", "Tesla Inc", "Electric vehicle & energy innovation", RiskLevel::High, "EV Technology", "thesis::innovation_wave", "TSLA"),
    ("10", "Cameco Corporation", "Uranium mining leader", RiskLevel::High, "Uranium Mining", "thesis::nuclear_cycle", "CCJ"),
    ("11", "Global X Uranium ETF", "Nuclear energy supply chain", RiskLevel::High, "Nuclear Energy", "thesis::nuclear_cycle", "URA"),
    ("12", "Venture Capital Fund III", "Early-stage startup investments", RiskLevel::High, "Venture Capital", "stage::early_stage", ""),
    ("13", "Growth Equity Fund", "High-growth private companies", RiskLevel::High, "Growth Equity", "stage::early_stage", ""),
    ("14", "S&P 500 ETF", "US large-cap market index", RiskLevel::Medium, "US Index Funds", "geo::us_focus", ""),
    ("15", "Russell 2000 ETF", "US small-cap exposure", RiskLevel::Medium, "Small Cap Index", "geo::us_focus", ""),
    ("16", "Infrastructure Fund", "Global infrastructure investments", RiskLevel::Medium, "Infrastructure", "horizon::long_term_structural", ""),
    ("17", "Clean Energy Transition", "Renewable energy mega-trend", RiskLevel::Medium, "Energy Transition", "horizon::long_term_structural", ""),
    ("18", "Apple Inc", "Technology ecosystem leader", RiskLevel::Medium, "Large Cap Tech", "composition::single_stocks_only", "AAPL"),
    ("19", "Berkshire Hathaway", "Value investing conglomerate", RiskLevel::Low, "Value Stocks", "composition::single_stocks_only", "BRK.B"),
];

/// All categories, in display order
pub fn categories() -> Vec<Category> {
    CATEGORY_ROWS
        .iter()
        .map(|&(id, name, description, detailed)| Category {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            detailed_description: detailed.to_string(),
        })
        .collect()
}

/// Subcategories of one category. Unknown category ids yield an empty
/// list, never an error.
pub fn subcategories(category_id: &str) -> Vec<SubCategory> {
    SUBCATEGORY_ROWS
        .iter()
        .filter(|&&(_, cat, _, _)| cat == category_id)
        .map(|&(id, cat, name, description)| SubCategory {
            id: id.to_string(),
            category_id: cat.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Lookup of a single subcategory by full id
pub fn subcategory(id: &str) -> Option<SubCategory> {
    SUBCATEGORY_ROWS
        .iter()
        .find(|&&(sid, _, _, _)| sid == id)
        .map(|&(sid, cat, name, description)| SubCategory {
            id: sid.to_string(),
            category_id: cat.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        })
}

/// The static product list, in catalog order
pub fn mock_products() -> Vec<Product> {
    PRODUCT_ROWS
        .iter()
        .map(|&(id, name, description, risk, category, sub, ticker)| Product {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            ticker: if ticker.is_empty() {
                crate::format::derive_ticker(name)
            } else {
                ticker.to_string()
            },
            risk,
            expected_return: "0.0%".to_string(),
            category: category.to_string(),
            sub_category_id: sub.to_string(),
            profile_image_url: crate::convert::DEFAULT_PROFILE_IMAGE.to_string(),
            total_capital: 0.0,
            copies_count: 0,
            last_month_return: 0.0,
            total_return: 0.0,
            rebalance_activity: match risk {
                RiskLevel::High => 6.0,
                RiskLevel::Medium => 3.0,
                RiskLevel::Low => 1.0,
            },
            historical_returns: Vec::new(),
            allocation: Vec::new(),
        })
        .collect()
}

/// Mock product by id
pub fn mock_product(id: &str) -> Option<Product> {
    mock_products().into_iter().find(|p| p.id == id)
}

/// Entries for one subcategory, grouped by free-text category label into
/// rows: one group per distinct label, in first-seen order.
pub fn entry_rows(sub_category_id: &str) -> Vec<ResultGroup> {
    let mut groups: Vec<ResultGroup> = Vec::new();
    for product in mock_products()
        .into_iter()
        .filter(|p| p.sub_category_id == sub_category_id)
    {
        match groups.iter_mut().find(|g| g.title == product.category) {
            Some(group) => group.entries.push(product),
            None => groups.push(ResultGroup {
                title: product.category.clone(),
                entries: vec![product],
            }),
        }
    }
    groups
}
