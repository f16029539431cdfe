use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Items per catalog page (2 rows of 3 in the storefront grid).
pub const BEANS_PER_PAGE: u32 = 6;

/// Error types for Hyperbean operations
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HyperbeanError {
    #[error("Coffee bean not found: {0}")]
    BeanNotFound(u32),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP {0}: {1}")]
    HttpError(u16, String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// JSON error envelope returned by the server for all error responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Result type for Hyperbean operations
pub type Result<T> = std::result::Result<T, HyperbeanError>;

/// Roast levels a bean can carry; serialized with these exact names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoastLevel {
    Light,
    Medium,
    Dark,
    Espresso,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: u32,
    pub name: String,
    pub country: String,
    pub is_fair_trade: bool,
    pub website_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoffeeBean {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
    pub image_key: Option<String>,
    pub tasting_notes: Option<String>,
    /// Price in cents to avoid floating-point money.
    pub price_in_cents: u32,
    pub roast_level: Option<RoastLevel>,
    pub supplier_id: Option<u32>,
}

/// Pagination metadata for one page of the catalog. Constructed server-side
/// and replaced wholesale on every successful page change, never patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    /// 1-based, always >= 1.
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub per_page: u32,
}

impl PaginationInfo {
    /// Build pagination metadata for `requested_page` over `total_count`
    /// items: the page is clamped to at least 1 and `total_pages` is
    /// `ceil(total_count / per_page)`. A page past the end is left as
    /// requested; the corresponding item slice is simply empty.
    pub fn compute(requested_page: i64, total_count: u64, per_page: u32) -> Self {
        let current_page = requested_page.clamp(1, u32::MAX as i64) as u32;
        let total_pages = total_count.div_ceil(per_page as u64) as u32;
        Self { current_page, total_pages, total_count, per_page }
    }
}

/// One page of the catalog as served by `GET /api/beans`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeansPage {
    pub beans: Vec<CoffeeBean>,
    pub pagination: PaginationInfo,
    /// `true` when the accelerated connection path served this request.
    pub is_using_hyperdrive: bool,
    /// Time spent in the store for this request, in milliseconds.
    pub db_duration_ms: u64,
}

/// One bean joined with its supplier, as served by `GET /api/beans/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeanDetail {
    pub bean: CoffeeBean,
    pub supplier: Option<Supplier>,
    pub is_using_hyperdrive: bool,
    pub db_duration_ms: u64,
}
