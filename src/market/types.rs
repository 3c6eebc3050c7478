//! Market metadata types from the Gamma API.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Raw market record from the Gamma API.
///
/// Outcomes, prices, and CLOB token IDs arrive as JSON-encoded strings
/// inside the JSON body, so they are kept raw here and parsed by
/// [`parse_market_tokens`](crate::market::discovery::parse_market_tokens).
#[derive(Debug, Clone, Deserialize)]
pub struct GammaMarket {
    /// Market question text.
    pub question: Option<String>,
    /// Condition ID identifying the market.
    #[serde(rename = "conditionId")]
    pub condition_id: Option<String>,
    /// Market slug.
    pub slug: Option<String>,
    /// Outcome names, JSON-encoded (e.g. `"[\"Yes\", \"No\"]"`).
    pub outcomes: Option<String>,
    /// Outcome prices, JSON-encoded.
    #[serde(rename = "outcomePrices")]
    pub outcome_prices: Option<String>,
    /// CLOB token IDs, JSON-encoded.
    #[serde(rename = "clobTokenIds")]
    pub clob_token_ids: Option<String>,
    /// Traded volume in dollars.
    pub volume: Option<String>,
    /// Current liquidity in dollars.
    pub liquidity: Option<String>,
    /// Market end date (ISO format).
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    /// Whether the market is active.
    pub active: Option<bool>,
    /// Whether the market is closed.
    pub closed: Option<bool>,
}

/// One outcome side of a market with its CLOB token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    /// Outcome name (e.g. "Yes").
    pub outcome: String,
    /// Last traded price, when the API reported one.
    pub price: Option<Decimal>,
    /// CLOB token ID, when the API reported one.
    pub token_id: Option<String>,
}

/// A low-priced outcome found by the market scan.
#[derive(Debug, Clone)]
pub struct LowPricedOutcome {
    /// Market question.
    pub question: String,
    /// Outcome name.
    pub outcome: String,
    /// CLOB token ID.
    pub token_id: String,
    /// Outcome price.
    pub price: Decimal,
    /// Condition ID of the parent market.
    pub condition_id: String,
}
