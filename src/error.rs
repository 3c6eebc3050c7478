//! Unified error types for the best-bid tool.

use rust_decimal::Decimal;
use thiserror::Error;

/// Unified error type for the best-bid tool.
#[derive(Error, Debug)]
pub enum BotError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration or request validation error.
    #[error("validation error: {0}")]
    Validation(String),

    /// Market-related error.
    #[error("market error: {0}")]
    Market(#[from] MarketError),

    /// Trading/order error.
    #[error("trading error: {0}")]
    Trading(#[from] TradingError),

    /// HTTP request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Market data fetch and parse errors.
#[derive(Error, Debug)]
pub enum MarketError {
    /// Failed to fetch data for a token or market.
    #[error("failed to fetch {what} for {id}: {reason}")]
    FetchFailed {
        /// What was being fetched (order book, tick size, market).
        what: String,
        /// Token ID or condition ID.
        id: String,
        /// Reason for failure.
        reason: String,
    },

    /// Market not found.
    #[error("market not found: {condition_id}")]
    NotFound {
        /// The condition ID that was looked up.
        condition_id: String,
    },

    /// Tick size from the API is not a positive decimal.
    #[error("invalid tick size for {token_id}: {raw}")]
    InvalidTickSize {
        /// Token the tick size was requested for.
        token_id: String,
        /// Raw value returned by the API.
        raw: String,
    },

    /// Failed to parse market data.
    #[error("failed to parse market data: {0}")]
    ParseError(String),

    /// HTTP request failed.
    #[error("http request failed: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Trading and order submission errors.
#[derive(Error, Debug)]
pub enum TradingError {
    /// Order submission failed.
    #[error("order submission failed: {0}")]
    SubmissionFailed(String),

    /// Order rejected by the exchange.
    #[error("order rejected: {reason}")]
    OrderRejected {
        /// Rejection reason from the exchange.
        reason: String,
    },

    /// Invalid order parameters.
    #[error("invalid order parameters: {0}")]
    InvalidParams(String),

    /// Signing error.
    #[error("signing error: {0}")]
    SigningError(String),

    /// Authentication failed.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Insufficient funds for the order.
    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds {
        /// Required amount.
        required: Decimal,
        /// Available amount.
        available: Decimal,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, BotError>;
