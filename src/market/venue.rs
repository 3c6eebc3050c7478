//! Minimal interface to the exchange.
//!
//! The single-shot run only needs three operations from the venue, so they
//! live behind a trait that the real client and the test mock both implement.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::{MarketError, TradingError};
use crate::orderbook::BookSnapshot;
use crate::trading::OrderParams;

/// The vendor surface the bid run depends on.
#[async_trait]
pub trait MarketVenue {
    /// Fetch the current order book for a token.
    async fn get_order_book(&self, token_id: &str) -> Result<BookSnapshot, MarketError>;

    /// Fetch the minimum price increment for a token.
    async fn get_tick_size(&self, token_id: &str) -> Result<Decimal, MarketError>;

    /// Sign and submit an order, returning the venue's order ID.
    async fn submit_order(&self, params: &OrderParams) -> Result<String, TradingError>;
}
