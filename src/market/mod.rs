//! Market module for Polymarket data access.
//!
//! This module handles:
//! - The venue trait isolating the vendor API surface
//! - The Polymarket CLOB client
//! - Market lookup via the Gamma API
//! - Mock client for testing

pub mod client;
pub mod discovery;
pub mod mock;
pub mod types;
pub mod venue;

pub use client::PolymarketClient;
pub use discovery::{fetch_market, find_low_price_markets, parse_market_tokens, search_markets};
pub use mock::{MockConfig, MockOrderBook, MockOrderBookBuilder, MockPolymarketClient};
pub use types::{GammaMarket, LowPricedOutcome, TokenInfo};
pub use venue::MarketVenue;
