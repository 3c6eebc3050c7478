//! Mock venue for unit testing.
//!
//! This module provides a mock client that can be used in tests
//! without making real network requests. Submitted orders are recorded
//! so tests can assert how many submissions a run performed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::{MarketError, TradingError};
use crate::orderbook::{BookSnapshot, PriceLevel};
use crate::trading::OrderParams;

use super::venue::MarketVenue;

/// Mock order book data for testing.
#[derive(Debug, Clone)]
pub struct MockOrderBook {
    /// Token ID.
    pub token_id: String,
    /// Bid levels.
    pub bids: Vec<PriceLevel>,
    /// Ask levels.
    pub asks: Vec<PriceLevel>,
}

/// Configuration for mock client behavior.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Tick size to return for every token.
    pub tick_size: Decimal,
    /// Whether to fail order book requests.
    pub fail_order_book: bool,
    /// Whether to fail tick size requests.
    pub fail_tick_size: bool,
    /// Whether to fail order submissions.
    pub fail_submit: bool,
    /// Simulated latency in milliseconds.
    pub latency_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            tick_size: Decimal::new(1, 2), // 0.01
            fail_order_book: false,
            fail_tick_size: false,
            fail_submit: false,
            latency_ms: 0,
        }
    }
}

/// Mock venue client for testing.
#[derive(Debug, Clone)]
pub struct MockPolymarketClient {
    /// Mock configuration.
    config: MockConfig,
    /// Mock order books by token ID.
    order_books: Arc<Mutex<HashMap<String, MockOrderBook>>>,
    /// Orders submitted through this client.
    submitted: Arc<Mutex<Vec<OrderParams>>>,
}

impl MockPolymarketClient {
    /// Create a new mock client with default configuration.
    pub fn new() -> Self {
        Self::with_config(MockConfig::default())
    }

    /// Create a mock client with custom configuration.
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            order_books: Arc::new(Mutex::new(HashMap::new())),
            submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a mock order book for a token.
    pub fn set_order_book(&self, book: MockOrderBook) {
        let mut books = self.order_books.lock().unwrap();
        books.insert(book.token_id.clone(), book);
    }

    /// Orders submitted through this client so far.
    pub fn submitted_orders(&self) -> Vec<OrderParams> {
        self.submitted.lock().unwrap().clone()
    }

    /// Number of submissions performed.
    pub fn submission_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }

    /// Clear all mock data.
    pub fn clear(&self) {
        self.order_books.lock().unwrap().clear();
        self.submitted.lock().unwrap().clear();
    }

    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.config.latency_ms)).await;
        }
    }
}

impl Default for MockPolymarketClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketVenue for MockPolymarketClient {
    async fn get_order_book(&self, token_id: &str) -> Result<BookSnapshot, MarketError> {
        self.simulate_latency().await;

        if self.config.fail_order_book {
            return Err(MarketError::FetchFailed {
                what: "order book".to_string(),
                id: token_id.to_string(),
                reason: "Mock order book failure".to_string(),
            });
        }

        let books = self.order_books.lock().unwrap();
        if let Some(mock_book) = books.get(token_id) {
            Ok(BookSnapshot::new(
                mock_book.token_id.clone(),
                mock_book.bids.clone(),
                mock_book.asks.clone(),
            ))
        } else {
            // Return an empty book if not configured
            Ok(BookSnapshot::new(token_id, Vec::new(), Vec::new()))
        }
    }

    async fn get_tick_size(&self, token_id: &str) -> Result<Decimal, MarketError> {
        self.simulate_latency().await;

        if self.config.fail_tick_size {
            return Err(MarketError::InvalidTickSize {
                token_id: token_id.to_string(),
                raw: "mock failure".to_string(),
            });
        }

        Ok(self.config.tick_size)
    }

    async fn submit_order(&self, params: &OrderParams) -> Result<String, TradingError> {
        self.simulate_latency().await;

        if self.config.fail_submit {
            return Err(TradingError::SubmissionFailed(
                "Mock submission failure".to_string(),
            ));
        }

        let mut submitted = self.submitted.lock().unwrap();
        submitted.push(params.clone());
        Ok(format!("mock-order-{}", submitted.len()))
    }
}

/// Builder for creating mock order books with common patterns.
pub struct MockOrderBookBuilder {
    token_id: String,
    bids: Vec<PriceLevel>,
    asks: Vec<PriceLevel>,
}

impl MockOrderBookBuilder {
    /// Create a new builder for the given token.
    pub fn new(token_id: impl Into<String>) -> Self {
        Self {
            token_id: token_id.into(),
            bids: Vec::new(),
            asks: Vec::new(),
        }
    }

    /// Add a bid level.
    pub fn bid(mut self, price: Decimal, size: Decimal) -> Self {
        self.bids.push(PriceLevel { price, size });
        self
    }

    /// Add an ask level.
    pub fn ask(mut self, price: Decimal, size: Decimal) -> Self {
        self.asks.push(PriceLevel { price, size });
        self
    }

    /// Build the mock order book.
    pub fn build(self) -> MockOrderBook {
        MockOrderBook {
            token_id: self.token_id,
            bids: self.bids,
            asks: self.asks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn mock_client_order_book() {
        let client = MockPolymarketClient::new();

        let book = MockOrderBookBuilder::new("token-123")
            .bid(dec!(0.04), dec!(100))
            .bid(dec!(0.03), dec!(200))
            .ask(dec!(0.06), dec!(100))
            .build();
        client.set_order_book(book);

        let result = client.get_order_book("token-123").await.unwrap();
        assert_eq!(result.token_id, "token-123");
        assert_eq!(result.best_bid(), Some(dec!(0.04)));
        assert_eq!(result.best_ask(), Some(dec!(0.06)));
    }

    #[tokio::test]
    async fn mock_client_unconfigured_token_yields_empty_book() {
        let client = MockPolymarketClient::new();
        let book = client.get_order_book("unknown").await.unwrap();
        assert!(book.has_no_bids());
    }

    #[tokio::test]
    async fn mock_client_records_submissions() {
        let client = MockPolymarketClient::new();
        let params = OrderParams::buy("token-123", dec!(0.05), dec!(5));

        let order_id = client.submit_order(&params).await.unwrap();
        assert_eq!(order_id, "mock-order-1");
        assert_eq!(client.submission_count(), 1);
        assert_eq!(client.submitted_orders()[0], params);
    }

    #[tokio::test]
    async fn mock_client_failure_modes() {
        let client = MockPolymarketClient::with_config(MockConfig {
            fail_order_book: true,
            ..Default::default()
        });
        assert!(client.get_order_book("token").await.is_err());

        let client = MockPolymarketClient::with_config(MockConfig {
            fail_submit: true,
            ..Default::default()
        });
        let params = OrderParams::buy("token", dec!(0.05), dec!(5));
        assert!(client.submit_order(&params).await.is_err());
        assert_eq!(client.submission_count(), 0);
    }
}
