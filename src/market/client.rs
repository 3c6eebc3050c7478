//! Polymarket API client wrapper.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{MarketError, TradingError};
use crate::orderbook::{BookSnapshot, PriceLevel};
use crate::signing;
use crate::trading::{self, OrderParams};

use super::venue::MarketVenue;

/// Polymarket CLOB API client.
#[derive(Debug, Clone)]
pub struct PolymarketClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL for CLOB API.
    clob_url: String,
    /// Wallet private key.
    private_key: String,
    /// Signature type (0=EOA, 1=Magic.link, 2=browser proxy).
    signature_type: u8,
    /// Funder address (proxy wallet).
    funder: String,
    /// Chain ID (137 for Polygon).
    chain_id: u64,
    /// Whether orders target the neg-risk exchange.
    neg_risk: bool,
}

/// Order book response from API.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBookResponse {
    /// Bid levels.
    pub bids: Option<Vec<OrderLevel>>,
    /// Ask levels.
    pub asks: Option<Vec<OrderLevel>>,
    /// Market ID.
    pub market: Option<String>,
    /// Asset ID.
    pub asset_id: Option<String>,
}

/// Single price level in order book.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderLevel {
    /// Price at this level.
    pub price: String,
    /// Size available at this level.
    pub size: String,
}

/// Tick size response from API.
#[derive(Debug, Clone, Deserialize)]
struct TickSizeResponse {
    /// Minimum price increment as a decimal string.
    minimum_tick_size: serde_json::Value,
}

/// Balance allowance response from API.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceAllowanceResponse {
    /// Balance in wei.
    pub balance: Option<String>,
    /// Allowance in wei.
    pub allowance: Option<String>,
}

impl PolymarketClient {
    /// Create a new Polymarket client from config.
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.http_timeout_ms))
            .connect_timeout(std::time::Duration::from_millis(2_000))
            .tcp_keepalive(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to create HTTP client");

        Self {
            http,
            clob_url: config.polymarket_host.clone(),
            private_key: config.polymarket_private_key.clone(),
            signature_type: config.polymarket_signature_type,
            funder: config.polymarket_funder_address.clone(),
            chain_id: config.polymarket_chain_id,
            neg_risk: config.neg_risk,
        }
    }

    /// Get the HTTP client reference.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Get the private key (for direct signing operations).
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// Get the signature type.
    pub fn signature_type(&self) -> u8 {
        self.signature_type
    }

    /// Get funder address.
    pub fn funder(&self) -> &str {
        &self.funder
    }

    /// Get the CLOB base URL.
    pub fn clob_url(&self) -> &str {
        &self.clob_url
    }

    /// Get the chain ID.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Whether orders target the neg-risk exchange.
    pub fn neg_risk(&self) -> bool {
        self.neg_risk
    }

    /// Get the wallet address derived from the private key.
    pub fn get_address(&self) -> Result<String, TradingError> {
        signing::address_from_private_key(&self.private_key)
    }

    /// Fetch the order book for a token.
    #[instrument(skip(self), fields(token_id = %token_id))]
    pub async fn fetch_order_book(&self, token_id: &str) -> Result<BookSnapshot, MarketError> {
        let url = format!("{}/book", self.clob_url);

        let response = self
            .http
            .get(&url)
            .query(&[("token_id", token_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketError::FetchFailed {
                what: "order book".to_string(),
                id: token_id.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let book: OrderBookResponse = response
            .json()
            .await
            .map_err(|e| MarketError::ParseError(format!("Failed to parse order book: {}", e)))?;

        Ok(convert_order_book(token_id, book))
    }

    /// Fetch the minimum price increment for a token.
    #[instrument(skip(self), fields(token_id = %token_id))]
    pub async fn fetch_tick_size(&self, token_id: &str) -> Result<Decimal, MarketError> {
        let url = format!("{}/tick-size", self.clob_url);

        let response = self
            .http
            .get(&url)
            .query(&[("token_id", token_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketError::FetchFailed {
                what: "tick size".to_string(),
                id: token_id.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let tick: TickSizeResponse = response
            .json()
            .await
            .map_err(|e| MarketError::ParseError(format!("Failed to parse tick size: {}", e)))?;

        parse_tick_size(token_id, &tick.minimum_tick_size)
    }

    /// Get USDC balance using an authenticated API call.
    #[instrument(skip(self))]
    pub async fn get_balance(&self) -> Result<Decimal, TradingError> {
        debug!("Getting balance from Polymarket API");

        let url = format!("{}/balance-allowance", self.clob_url);
        let auth_headers =
            signing::generate_auth_headers(&self.private_key, self.signature_type).await?;

        let mut request = self.http.get(&url);
        for (key, value) in auth_headers {
            request = request.header(&key, &value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TradingError::SubmissionFailed(format!("Failed to get balance: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TradingError::SubmissionFailed(format!(
                "Balance request failed: HTTP {} - {}",
                status, body
            )));
        }

        let balance_response: BalanceAllowanceResponse = response
            .json()
            .await
            .map_err(|e| TradingError::SubmissionFailed(format!("Failed to parse balance: {}", e)))?;

        // Balance arrives in wei, 6 decimals for USDC
        let balance_wei: Decimal = balance_response
            .balance
            .as_deref()
            .unwrap_or("0")
            .parse()
            .unwrap_or(Decimal::ZERO);

        let balance = balance_wei / Decimal::new(1_000_000, 0);

        debug!(balance = %balance, "Retrieved USDC balance");

        Ok(balance)
    }
}

#[async_trait]
impl MarketVenue for PolymarketClient {
    async fn get_order_book(&self, token_id: &str) -> Result<BookSnapshot, MarketError> {
        self.fetch_order_book(token_id).await
    }

    async fn get_tick_size(&self, token_id: &str) -> Result<Decimal, MarketError> {
        self.fetch_tick_size(token_id).await
    }

    async fn submit_order(&self, params: &OrderParams) -> Result<String, TradingError> {
        trading::execution::submit_order(self, params).await
    }
}

/// Convert API response to a book snapshot, dropping empty levels.
fn convert_order_book(token_id: &str, response: OrderBookResponse) -> BookSnapshot {
    let parse_levels = |levels: Option<Vec<OrderLevel>>| -> Vec<PriceLevel> {
        levels
            .unwrap_or_default()
            .into_iter()
            .filter_map(|level| {
                let price: Decimal = level.price.parse().ok()?;
                let size: Decimal = level.size.parse().ok()?;
                if size > Decimal::ZERO {
                    Some(PriceLevel { price, size })
                } else {
                    None
                }
            })
            .collect()
    };

    let bids = parse_levels(response.bids);
    let asks = parse_levels(response.asks);

    BookSnapshot::new(token_id, bids, asks)
}

/// Parse a tick size value, which the API reports as a string or number.
fn parse_tick_size(token_id: &str, raw: &serde_json::Value) -> Result<Decimal, MarketError> {
    let parsed = match raw {
        serde_json::Value::String(s) => s.parse::<Decimal>().ok(),
        serde_json::Value::Number(n) => n.as_f64().and_then(|f| Decimal::try_from(f).ok()),
        _ => None,
    };

    match parsed {
        Some(tick) if tick > Decimal::ZERO => Ok(tick),
        _ => Err(MarketError::InvalidTickSize {
            token_id: token_id.to_string(),
            raw: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn test_config() -> Config {
        Config {
            polymarket_private_key:
                "0x0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef".to_string(),
            polymarket_funder_address: "0x1111111111111111111111111111111111111111".to_string(),
            polymarket_signature_type: 2,
            polymarket_host: "https://clob.polymarket.com".to_string(),
            gamma_api_url: "https://gamma-api.polymarket.com".to_string(),
            polymarket_chain_id: 137,
            max_bid_price: dec!(0.05),
            order_size: dec!(5),
            dry_run: true,
            neg_risk: false,
            http_timeout_ms: 20_000,
        }
    }

    #[test]
    fn client_creation_works() {
        let config = test_config();
        let client = PolymarketClient::new(&config);
        assert_eq!(client.chain_id(), 137);
        assert_eq!(client.clob_url(), "https://clob.polymarket.com");
        assert!(!client.neg_risk());
    }

    #[test]
    fn get_address_works() {
        let config = test_config();
        let client = PolymarketClient::new(&config);
        let address = client.get_address().unwrap();
        assert!(address.starts_with("0x"));
        assert_eq!(address.len(), 42); // 0x + 40 hex chars
    }

    #[test]
    fn convert_order_book_drops_empty_levels_and_sorts() {
        let response = OrderBookResponse {
            bids: Some(vec![
                OrderLevel {
                    price: "0.03".to_string(),
                    size: "100".to_string(),
                },
                OrderLevel {
                    price: "0.04".to_string(),
                    size: "50".to_string(),
                },
                OrderLevel {
                    price: "0.05".to_string(),
                    size: "0".to_string(),
                },
            ]),
            asks: Some(vec![OrderLevel {
                price: "0.07".to_string(),
                size: "10".to_string(),
            }]),
            market: None,
            asset_id: None,
        };

        let book = convert_order_book("token", response);
        assert_eq!(book.best_bid(), Some(dec!(0.04)));
        assert_eq!(book.bids.len(), 2); // zero-size level dropped
        assert_eq!(book.best_ask(), Some(dec!(0.07)));
    }

    #[test]
    fn parse_tick_size_accepts_string_and_number() {
        assert_eq!(
            parse_tick_size("t", &serde_json::json!("0.01")).unwrap(),
            dec!(0.01)
        );
        assert_eq!(
            parse_tick_size("t", &serde_json::json!(0.001)).unwrap(),
            dec!(0.001)
        );
    }

    #[test]
    fn parse_tick_size_rejects_non_positive() {
        assert!(parse_tick_size("t", &serde_json::json!("0")).is_err());
        assert!(parse_tick_size("t", &serde_json::json!("-0.01")).is_err());
        assert!(parse_tick_size("t", &serde_json::json!("bogus")).is_err());
        assert!(parse_tick_size("t", &serde_json::json!(null)).is_err());
    }
}
