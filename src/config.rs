//! Application configuration loaded from environment variables.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Polymarket Credentials ===
    /// Wallet private key (hex, starts with 0x).
    #[serde(default)]
    pub polymarket_private_key: String,

    /// Proxy wallet address funding the orders.
    #[serde(default)]
    pub polymarket_funder_address: String,

    /// Signature type: 0=EOA, 1=Magic.link, 2=browser wallet proxy.
    #[serde(default = "default_signature_type")]
    pub polymarket_signature_type: u8,

    // === API Endpoints ===
    /// CLOB API base URL.
    #[serde(default = "default_host")]
    pub polymarket_host: String,

    /// Gamma API base URL (market metadata).
    #[serde(default = "default_gamma_url")]
    pub gamma_api_url: String,

    /// Chain ID (137 for Polygon).
    #[serde(default = "default_chain_id")]
    pub polymarket_chain_id: u64,

    // === Bid Settings ===
    /// Maximum acceptable bid price in dollars.
    #[serde(default = "default_max_bid_price")]
    pub max_bid_price: Decimal,

    /// Number of shares to order.
    #[serde(default = "default_order_size")]
    pub order_size: Decimal,

    /// Dry-run mode (log the intended order, never submit).
    #[serde(default = "default_true")]
    pub dry_run: bool,

    /// Whether the target market uses the neg-risk exchange.
    #[serde(default)]
    pub neg_risk: bool,

    // === HTTP ===
    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,
}

fn default_signature_type() -> u8 {
    2 // Browser wallet proxy
}

fn default_host() -> String {
    "https://clob.polymarket.com".to_string()
}

fn default_gamma_url() -> String {
    "https://gamma-api.polymarket.com".to_string()
}

fn default_chain_id() -> u64 {
    137 // Polygon mainnet
}

fn default_max_bid_price() -> Decimal {
    Decimal::new(5, 2) // $0.05
}

fn default_order_size() -> Decimal {
    Decimal::new(5, 0) // 5 shares
}

fn default_true() -> bool {
    true
}

fn default_http_timeout_ms() -> u64 {
    20_000
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check that credentials and bid settings are usable for trading.
    pub fn validate(&self) -> Result<(), String> {
        if self.polymarket_private_key.is_empty() {
            return Err("POLYMARKET_PRIVATE_KEY is not set".to_string());
        }

        if !self.polymarket_private_key.starts_with("0x") {
            return Err("POLYMARKET_PRIVATE_KEY must start with 0x".to_string());
        }

        if self.polymarket_funder_address.is_empty() {
            return Err("POLYMARKET_FUNDER_ADDRESS is not set".to_string());
        }

        if !self.polymarket_funder_address.starts_with("0x") {
            return Err("POLYMARKET_FUNDER_ADDRESS must start with 0x".to_string());
        }

        if self.max_bid_price <= Decimal::ZERO {
            return Err("MAX_BID_PRICE must be positive".to_string());
        }

        if self.order_size <= Decimal::ZERO {
            return Err("ORDER_SIZE must be positive".to_string());
        }

        Ok(())
    }

    /// Masked private key suffix for display.
    pub fn masked_key(&self) -> String {
        if self.polymarket_private_key.len() >= 4 {
            let suffix = &self.polymarket_private_key[self.polymarket_private_key.len() - 4..];
            format!("{}...{}", "*".repeat(10), suffix)
        } else {
            "NOT SET".to_string()
        }
    }
}
