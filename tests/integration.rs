//! Integration tests for the best-bid tool.
//!
//! These tests require a valid POLYMARKET_PRIVATE_KEY environment variable
//! (and BEST_BID_TEST_TOKEN_ID for the order book tests). Run with:
//! cargo test --test integration -- --ignored
//!
//! Note: These tests interact with the real Polymarket API. None of them
//! submit orders.

use polymarket_best_bid::config::Config;
use polymarket_best_bid::market::{search_markets, MarketVenue, PolymarketClient};
use rust_decimal::Decimal;

/// Get a test config from environment.
fn test_config() -> Option<Config> {
    dotenvy::dotenv().ok();

    let private_key = std::env::var("POLYMARKET_PRIVATE_KEY").ok()?;

    // Skip if using placeholder key
    if private_key.starts_with("0x1234") || private_key.len() < 64 {
        return None;
    }

    Some(Config {
        polymarket_private_key: private_key,
        polymarket_funder_address: std::env::var("POLYMARKET_FUNDER_ADDRESS")
            .unwrap_or_else(|_| "0x0000000000000000000000000000000000000000".to_string()),
        polymarket_signature_type: std::env::var("POLYMARKET_SIGNATURE_TYPE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(2),
        polymarket_host: "https://clob.polymarket.com".to_string(),
        gamma_api_url: "https://gamma-api.polymarket.com".to_string(),
        polymarket_chain_id: 137,
        max_bid_price: Decimal::new(5, 2),
        order_size: Decimal::new(5, 0),
        dry_run: true,
        neg_risk: false,
        http_timeout_ms: 20_000,
    })
}

/// Test that we can derive the wallet address.
#[tokio::test]
#[ignore = "requires POLYMARKET_PRIVATE_KEY"]
async fn test_get_address() {
    let config = match test_config() {
        Some(c) => c,
        None => {
            println!("Skipping: POLYMARKET_PRIVATE_KEY not set or invalid");
            return;
        }
    };

    let client = PolymarketClient::new(&config);

    let result = client.get_address();
    assert!(result.is_ok(), "Failed to get address: {:?}", result.err());

    let address = result.unwrap();
    assert!(address.starts_with("0x"), "Invalid address format");
    assert_eq!(address.len(), 42, "Address should be 42 characters");

    println!("Wallet address: {}", address);
}

/// Test that we can fetch an order book and tick size for a real token.
#[tokio::test]
#[ignore = "requires POLYMARKET_PRIVATE_KEY and BEST_BID_TEST_TOKEN_ID"]
async fn test_fetch_book_and_tick() {
    let config = match test_config() {
        Some(c) => c,
        None => {
            println!("Skipping: POLYMARKET_PRIVATE_KEY not set or invalid");
            return;
        }
    };

    let token_id = match std::env::var("BEST_BID_TEST_TOKEN_ID") {
        Ok(id) => id,
        Err(_) => {
            println!("Skipping: BEST_BID_TEST_TOKEN_ID not set");
            return;
        }
    };

    let client = PolymarketClient::new(&config);

    let book = client
        .get_order_book(&token_id)
        .await
        .expect("order book fetch failed");
    assert_eq!(book.token_id, token_id);
    println!(
        "Book: {} bids, {} asks, best bid {:?}",
        book.bids.len(),
        book.asks.len(),
        book.best_bid()
    );

    let tick = client
        .get_tick_size(&token_id)
        .await
        .expect("tick size fetch failed");
    assert!(tick > Decimal::ZERO, "tick size must be positive");
    println!("Tick size: {}", tick);
}

/// Test that the Gamma API market search returns parseable markets.
#[tokio::test]
#[ignore = "hits the public Gamma API"]
async fn test_gamma_market_search() {
    let http_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(20))
        .build()
        .unwrap();

    let markets = search_markets(
        &http_client,
        "https://gamma-api.polymarket.com",
        "",
        10,
        true,
    )
    .await
    .expect("market search failed");

    println!("Fetched {} active markets", markets.len());
    assert!(!markets.is_empty(), "expected at least one active market");
}
