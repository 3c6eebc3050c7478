//! Single-shot best-bid placer for Polymarket prediction markets.
//!
//! One run fetches a market outcome's order book, computes a new bid one
//! tick above the current best bid, and places a GTC limit buy only when
//! the bid stays at or below a configured ceiling:
//!
//! ```text
//! best bid:  $0.04
//! tick size: $0.01
//! ─────────────────
//! new bid:   $0.05  (placed if <= MAX_BID_PRICE)
//! ```
//!
//! The run is linear: load config, fetch, decide, optionally submit, exit.
//! Dry-run mode (the default) logs the intended order without submitting.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`market`]: Venue trait, CLOB client, Gamma market lookup
//! - [`orderbook`]: Order book snapshot types
//! - [`bidding`]: Bid decision and single-shot run
//! - [`trading`]: Order types and submission
//! - [`signing`]: Wallet signing and CLOB auth headers
//! - [`allowances`]: Token approval guidance

pub mod allowances;
pub mod bidding;
pub mod config;
pub mod error;
pub mod market;
pub mod orderbook;
pub mod signing;
pub mod trading;

pub use config::Config;
pub use error::{BotError, Result};
