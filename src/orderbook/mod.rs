//! Order book module for market data snapshots.

pub mod types;

pub use types::{BookSnapshot, PriceLevel};
