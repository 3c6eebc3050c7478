//! Order book types and data structures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Single price level in an order book.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceLevel {
    /// Price at this level.
    pub price: Decimal,
    /// Total size available at this price.
    pub size: Decimal,
}

impl PriceLevel {
    /// Create a new price level.
    pub fn new(price: Decimal, size: Decimal) -> Self {
        Self { price, size }
    }
}

/// Point-in-time L2 order book for one token.
#[derive(Debug, Clone)]
pub struct BookSnapshot {
    /// Token ID this book represents.
    pub token_id: String,
    /// Bid levels sorted by price descending.
    pub bids: Vec<PriceLevel>,
    /// Ask levels sorted by price ascending.
    pub asks: Vec<PriceLevel>,
    /// When this snapshot was fetched.
    pub fetched_at: OffsetDateTime,
}

impl BookSnapshot {
    /// Create a snapshot, sorting both sides into canonical order.
    pub fn new(token_id: impl Into<String>, mut bids: Vec<PriceLevel>, mut asks: Vec<PriceLevel>) -> Self {
        bids.sort_by(|a, b| b.price.cmp(&a.price));
        asks.sort_by(|a, b| a.price.cmp(&b.price));
        Self {
            token_id: token_id.into(),
            bids,
            asks,
            fetched_at: OffsetDateTime::now_utc(),
        }
    }

    /// Get the best bid price.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|l| l.price)
    }

    /// Best bid price, or zero when the book has no bids.
    pub fn best_bid_or_zero(&self) -> Decimal {
        self.best_bid().unwrap_or(Decimal::ZERO)
    }

    /// Get the best ask price.
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|l| l.price)
    }

    /// Get the spread between best bid and ask.
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Check if there are no resting bids.
    pub fn has_no_bids(&self) -> bool {
        self.bids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn price_level_creation() {
        let level = PriceLevel::new(dec!(0.04), dec!(100));
        assert_eq!(level.price, dec!(0.04));
        assert_eq!(level.size, dec!(100));
    }

    #[test]
    fn snapshot_sorts_sides_canonically() {
        let book = BookSnapshot::new(
            "token",
            vec![
                PriceLevel::new(dec!(0.03), dec!(100)),
                PriceLevel::new(dec!(0.04), dec!(50)),
            ],
            vec![
                PriceLevel::new(dec!(0.07), dec!(100)),
                PriceLevel::new(dec!(0.06), dec!(50)),
            ],
        );

        assert_eq!(book.best_bid(), Some(dec!(0.04)));
        assert_eq!(book.best_ask(), Some(dec!(0.06)));
        assert_eq!(book.spread(), Some(dec!(0.02)));
    }

    #[test]
    fn empty_book_has_zero_best_bid() {
        let book = BookSnapshot::new("token", vec![], vec![]);
        assert!(book.has_no_bids());
        assert_eq!(book.best_bid(), None);
        assert_eq!(book.best_bid_or_zero(), Decimal::ZERO);
        assert_eq!(book.spread(), None);
    }
}
