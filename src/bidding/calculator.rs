//! Pure bid decision logic.

use rust_decimal::Decimal;

/// Why a run decided not to place an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The market's best bid is already at or above the ceiling.
    BestBidAtCeiling {
        /// Current best bid.
        best_bid: Decimal,
        /// Configured ceiling.
        max_price: Decimal,
    },
    /// One tick above the best bid would exceed the ceiling.
    NextTickAboveCeiling {
        /// The candidate price (best_bid + tick_size).
        candidate: Decimal,
        /// Configured ceiling.
        max_price: Decimal,
    },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::BestBidAtCeiling {
                best_bid,
                max_price,
            } => write!(
                f,
                "best bid ${} already at or above max price ${}",
                best_bid, max_price
            ),
            SkipReason::NextTickAboveCeiling {
                candidate,
                max_price,
            } => write!(
                f,
                "next tick ${} exceeds max price ${}",
                candidate, max_price
            ),
        }
    }
}

/// Outcome of the bid calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidDecision {
    /// Place a bid at this price.
    Place {
        /// The bid price, exactly one tick above the best bid.
        price: Decimal,
    },
    /// Deliberately place nothing.
    Skip(SkipReason),
}

impl BidDecision {
    /// The price to place, if any.
    pub fn price(&self) -> Option<Decimal> {
        match self {
            BidDecision::Place { price } => Some(*price),
            BidDecision::Skip(_) => None,
        }
    }
}

/// Compute the next bid, one tick above the current best bid.
///
/// `best_bid` is zero when the book has no bids. Returns `Skip` when the
/// market is already at the ceiling or the next tick would exceed it;
/// otherwise the bid is exactly `best_bid + tick_size`.
pub fn calculate_new_bid(best_bid: Decimal, tick_size: Decimal, max_price: Decimal) -> BidDecision {
    let candidate = best_bid + tick_size;

    if best_bid >= max_price {
        return BidDecision::Skip(SkipReason::BestBidAtCeiling {
            best_bid,
            max_price,
        });
    }

    if candidate > max_price {
        return BidDecision::Skip(SkipReason::NextTickAboveCeiling {
            candidate,
            max_price,
        });
    }

    BidDecision::Place { price: candidate }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn places_one_tick_above_best_bid() {
        let decision = calculate_new_bid(dec!(0.04), dec!(0.01), dec!(0.05));
        assert_eq!(decision, BidDecision::Place { price: dec!(0.05) });
    }

    #[test]
    fn places_first_tick_on_empty_book() {
        // No bids: best bid is zero, so the bid is one tick from the floor
        let decision = calculate_new_bid(Decimal::ZERO, dec!(0.01), dec!(0.05));
        assert_eq!(decision, BidDecision::Place { price: dec!(0.01) });
    }

    #[test]
    fn skips_when_best_bid_at_ceiling() {
        let decision = calculate_new_bid(dec!(0.05), dec!(0.01), dec!(0.05));
        assert_eq!(
            decision,
            BidDecision::Skip(SkipReason::BestBidAtCeiling {
                best_bid: dec!(0.05),
                max_price: dec!(0.05),
            })
        );
    }

    #[test]
    fn skips_when_best_bid_above_ceiling() {
        let decision = calculate_new_bid(dec!(0.07), dec!(0.01), dec!(0.05));
        assert!(matches!(
            decision,
            BidDecision::Skip(SkipReason::BestBidAtCeiling { .. })
        ));
    }

    #[test]
    fn skips_when_next_tick_exceeds_ceiling() {
        // candidate 0.055 > 0.05, even though the best bid is under the ceiling
        let decision = calculate_new_bid(dec!(0.045), dec!(0.01), dec!(0.05));
        assert_eq!(
            decision,
            BidDecision::Skip(SkipReason::NextTickAboveCeiling {
                candidate: dec!(0.055),
                max_price: dec!(0.05),
            })
        );
    }

    #[test]
    fn places_exactly_at_ceiling() {
        // candidate == max_price is allowed
        let decision = calculate_new_bid(dec!(0.04), dec!(0.01), dec!(0.05));
        assert_eq!(decision.price(), Some(dec!(0.05)));
    }

    #[test]
    fn handles_fine_tick_near_price_extremes() {
        let decision = calculate_new_bid(dec!(0.004), dec!(0.001), dec!(0.05));
        assert_eq!(decision, BidDecision::Place { price: dec!(0.005) });
    }

    #[test]
    fn never_places_above_ceiling() {
        let ticks = [dec!(0.001), dec!(0.01)];
        let max_price = dec!(0.05);

        for tick in ticks {
            let mut best_bid = Decimal::ZERO;
            while best_bid <= dec!(0.10) {
                if let BidDecision::Place { price } =
                    calculate_new_bid(best_bid, tick, max_price)
                {
                    assert!(price <= max_price, "placed {} above ceiling", price);
                    assert_eq!(price, best_bid + tick);
                }
                best_bid += dec!(0.005);
            }
        }
    }
}
