//! Single-shot bid run: fetch, decide, optionally submit.

use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use super::calculator::{calculate_new_bid, BidDecision, SkipReason};
use crate::error::{BotError, Result};
use crate::market::MarketVenue;
use crate::trading::{OrderParams, TimeInForce};

/// Immutable inputs for one bid run.
#[derive(Debug, Clone)]
pub struct BidRequest {
    /// Token ID of the market outcome to bid on.
    pub token_id: String,
    /// Maximum acceptable bid price.
    pub max_price: Decimal,
    /// Number of shares to order.
    pub size: Decimal,
    /// Log the intended order without submitting.
    pub dry_run: bool,
}

impl BidRequest {
    /// Validate the request before any network call.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.token_id.is_empty() {
            return Err("token id is required".to_string());
        }
        if self.max_price <= Decimal::ZERO {
            return Err("max price must be positive".to_string());
        }
        if self.size <= Decimal::ZERO {
            return Err("order size must be positive".to_string());
        }
        Ok(())
    }
}

/// What a single run did.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// A real order was submitted.
    Placed {
        /// Order ID returned by the venue.
        order_id: String,
        /// Bid price.
        price: Decimal,
        /// Order size.
        size: Decimal,
    },
    /// Dry-run mode: the order was logged, not submitted.
    DryRun {
        /// Bid price that would have been used.
        price: Decimal,
        /// Order size that would have been used.
        size: Decimal,
    },
    /// The ceiling check decided against bidding. Not a failure.
    Skipped(SkipReason),
}

/// Run the best-bid flow once against a venue.
///
/// Linear flow: validate -> fetch book -> fetch tick size -> pure decision ->
/// optional side effect. Submission happens at most once, and never when the
/// decision is a skip or the request is a dry run.
#[instrument(skip(venue, request), fields(token_id = %request.token_id))]
pub async fn run_best_bid<V: MarketVenue + Sync>(
    venue: &V,
    request: &BidRequest,
) -> Result<RunOutcome> {
    request.validate().map_err(BotError::Validation)?;

    let book = venue.get_order_book(&request.token_id).await?;

    let best_bid = book.best_bid_or_zero();
    if book.has_no_bids() {
        info!("No existing bids on this market");
    } else {
        info!(best_bid = %best_bid, "Current best bid");
    }

    let tick_size = venue.get_tick_size(&request.token_id).await?;
    info!(tick_size = %tick_size, "Tick size");

    match calculate_new_bid(best_bid, tick_size, request.max_price) {
        BidDecision::Skip(reason) => {
            warn!(reason = %reason, "Skipping: no order placed");
            Ok(RunOutcome::Skipped(reason))
        }
        BidDecision::Place { price } => {
            info!(price = %price, "Calculated new bid");

            if request.dry_run {
                info!(
                    token_id = %request.token_id,
                    price = %price,
                    size = %request.size,
                    order_type = %TimeInForce::GTC,
                    "[DRY RUN] Would place GTC limit buy"
                );
                return Ok(RunOutcome::DryRun {
                    price,
                    size: request.size,
                });
            }

            let params = OrderParams::buy(request.token_id.clone(), price, request.size);
            let order_id = venue.submit_order(&params).await?;

            info!(
                order_id = %order_id,
                price = %price,
                size = %request.size,
                "Order placed"
            );

            Ok(RunOutcome::Placed {
                order_id,
                price,
                size: request.size,
            })
        }
    }
}
