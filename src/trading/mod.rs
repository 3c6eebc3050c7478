//! Trading module for order types and submission.

pub mod execution;
pub mod order;

pub use execution::{submit_order, SubmitResult};
pub use order::{OrderParams, Side, TimeInForce};
