//! Token allowance guidance for Polymarket trading.
//!
//! The CLOB cannot fill orders unless the wallet has approved the exchange
//! contracts for USDC and conditional tokens. Nothing here touches the
//! chain; the addresses are surfaced so the operator can verify approvals
//! on PolygonScan.

/// USDC token contract on Polygon.
pub const USDC_ADDRESS: &str = "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174";

/// Conditional tokens contract on Polygon.
pub const CONDITIONAL_TOKENS_ADDRESS: &str = "0x4D97DCd97eC945f40cF65F87097ACe5EA0476045";

/// Exchange contracts that need approval.
pub const EXCHANGE_CONTRACTS: &[(&str, &str)] = &[
    ("Main Exchange", "0x4bFb41d5B3570DeFd03C39a9A4D8dE6Bd8B8982E"),
    ("Neg Risk Exchange", "0xC5d563A36AE78145C45a50134d48A1215220f80a"),
    ("Neg Risk Adapter", "0xd91E80cF2E7be2e162c6513ceD06f1dD0dA35296"),
];

/// Contract addresses a trading wallet must approve.
#[derive(Debug, Clone)]
pub struct AllowanceTargets {
    /// USDC token contract.
    pub usdc: &'static str,
    /// Conditional tokens contract.
    pub conditional_tokens: &'static str,
    /// Exchange contracts by name.
    pub exchanges: &'static [(&'static str, &'static str)],
}

/// The set of contracts to approve for trading.
pub fn allowance_targets() -> AllowanceTargets {
    AllowanceTargets {
        usdc: USDC_ADDRESS,
        conditional_tokens: CONDITIONAL_TOKENS_ADDRESS,
        exchanges: EXCHANGE_CONTRACTS,
    }
}

/// PolygonScan URL for checking USDC allowances.
pub fn polygonscan_url() -> String {
    format!("https://polygonscan.com/token/{}#readContract", USDC_ADDRESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_cover_all_exchange_contracts() {
        let targets = allowance_targets();
        assert_eq!(targets.exchanges.len(), 3);
        assert!(targets.usdc.starts_with("0x"));
        assert!(targets.conditional_tokens.starts_with("0x"));
    }

    #[test]
    fn polygonscan_url_points_at_usdc() {
        assert!(polygonscan_url().contains(USDC_ADDRESS));
    }
}
