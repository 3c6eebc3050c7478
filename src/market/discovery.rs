//! Market lookup against the Gamma API.

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use super::types::{GammaMarket, LowPricedOutcome, TokenInfo};
use crate::error::MarketError;

/// Search for markets on the Gamma API.
///
/// When `query` is non-empty the results are filtered to markets whose
/// question contains it (case-insensitive).
#[instrument(skip(client, gamma_url))]
pub async fn search_markets(
    client: &reqwest::Client,
    gamma_url: &str,
    query: &str,
    limit: usize,
    active_only: bool,
) -> Result<Vec<GammaMarket>, MarketError> {
    let url = format!("{}/markets", gamma_url);

    let mut request = client
        .get(&url)
        .query(&[("limit", limit.to_string())])
        .header("User-Agent", "Mozilla/5.0");

    if active_only {
        request = request.query(&[("active", "true"), ("closed", "false")]);
    }

    let response = request.send().await?;

    if !response.status().is_success() {
        return Err(MarketError::FetchFailed {
            what: "markets".to_string(),
            id: query.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let mut markets: Vec<GammaMarket> = response
        .json()
        .await
        .map_err(|e| MarketError::ParseError(format!("Failed to parse markets: {}", e)))?;

    if !query.is_empty() {
        let query_lower = query.to_lowercase();
        markets.retain(|m| {
            m.question
                .as_ref()
                .map(|q| q.to_lowercase().contains(&query_lower))
                .unwrap_or(false)
        });
    }

    debug!(count = markets.len(), "Fetched markets");

    Ok(markets)
}

/// Fetch one market's details by condition ID.
#[instrument(skip(client, gamma_url))]
pub async fn fetch_market(
    client: &reqwest::Client,
    gamma_url: &str,
    condition_id: &str,
) -> Result<GammaMarket, MarketError> {
    let url = format!("{}/markets/{}", gamma_url, condition_id);

    let response = client
        .get(&url)
        .header("User-Agent", "Mozilla/5.0")
        .send()
        .await?;

    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(MarketError::NotFound {
            condition_id: condition_id.to_string(),
        });
    }

    if !response.status().is_success() {
        return Err(MarketError::FetchFailed {
            what: "market".to_string(),
            id: condition_id.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    response
        .json()
        .await
        .map_err(|e| MarketError::ParseError(format!("Failed to parse market: {}", e)))
}

/// Parse token information out of a Gamma market record.
///
/// The Gamma API returns outcomes, prices, and token IDs as JSON strings
/// inside the JSON body; malformed entries yield an empty list.
pub fn parse_market_tokens(market: &GammaMarket) -> Vec<TokenInfo> {
    let outcomes: Vec<String> = market
        .outcomes
        .as_deref()
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default();
    let prices: Vec<String> = market
        .outcome_prices
        .as_deref()
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default();
    let token_ids: Vec<String> = market
        .clob_token_ids
        .as_deref()
        .and_then(|raw| serde_json::from_str(raw).ok())
        .unwrap_or_default();

    outcomes
        .into_iter()
        .enumerate()
        .map(|(i, outcome)| TokenInfo {
            outcome,
            price: prices.get(i).and_then(|p| p.parse::<Decimal>().ok()),
            token_id: token_ids.get(i).cloned(),
        })
        .collect()
}

/// Find outcomes priced in `(0, max_price]`, sorted by price ascending.
#[instrument(skip(client, gamma_url))]
pub async fn find_low_price_markets(
    client: &reqwest::Client,
    gamma_url: &str,
    max_price: Decimal,
    limit: usize,
) -> Result<Vec<LowPricedOutcome>, MarketError> {
    let markets = search_markets(client, gamma_url, "", limit, true).await?;

    let mut results = Vec::new();

    for market in &markets {
        for token in parse_market_tokens(market) {
            let (Some(price), Some(token_id)) = (token.price, token.token_id) else {
                continue;
            };
            if price > Decimal::ZERO && price <= max_price {
                results.push(LowPricedOutcome {
                    question: market.question.clone().unwrap_or_default(),
                    outcome: token.outcome,
                    token_id,
                    price,
                    condition_id: market.condition_id.clone().unwrap_or_default(),
                });
            }
        }
    }

    results.sort_by(|a, b| a.price.cmp(&b.price));

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn gamma_market(outcomes: &str, prices: &str, tokens: &str) -> GammaMarket {
        GammaMarket {
            question: Some("Will it happen?".to_string()),
            condition_id: Some("0xcond".to_string()),
            slug: Some("will-it-happen".to_string()),
            outcomes: Some(outcomes.to_string()),
            outcome_prices: Some(prices.to_string()),
            clob_token_ids: Some(tokens.to_string()),
            volume: None,
            liquidity: None,
            end_date: None,
            active: Some(true),
            closed: Some(false),
        }
    }

    #[test]
    fn parse_market_tokens_decodes_nested_json() {
        let market = gamma_market(
            r#"["Yes", "No"]"#,
            r#"["0.03", "0.97"]"#,
            r#"["111", "222"]"#,
        );

        let tokens = parse_market_tokens(&market);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].outcome, "Yes");
        assert_eq!(tokens[0].price, Some(dec!(0.03)));
        assert_eq!(tokens[0].token_id, Some("111".to_string()));
        assert_eq!(tokens[1].outcome, "No");
        assert_eq!(tokens[1].price, Some(dec!(0.97)));
    }

    #[test]
    fn parse_market_tokens_handles_missing_fields() {
        let market = gamma_market(r#"["Yes", "No"]"#, r#"["0.03"]"#, r#"["111"]"#);

        let tokens = parse_market_tokens(&market);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].price, None);
        assert_eq!(tokens[1].token_id, None);
    }

    #[test]
    fn parse_market_tokens_tolerates_malformed_json() {
        let market = gamma_market("not json", "[]", "[]");
        assert!(parse_market_tokens(&market).is_empty());
    }
}
