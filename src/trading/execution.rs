//! Order submission against the Polymarket CLOB API.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::order::{OrderParams, Side, TimeInForce};
use crate::error::TradingError;
use crate::market::PolymarketClient;
use crate::signing;

/// Order submission request body.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    /// Token ID to trade.
    pub token_id: String,
    /// Order side (BUY/SELL).
    pub side: String,
    /// Limit price.
    pub price: String,
    /// Order size.
    pub size: String,
    /// Fee rate basis points.
    pub fee_rate_bps: String,
    /// Nonce for order uniqueness.
    pub nonce: String,
    /// Expiration timestamp.
    pub expiration: String,
    /// Taker address.
    pub taker: String,
    /// Maker address.
    pub maker: String,
    /// Signature type.
    pub signature_type: u8,
    /// Order signature.
    pub signature: String,
    /// Time in force.
    pub order_type: String,
    /// Neg risk flag.
    pub neg_risk: bool,
}

/// Order submission result.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResult {
    /// Order ID (various field names).
    #[serde(alias = "orderID", alias = "orderId", alias = "order_id", alias = "id")]
    pub order_id: Option<String>,
    /// Error message if any.
    pub error: Option<String>,
    /// Error code if any.
    pub error_code: Option<String>,
    /// Success flag.
    pub success: Option<bool>,
}

/// Sign and submit a single order using the Polymarket CLOB API.
#[instrument(skip(client, params), fields(token = %params.token_id, side = ?params.side))]
pub async fn submit_order(
    client: &PolymarketClient,
    params: &OrderParams,
) -> Result<String, TradingError> {
    // Validate parameters
    params.validate().map_err(TradingError::InvalidParams)?;

    debug!(
        price = %params.price,
        size = %params.size,
        tif = ?params.tif,
        "Submitting order"
    );

    // Get wallet address
    let address = client.get_address()?;

    // Generate auth headers
    let auth_headers =
        signing::generate_auth_headers(client.private_key(), client.signature_type()).await?;

    // Generate nonce and expiration
    let nonce = chrono::Utc::now().timestamp_millis().to_string();
    let expiration = (chrono::Utc::now().timestamp() + 3600).to_string(); // 1 hour from now

    let side_str = match params.side {
        Side::Buy => "BUY",
        Side::Sell => "SELL",
    };

    let order_type = match params.tif {
        TimeInForce::GTC => "GTC",
        TimeInForce::FOK => "FOK",
        TimeInForce::FAK => "GTC", // FAK maps to GTC
    };

    // Create order message to sign
    // Format: token_id + side + price + size + nonce + expiration
    let order_message = format!(
        "{}:{}:{}:{}:{}:{}",
        params.token_id, side_str, params.price, params.size, nonce, expiration
    );

    // Sign the order
    let signature_bytes =
        signing::sign_message(client.private_key(), order_message.as_bytes()).await?;
    let signature = format!("0x{}", hex::encode(&signature_bytes));

    // Build order request
    let order_request = OrderRequest {
        token_id: params.token_id.clone(),
        side: side_str.to_string(),
        price: params.price.to_string(),
        size: params.size.to_string(),
        fee_rate_bps: "0".to_string(),
        nonce,
        expiration,
        taker: "0x0000000000000000000000000000000000000000".to_string(),
        maker: address,
        signature_type: client.signature_type(),
        signature,
        order_type: order_type.to_string(),
        neg_risk: client.neg_risk(),
    };

    // Submit order via API
    let url = format!("{}/order", client.clob_url());

    let mut request = client.http().post(&url).json(&order_request);
    for (key, value) in auth_headers {
        request = request.header(&key, &value);
    }

    let response = request
        .send()
        .await
        .map_err(|e| TradingError::SubmissionFailed(format!("HTTP request failed: {}", e)))?;

    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        let body = response.text().await.unwrap_or_default();
        return Err(TradingError::AuthenticationFailed(format!(
            "HTTP {} - {}",
            status, body
        )));
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TradingError::SubmissionFailed(format!(
            "Order submission failed: HTTP {} - {}",
            status, body
        )));
    }

    let result: SubmitResult = response
        .json()
        .await
        .map_err(|e| TradingError::SubmissionFailed(format!("Failed to parse response: {}", e)))?;

    // The API reports rejections inside a 200 body
    if let Some(error) = result.error {
        return Err(TradingError::OrderRejected { reason: error });
    }

    let order_id = result
        .order_id
        .ok_or_else(|| TradingError::SubmissionFailed("No order ID in response".to_string()))?;

    info!(
        order_id = %order_id,
        token_id = %params.token_id,
        side = ?params.side,
        price = %params.price,
        size = %params.size,
        "Order submitted successfully"
    );

    Ok(order_id)
}

/// Extract order ID from API response.
pub fn extract_order_id(result: &serde_json::Value) -> Option<String> {
    // Try various field names
    for key in ["orderID", "orderId", "order_id", "id"] {
        if let Some(id) = result.get(key).and_then(|v| v.as_str()) {
            return Some(id.to_string());
        }
    }

    // Try nested fields
    for key in ["order", "data", "result"] {
        if let Some(nested) = result.get(key) {
            if let Some(id) = extract_order_id(nested) {
                return Some(id);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_order_id_various_formats() {
        let json1 = serde_json::json!({"orderID": "abc123"});
        assert_eq!(extract_order_id(&json1), Some("abc123".to_string()));

        let json2 = serde_json::json!({"orderId": "def456"});
        assert_eq!(extract_order_id(&json2), Some("def456".to_string()));

        let json3 = serde_json::json!({"order": {"id": "ghi789"}});
        assert_eq!(extract_order_id(&json3), Some("ghi789".to_string()));

        let json4 = serde_json::json!({"error": "something"});
        assert_eq!(extract_order_id(&json4), None);
    }

    #[test]
    fn submit_result_aliases_parse() {
        let parsed: SubmitResult =
            serde_json::from_str(r#"{"orderID": "0xabc", "success": true}"#).unwrap();
        assert_eq!(parsed.order_id, Some("0xabc".to_string()));
        assert_eq!(parsed.success, Some(true));

        let rejected: SubmitResult =
            serde_json::from_str(r#"{"error": "not enough balance"}"#).unwrap();
        assert_eq!(rejected.order_id, None);
        assert_eq!(rejected.error, Some("not enough balance".to_string()));
    }
}
