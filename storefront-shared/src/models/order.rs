use crate::pii::Masked;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One cart entry as it travels on the wire.
///
/// Prices go out as JSON numbers (`f64`), so only about 15 significant digits
/// survive the trip. Amounts beyond that are rounded by the encoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl LineItem {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Payload POSTed to the order endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub customer_name: Masked<String>,
    pub items: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

impl OrderRequest {
    /// Build a request from an item snapshot; the total is derived here so it
    /// always matches the items sent. Saturates at `Decimal::MAX`.
    pub fn new(customer_name: impl Into<String>, items: Vec<LineItem>) -> Self {
        let total_amount = items
            .iter()
            .fold(Decimal::ZERO, |total, item| total.saturating_add(item.price));
        Self {
            customer_name: Masked::new(customer_name.into()),
            items,
            total_amount,
        }
    }
}

/// Outcome reported by the order endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderResult {
    Accepted { order_id: String },
    Rejected { error: Option<String> },
}

#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Order response is missing an orderId")]
    MissingOrderId,
}

impl OrderResult {
    /// Interpret a response body. `success` is the transport-level verdict
    /// (2xx status); the body must be JSON either way.
    pub fn from_reply(success: bool, body: &[u8]) -> Result<Self, ReplyError> {
        let value: serde_json::Value = serde_json::from_slice(body)?;

        if success {
            let order_id = match value.get("orderId") {
                Some(serde_json::Value::String(id)) if !id.is_empty() => id.clone(),
                Some(serde_json::Value::Number(id)) => id.to_string(),
                _ => return Err(ReplyError::MissingOrderId),
            };
            return Ok(Self::Accepted { order_id });
        }

        let error = value
            .get("error")
            .and_then(|e| e.as_str())
            .filter(|e| !e.is_empty())
            .map(str::to_string);
        Ok(Self::Rejected { error })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    pub fn order_id(&self) -> Option<&str> {
        match self {
            Self::Accepted { order_id } => Some(order_id),
            Self::Rejected { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Accepted { .. } => None,
            Self::Rejected { error } => error.as_deref(),
        }
    }
}
