use async_trait::async_trait;
use storefront_shared::OrderRequest;

/// Raw answer from the order endpoint, before interpretation.
#[derive(Debug, Clone)]
pub struct GatewayReply {
    pub status: u16,
    pub body: Vec<u8>,
}

impl GatewayReply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Transport-level verdict: any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The exchange did not complete (connect, DNS, reset, body read).
    #[error("{0}")]
    Transport(String),

    #[error("Failed to encode order: {0}")]
    Encode(#[from] serde_json::Error),
}

#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Send one order. Exactly one exchange, no retries.
    async fn submit(&self, order: &OrderRequest) -> Result<GatewayReply, GatewayError>;
}
