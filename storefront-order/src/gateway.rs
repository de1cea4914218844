use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use storefront_core::app_config::EndpointConfig;
use storefront_core::{GatewayError, GatewayReply, OrderGateway};
use storefront_shared::OrderRequest;
use tokio::sync::Mutex;
use tracing::debug;

/// Posts orders as JSON to a fixed endpoint.
pub struct HttpOrderGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpOrderGateway {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &EndpointConfig) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self::new(client, config.url.clone()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn submit(&self, order: &OrderRequest) -> Result<GatewayReply, GatewayError> {
        let body = serde_json::to_vec(order)?;

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        debug!(status, bytes = body.len(), endpoint = %self.endpoint, "Order endpoint replied");
        Ok(GatewayReply::new(status, body.to_vec()))
    }
}

/// Scripted behaviour for [`MockOrderGateway`].
#[derive(Debug, Clone)]
pub enum MockReply {
    Accept(String),
    Reject { status: u16, body: String },
    Fail(String),
}

/// In-process gateway: replays scripted replies, then accepts everything
/// with generated `MOCK-n` ids.
pub struct MockOrderGateway {
    script: Mutex<VecDeque<MockReply>>,
    received: Mutex<Vec<OrderRequest>>,
    sequence: AtomicU64,
}

impl MockOrderGateway {
    pub fn new() -> Self {
        Self::with_replies(Vec::new())
    }

    pub fn with_replies(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            script: Mutex::new(replies.into_iter().collect()),
            received: Mutex::new(Vec::new()),
            sequence: AtomicU64::new(0),
        }
    }

    /// Orders seen so far, in arrival order.
    pub async fn received(&self) -> Vec<OrderRequest> {
        self.received.lock().await.clone()
    }

    pub async fn calls(&self) -> usize {
        self.received.lock().await.len()
    }
}

impl Default for MockOrderGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderGateway for MockOrderGateway {
    async fn submit(&self, order: &OrderRequest) -> Result<GatewayReply, GatewayError> {
        self.received.lock().await.push(order.clone());

        let next = self.script.lock().await.pop_front();
        let reply = next.unwrap_or_else(|| {
            let n = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
            MockReply::Accept(format!("MOCK-{}", n))
        });

        match reply {
            MockReply::Accept(order_id) => Ok(GatewayReply::new(
                201,
                serde_json::json!({ "orderId": order_id }).to_string(),
            )),
            MockReply::Reject { status, body } => Ok(GatewayReply::new(status, body)),
            MockReply::Fail(message) => Err(GatewayError::Transport(message)),
        }
    }
}
