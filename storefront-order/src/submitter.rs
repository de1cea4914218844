use std::sync::Arc;

use storefront_cart::{render, CartStore};
use storefront_core::{DisplaySurface, OrderGateway};
use storefront_shared::{Masked, OrderRequest, OrderResult};
use tokio::sync::{RwLock, Semaphore, SemaphorePermit};
use tracing::{debug, error, info, warn};

use crate::notifier::Notifier;

pub const PLACE_ORDER_LABEL: &str = "Place Order";
pub const PROCESSING_LABEL: &str = "⏳ Processing...";
pub const FALLBACK_ERROR: &str = "Failed to place order";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitterState {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter your name")]
    MissingName,

    #[error("Your cart is empty")]
    EmptyCart,
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The exchange did not complete, or the reply was not usable JSON.
    #[error("{0}")]
    Transport(String),

    /// The endpoint answered with a non-success status.
    #[error("{}", .message.as_deref().unwrap_or(FALLBACK_ERROR))]
    Application { status: u16, message: Option<String> },

    #[error("An order is already being submitted")]
    Busy,
}

impl OrderError {
    /// Text shown in the status area.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) | Self::Application { .. } => format!("❌ Error: {}", self),
            Self::Validation(_) | Self::Busy => format!("❌ {}", self),
        }
    }
}

/// Drives one order attempt from validation through the network exchange.
///
/// A single-permit semaphore backs the Idle/Submitting state, so a second
/// attempt while one is in flight fails with [`OrderError::Busy`] even if the
/// host ignores the disabled trigger.
pub struct OrderSubmitter {
    gateway: Arc<dyn OrderGateway>,
    surface: Arc<dyn DisplaySurface>,
    notifier: Notifier,
    in_flight: Semaphore,
}

/// Held for the duration of the exchange; dropping it is the only way back
/// to Idle.
struct Submitting<'a> {
    surface: &'a dyn DisplaySurface,
    _permit: SemaphorePermit<'a>,
}

impl Drop for Submitting<'_> {
    fn drop(&mut self) {
        self.surface.set_submit_enabled(true, PLACE_ORDER_LABEL);
        debug!("Order submitter idle");
    }
}

impl OrderSubmitter {
    pub fn new(
        gateway: Arc<dyn OrderGateway>,
        surface: Arc<dyn DisplaySurface>,
        notifier: Notifier,
    ) -> Self {
        Self {
            gateway,
            surface,
            notifier,
            in_flight: Semaphore::new(1),
        }
    }

    pub fn state(&self) -> SubmitterState {
        if self.in_flight.available_permits() == 0 {
            SubmitterState::Submitting
        } else {
            SubmitterState::Idle
        }
    }

    /// Place an order for everything currently in `cart`.
    ///
    /// On success the cart and the name field are cleared and the new order
    /// id is returned. Every failure is also reported through the notifier
    /// and leaves the cart untouched.
    pub async fn place_order(
        &self,
        customer_name_input: &str,
        cart: &RwLock<CartStore>,
    ) -> Result<String, OrderError> {
        let result = self.try_place_order(customer_name_input, cart).await;
        if let Err(e) = &result {
            self.notifier.error(e.user_message());
        }
        result
    }

    async fn try_place_order(
        &self,
        customer_name_input: &str,
        cart: &RwLock<CartStore>,
    ) -> Result<String, OrderError> {
        let customer_name = customer_name_input.trim();
        if customer_name.is_empty() {
            warn!("Order rejected: missing customer name");
            return Err(ValidationError::MissingName.into());
        }

        let request = {
            let cart = cart.read().await;
            if cart.is_empty() {
                warn!("Order rejected: cart is empty");
                return Err(ValidationError::EmptyCart.into());
            }
            OrderRequest::new(customer_name, cart.snapshot())
        };

        let _submitting = self.begin_submitting()?;
        info!(
            customer = %Masked::new(customer_name),
            items = request.items.len(),
            total = %request.total_amount,
            "Submitting order"
        );

        let reply = self.gateway.submit(&request).await.map_err(|e| {
            error!(error = %e, "Error placing order");
            OrderError::Transport(e.to_string())
        })?;

        let result = OrderResult::from_reply(reply.is_success(), &reply.body).map_err(|e| {
            error!(error = %e, status = reply.status, "Unusable order response");
            OrderError::Transport(e.to_string())
        })?;

        match result {
            OrderResult::Accepted { order_id } => {
                info!(order_id = %order_id, "Order placed");
                self.notifier
                    .success(format!("🎉 Order placed successfully! Order ID: {}", order_id));

                let mut cart = cart.write().await;
                cart.clear();
                render::render_to(&cart, self.surface.as_ref());
                self.surface.clear_customer_name();
                Ok(order_id)
            }
            OrderResult::Rejected { error } => {
                warn!(status = reply.status, error = ?error, "Order rejected by endpoint");
                Err(OrderError::Application {
                    status: reply.status,
                    message: error,
                })
            }
        }
    }

    fn begin_submitting(&self) -> Result<Submitting<'_>, OrderError> {
        let permit = self.in_flight.try_acquire().map_err(|_| {
            warn!("Order rejected: submission already in progress");
            OrderError::Busy
        })?;

        self.surface.set_submit_enabled(false, PROCESSING_LABEL);
        debug!("Order submitter submitting");
        Ok(Submitting {
            surface: self.surface.as_ref(),
            _permit: permit,
        })
    }
}
