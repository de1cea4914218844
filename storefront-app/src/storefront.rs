use std::sync::Arc;

use rust_decimal::Decimal;
use storefront_cart::{render, CartError, CartStore};
use storefront_core::app_config::{Config, GatewayMode};
use storefront_core::{DisplaySurface, GatewayError, OrderGateway};
use storefront_order::{
    HttpOrderGateway, MockOrderGateway, Notifier, OrderError, OrderSubmitter, SubmitterState,
};
use storefront_shared::CartView;
use tokio::sync::RwLock;
use tracing::info;

/// The cart widget: one cart, one surface, one submitter.
pub struct Storefront {
    cart: Arc<RwLock<CartStore>>,
    surface: Arc<dyn DisplaySurface>,
    notifier: Notifier,
    submitter: OrderSubmitter,
}

impl Storefront {
    pub fn new(
        config: &Config,
        surface: Arc<dyn DisplaySurface>,
        gateway: Arc<dyn OrderGateway>,
    ) -> Self {
        let notifier = Notifier::from_config(surface.clone(), &config.notifier);
        let submitter = OrderSubmitter::new(gateway, surface.clone(), notifier.clone());

        Self {
            cart: Arc::new(RwLock::new(CartStore::new())),
            surface,
            notifier,
            submitter,
        }
    }

    /// Build with the gateway selected by `gateway.mode`.
    pub fn from_config(
        config: &Config,
        surface: Arc<dyn DisplaySurface>,
    ) -> Result<Self, GatewayError> {
        let gateway: Arc<dyn OrderGateway> = match config.gateway.mode {
            GatewayMode::Http => Arc::new(HttpOrderGateway::from_config(&config.endpoint)?),
            GatewayMode::Mock => Arc::new(MockOrderGateway::new()),
        };
        info!(mode = ?config.gateway.mode, endpoint = %config.endpoint.url, "Order gateway ready");

        Ok(Self::new(config, surface, gateway))
    }

    /// Redraw the cart region from the current contents.
    pub async fn refresh(&self) -> CartView {
        let cart = self.cart.read().await;
        render::render_to(&cart, self.surface.as_ref())
    }

    pub async fn add_to_cart(&self, name: &str, price: Decimal) -> Result<(), CartError> {
        let mut cart = self.cart.write().await;

        if let Err(e) = cart.add_item(name, price) {
            self.notifier.error(format!("❌ {}", e));
            return Err(e);
        }
        info!(item = name, price = %price, items = cart.len(), "Item added to cart");

        render::render_to(&cart, self.surface.as_ref());
        self.notifier.success(format!("✅ {} added to cart!", name));
        Ok(())
    }

    /// Submit the cart using whatever is in the surface's name field.
    pub async fn place_order(&self) -> Result<String, OrderError> {
        let customer_name = self.surface.customer_name();
        self.submitter.place_order(&customer_name, &self.cart).await
    }

    pub fn cart(&self) -> Arc<RwLock<CartStore>> {
        self.cart.clone()
    }

    pub fn state(&self) -> SubmitterState {
        self.submitter.state()
    }
}
