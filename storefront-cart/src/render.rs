use crate::cart::CartStore;
use rust_decimal::{Decimal, RoundingStrategy};
use storefront_core::DisplaySurface;
use storefront_shared::{CartLine, CartView};

pub const EMPTY_CART_PLACEHOLDER: &str = "Your cart is empty";

/// `$` amount with exactly two decimal places.
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("${}", rounded)
}

/// Build the display structure for the current cart contents.
pub fn render(cart: &CartStore) -> CartView {
    if cart.is_empty() {
        return CartView::Empty {
            placeholder: EMPTY_CART_PLACEHOLDER.to_string(),
        };
    }

    let lines = cart
        .items()
        .iter()
        .map(|item| CartLine {
            name: item.name.clone(),
            price: format_amount(item.price),
        })
        .collect();

    CartView::Items {
        lines,
        total: format_amount(cart.total()),
    }
}

/// Render and push the result to the surface.
pub fn render_to(cart: &CartStore, surface: &dyn DisplaySurface) -> CartView {
    let view = render(cart);
    surface.show_cart(&view);
    tracing::debug!(items = cart.len(), "Cart rendered");
    view
}
