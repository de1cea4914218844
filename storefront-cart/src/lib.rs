pub mod cart;
pub mod render;

pub use cart::{CartError, CartStore};
pub use render::{format_amount, render, render_to, EMPTY_CART_PLACEHOLDER};
