pub mod models;
pub mod pii;

pub use models::order::{LineItem, OrderRequest, OrderResult, ReplyError};
pub use models::view::{CartLine, CartView};
pub use pii::Masked;
