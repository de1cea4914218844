use rust_decimal::Decimal;
use storefront_shared::LineItem;

/// Ordered list of items awaiting an order. Insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Vec<LineItem>,
}

impl CartStore {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an item. Items are never edited or removed individually.
    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        price: Decimal,
    ) -> Result<&LineItem, CartError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(CartError::InvalidItem {
                reason: "item name is empty".to_string(),
            });
        }
        if price < Decimal::ZERO {
            return Err(CartError::InvalidItem {
                reason: format!("price {} is negative", price),
            });
        }
        if self.total().checked_add(price).is_none() {
            return Err(CartError::InvalidItem {
                reason: "cart total would overflow".to_string(),
            });
        }

        self.items.push(LineItem::new(name, price));
        Ok(&self.items[self.items.len() - 1])
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of item prices, recomputed on every call. `add_item` refuses any
    /// item that would push this past `Decimal::MAX`.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.price).sum()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Owned copy of the items for an order request.
    pub fn snapshot(&self) -> Vec<LineItem> {
        self.items.clone()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("Invalid item: {reason}")]
    InvalidItem { reason: String },
}
