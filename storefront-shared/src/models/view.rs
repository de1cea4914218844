use serde::Serialize;
use std::fmt;

/// A rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub name: String,
    pub price: String,
}

/// Display structure produced from the cart contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CartView {
    Empty { placeholder: String },
    Items { lines: Vec<CartLine>, total: String },
}

impl CartView {
    pub fn lines(&self) -> &[CartLine] {
        match self {
            Self::Empty { .. } => &[],
            Self::Items { lines, .. } => lines.as_slice(),
        }
    }

    /// Formatted total, absent for an empty cart.
    pub fn total(&self) -> Option<&str> {
        match self {
            Self::Empty { .. } => None,
            Self::Items { total, .. } => Some(total),
        }
    }

    /// Footer text shown under the items.
    pub fn footer(&self) -> Option<String> {
        self.total().map(|total| format!("Total: {}", total))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

impl fmt::Display for CartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { placeholder } => write!(f, "{}", placeholder),
            Self::Items { lines, total } => {
                for line in lines {
                    writeln!(f, "{:<30} {:>10}", line.name, line.price)?;
                }
                write!(f, "Total: {}", total)
            }
        }
    }
}
