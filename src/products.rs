//! Products

use std::fmt;

use slotmap::new_key_type;

use crate::prices::Price;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Single-character stock keeping unit identifying a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sku(char);

impl Sku {
    /// Create a SKU from its character code.
    pub const fn new(code: char) -> Self {
        Sku(code)
    }

    /// Return the character code.
    pub const fn code(self) -> char {
        self.0
    }

    /// Parse a SKU from text containing exactly one character.
    pub fn parse(text: &str) -> Option<Self> {
        let mut chars = text.chars();

        match (chars.next(), chars.next()) {
            (Some(code), None) => Some(Sku(code)),
            _ => None,
        }
    }
}

impl From<char> for Sku {
    fn from(code: char) -> Self {
        Sku(code)
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Product SKU
    pub sku: Sku,

    /// Product name
    pub name: String,

    /// Standard unit price
    pub price: Price,
}
