use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Order Value Objects
// ============================================================================
//
// Attributes beyond the named fields are kept in `extra` so that a stored
// order echoes back exactly what the client submitted.
//
// ============================================================================

/// One line of an order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LineItem {
    pub sku: String,
    pub qty: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
impl LineItem {
    pub fn new(sku: impl Into<String>, qty: u32) -> Self {
        Self {
            sku: sku.into(),
            qty,
            extra: Map::new(),
        }
    }
}

/// The purchaser of an order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Customer {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
impl Customer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            extra: Map::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
