// ============================================================================
// Order Store - Persistence Collaborator
// ============================================================================
//
// The store owns durability and assigns ids and timestamps. Handlers only see
// the `OrderStore` trait; `main` picks the ScyllaDB implementation and tests
// use the in-memory one.
//
// ============================================================================

mod scylla_store;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::domain::order::{NewOrder, Order};

pub use scylla_store::ScyllaOrderStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to connect to order store: {0}")]
    Connect(String),

    #[error("order store query failed: {0}")]
    Query(String),

    #[error("failed to encode order: {0}")]
    Encode(String),

    #[error("failed to decode stored order: {0}")]
    Decode(String),
}

#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    /// Persist a validated order. Exactly one write per call.
    async fn insert(&self, order: NewOrder) -> Result<Order, StoreError>;

    /// Every stored order in insertion order.
    async fn list(&self) -> Result<Vec<Order>, StoreError>;

    /// Cheap round trip used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
