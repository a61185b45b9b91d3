use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::order::{NewOrder, Order};

use super::{OrderStore, StoreError};

/// Order store kept in process memory, for tests.
#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<Vec<Order>>,
    writes: AtomicUsize,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, new: NewOrder) -> Result<Order, StoreError> {
        let order = Order::assign(new, Utc::now());
        self.orders.write().await.push(order.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(order)
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.orders.read().await.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// A store whose every operation fails as if the cluster were unreachable.
pub struct UnreachableOrderStore;

const UNREACHABLE: &str = "all known nodes are unreachable";

#[async_trait]
impl OrderStore for UnreachableOrderStore {
    async fn insert(&self, _new: NewOrder) -> Result<Order, StoreError> {
        Err(StoreError::Query(UNREACHABLE.to_string()))
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        Err(StoreError::Query(UNREACHABLE.to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Query(UNREACHABLE.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{Customer, LineItem};

    fn new_order(sku: &str) -> NewOrder {
        NewOrder {
            items: vec![LineItem::new(sku, 1)],
            customer: Customer::new("Jo"),
            total: 5.0,
        }
    }

    #[tokio::test]
    async fn test_insert_then_list_preserves_order() {
        let store = InMemoryOrderStore::new();
        let a = store.insert(new_order("A")).await.unwrap();
        let b = store.insert(new_order("B")).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![a, b]);
        assert_eq!(store.writes(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_everything() {
        let store = UnreachableOrderStore;
        assert!(store.insert(new_order("A")).await.is_err());
        assert!(store.list().await.is_err());
        assert!(store.ping().await.is_err());
    }
}
