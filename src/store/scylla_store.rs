use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scylla::client::session::Session;
use scylla::client::session_builder::SessionBuilder;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::domain::order::{Customer, LineItem, NewOrder, Order};

use super::{OrderStore, StoreError};

// ============================================================================
// ScyllaDB Order Store
// ============================================================================
//
// Orders are kept as documents in a single `orders` collection partition,
// clustered by (created_at, id). A full partition read returns them in
// insertion order. `items` and `customer` are stored as JSON text.
//
// This is a single-partition design: every order lands in the same partition,
// which grows without bound. It fits an unpaginated "list everything" API.
// Bucketing the partition key by day would be needed for large volumes.
//
// ============================================================================

const COLLECTION: &str = "orders";

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS orders (
        collection text,
        created_at timestamp,
        id uuid,
        items text,
        customer text,
        total double,
        updated_at timestamp,
        PRIMARY KEY (collection, created_at, id)
    ) WITH CLUSTERING ORDER BY (created_at ASC, id ASC)";

const INSERT_ORDER: &str = "INSERT INTO orders (
        collection, created_at, id, items, customer, total, updated_at
    ) VALUES (?, ?, ?, ?, ?, ?, ?)";

const SELECT_ORDERS: &str = "SELECT id, items, customer, total, created_at, updated_at
    FROM orders
    WHERE collection = ?";

const PING: &str = "SELECT now() FROM system.local";

type OrderRow = (Uuid, String, String, f64, DateTime<Utc>, DateTime<Utc>);

fn create_keyspace_statement(keyspace: &str, replication_factor: u32) -> String {
    format!(
        "CREATE KEYSPACE IF NOT EXISTS {keyspace} WITH REPLICATION = \
         {{'class': 'SimpleStrategy', 'replication_factor': {replication_factor}}}"
    )
}

fn encode_order(order: &Order) -> Result<(String, String), StoreError> {
    let items = serde_json::to_string(&order.items).map_err(|e| StoreError::Encode(e.to_string()))?;
    let customer =
        serde_json::to_string(&order.customer).map_err(|e| StoreError::Encode(e.to_string()))?;
    Ok((items, customer))
}

fn decode_row(row: OrderRow) -> Result<Order, StoreError> {
    let (id, items_json, customer_json, total, created_at, updated_at) = row;

    let items: Vec<LineItem> = serde_json::from_str(&items_json)
        .map_err(|e| StoreError::Decode(format!("order {id} items: {e}")))?;
    let customer: Customer = serde_json::from_str(&customer_json)
        .map_err(|e| StoreError::Decode(format!("order {id} customer: {e}")))?;

    Ok(Order {
        id,
        items,
        customer,
        total,
        created_at,
        updated_at,
    })
}

pub struct ScyllaOrderStore {
    session: Session,
}

impl ScyllaOrderStore {
    /// Connect, then make sure the keyspace and table exist.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        tracing::info!(nodes = ?config.known_nodes, "Connecting to ScyllaDB...");

        let session: Session = SessionBuilder::new()
            .known_nodes(&config.known_nodes)
            .build()
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;

        session
            .query_unpaged(
                create_keyspace_statement(&config.keyspace, config.replication_factor),
                (),
            )
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;

        session
            .use_keyspace(&config.keyspace, false)
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;

        session
            .query_unpaged(CREATE_TABLE, ())
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;

        tracing::info!(keyspace = %config.keyspace, "✅ Order store ready");

        Ok(Self { session })
    }

    fn runtime_error(operation: &str, err: impl std::fmt::Display) -> StoreError {
        tracing::error!(operation = operation, error = %err, "ScyllaDB runtime error");
        StoreError::Query(err.to_string())
    }
}

#[async_trait]
impl OrderStore for ScyllaOrderStore {
    async fn insert(&self, new: NewOrder) -> Result<Order, StoreError> {
        let order = Order::assign(new, Utc::now());
        let (items, customer) = encode_order(&order)?;

        self.session
            .query_unpaged(
                INSERT_ORDER,
                (
                    COLLECTION.to_string(),
                    order.created_at,
                    order.id,
                    items,
                    customer,
                    order.total,
                    order.updated_at,
                ),
            )
            .await
            .map_err(|e| Self::runtime_error("insert", e))?;

        tracing::debug!(order_id = %order.id, "Inserted order row");
        Ok(order)
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let result = self
            .session
            .query_unpaged(SELECT_ORDERS, (COLLECTION.to_string(),))
            .await
            .map_err(|e| Self::runtime_error("list", e))?;

        let rows_result = result
            .into_rows_result()
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        let mut orders = Vec::new();
        for row in rows_result
            .rows::<OrderRow>()
            .map_err(|e| StoreError::Decode(e.to_string()))?
        {
            let row = row.map_err(|e| StoreError::Decode(e.to_string()))?;
            orders.push(decode_row(row)?);
        }

        tracing::debug!(count = orders.len(), "Loaded orders");
        Ok(orders)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.session
            .query_unpaged(PING, ())
            .await
            .map_err(|e| Self::runtime_error("ping", e))?;
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
//
// Queries against a live cluster are not covered here; these tests pin the
// statements, the row <-> document mapping and the refused-connection path
// that stops startup.
//
// ============================================================================
