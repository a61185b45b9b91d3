use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

use crate::domain::order::validate_submission;
use crate::metrics::Metrics;
use crate::store::OrderStore;

use super::error::{ApiError, FETCH_ORDERS_FAILED, PLACE_ORDER_FAILED};

const SERVICE_NAME: &str = "order-service";

// ============================================================================
// Order Handlers
// ============================================================================

/// POST /api/orders
pub async fn create_order(
    store: web::Data<dyn OrderStore>,
    metrics: web::Data<Metrics>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    tracing::info!("New order request");
    tracing::debug!(body = %body.0, "Order request body");

    let new_order = validate_submission(&body).map_err(|e| {
        tracing::warn!(error = %e, fields = ?e.fields(), "Order validation failed");
        metrics.record_validation_failure(e.reason());
        e
    })?;

    let order = store.insert(new_order).await.map_err(|e| {
        tracing::error!(error = %e, "Error saving order");
        metrics.record_store_error("insert");
        ApiError::persistence(PLACE_ORDER_FAILED, e)
    })?;

    metrics.record_order_created();
    tracing::info!(
        order_id = %order.id,
        item_count = order.items.len(),
        total = order.total,
        "✅ Order saved successfully"
    );

    Ok(HttpResponse::Created().json(order))
}

/// GET /api/orders
pub async fn list_orders(
    store: web::Data<dyn OrderStore>,
    metrics: web::Data<Metrics>,
) -> Result<HttpResponse, ApiError> {
    let orders = store.list().await.map_err(|e| {
        tracing::error!(error = %e, "Error fetching orders");
        metrics.record_store_error("list");
        ApiError::persistence(FETCH_ORDERS_FAILED, e)
    })?;

    tracing::info!(count = orders.len(), "All orders fetched");
    Ok(HttpResponse::Ok().json(orders))
}

/// GET /health
pub async fn health(store: web::Data<dyn OrderStore>) -> HttpResponse {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "healthy",
            "service": SERVICE_NAME,
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "unhealthy",
                "service": SERVICE_NAME,
                "error": e.to_string(),
            }))
        }
    }
}
