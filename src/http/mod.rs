// ============================================================================
// HTTP API Layer
// ============================================================================
//
// Routes:
// - POST /api/orders   create an order
// - GET  /api/orders   list every order
// - GET  /metrics      Prometheus text exposition
// - GET  /health       store reachability
//
// Every request passes the CORS policy and is counted by the request metrics
// middleware. The store and metrics are injected, never global.
//
// ============================================================================

mod cors;
mod error;
mod handlers;

use std::sync::Arc;
use std::time::Instant;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::{web, App, HttpRequest};

use crate::metrics::{metrics_handler, Metrics};
use crate::store::OrderStore;

use error::ApiError;

const UNMATCHED_ROUTE: &str = "unmatched";
const OTHER_METHOD: &str = "other";

/// Metric label for a request method. Extension methods share one label so
/// clients cannot create new series at will.
fn method_label(method: &Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "OPTIONS" => "OPTIONS",
        "HEAD" => "HEAD",
        "PATCH" => "PATCH",
        _ => OTHER_METHOD,
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req: &HttpRequest| {
        tracing::warn!(error = %err, "Rejected malformed order body");
        if let Some(metrics) = req.app_data::<web::Data<Metrics>>() {
            metrics.record_validation_failure("malformed_body");
        }
        ApiError::MalformedBody(err.to_string()).into()
    })
}

/// Build the application. `main` calls this once per worker.
pub fn app(
    store: Arc<dyn OrderStore>,
    metrics: Arc<Metrics>,
    allowed_origin: &str,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::from(store))
        .app_data(web::Data::from(metrics))
        .app_data(json_config())
        .wrap(cors::policy(allowed_origin))
        .wrap_fn(|req, srv| {
            let metrics = req.app_data::<web::Data<Metrics>>().cloned();
            let method = method_label(req.method());
            let started = Instant::now();
            let fut = srv.call(req);

            async move {
                let res = fut.await;
                let (route, status) = match &res {
                    Ok(res) => (
                        res.request()
                            .match_pattern()
                            .unwrap_or_else(|| UNMATCHED_ROUTE.to_string()),
                        res.status(),
                    ),
                    Err(e) => (
                        UNMATCHED_ROUTE.to_string(),
                        e.error_response().status(),
                    ),
                };
                let elapsed = started.elapsed();

                tracing::debug!(
                    method = method,
                    route = %route,
                    status = status.as_u16(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Request completed"
                );
                if let Some(metrics) = metrics {
                    metrics.record_http_request(
                        method,
                        &route,
                        status.as_u16(),
                        elapsed.as_secs_f64(),
                    );
                }

                res
            }
        })
        .route("/metrics", web::get().to(metrics_handler))
        .route("/health", web::get().to(handlers::health))
        .service(
            web::resource("/api/orders")
                .route(web::post().to(handlers::create_order))
                .route(web::get().to(handlers::list_orders)),
        )
}

// ============================================================================
// Unit Tests
// ============================================================================
