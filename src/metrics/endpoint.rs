use actix_web::{web, HttpResponse, Responder};
use prometheus::{Encoder, TextEncoder};

use super::Metrics;

/// GET /metrics
pub async fn metrics_handler(metrics: web::Data<Metrics>) -> impl Responder {
    match metrics.encode() {
        Ok(buffer) => HttpResponse::Ok()
            .content_type(TextEncoder::new().format_type())
            .body(buffer),
        Err(e) => {
            tracing::error!(error = %e, "Error generating metrics");
            HttpResponse::InternalServerError()
                .content_type("text/plain; charset=utf-8")
                .body(e.to_string())
        }
    }
}
