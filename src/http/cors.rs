use actix_cors::Cors;
use actix_web::http::header;

const ALLOWED_METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "OPTIONS"];
const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Only `allowed_origin` may call the API; preflight is answered on every route.
///
/// A request from any other origin is answered with 400 before it reaches a
/// handler.
pub fn policy(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .block_on_origin_mismatch(true)
        .allowed_methods(ALLOWED_METHODS)
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(PREFLIGHT_MAX_AGE_SECS)
}
