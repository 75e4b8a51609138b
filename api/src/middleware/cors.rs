//! CORS policy for the public API.

use actix_cors::Cors;
use actix_web::http::header;

/// Build the CORS middleware.
///
/// With no configured origin the policy stays permissive, which suits local
/// development; deployments set `CORS_ALLOWED_ORIGIN`.
pub fn create_cors(allowed_origin: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    match allowed_origin {
        Some(origin) => cors.allowed_origin(origin),
        None => cors.allow_any_origin(),
    }
}
