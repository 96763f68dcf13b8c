use actix_cors::Cors;
use actix_web::http::header;

/// Cross-origin policy shared by every route.
pub fn configure_cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::ACCEPT_ENCODING,
            header::AUTHORIZATION,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .supports_credentials()
        .max_age(3600);

    for origin in allowed_origins {
        // actix-cors rejects "*" as a literal origin
        if origin == "*" {
            cors = cors.allow_any_origin();
            tracing::warn!("CORS configured to allow any origin");
            continue;
        }
        cors = cors.allowed_origin(origin);
        tracing::debug!("Added allowed CORS origin: {}", origin);
    }

    cors
}
