use crate::application::PostService;
use crate::domain::post::{CreatePostRequest, UpdatePostRequest};
use crate::domain::DomainError;
use actix_web::http::{header::ContentType, StatusCode};
use actix_web::{web, HttpResponse, Responder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: String,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api/posts")
            .route("", web::get().to(list_posts))
            .route("", web::post().to(create_post))
            // An empty segment is matched on purpose so it can be answered
            // with "missing id" instead of a routing 404.
            .route("/{id:[^/]*}", web::get().to(get_post))
            .route("/{id:[^/]*}", web::put().to(update_post))
            .route("/{id:[^/]*}", web::patch().to(update_post))
            .route("/{id:[^/]*}", web::delete().to(delete_post)),
    );
}

// Convert DomainError into HttpResponse
fn error_to_response(err: DomainError) -> HttpResponse {
    let status = StatusCode::from_u16(err.to_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match err {
        // Upstream rejections are relayed verbatim
        DomainError::Upstream { body, .. } => HttpResponse::build(status)
            .content_type(ContentType::plaintext())
            .body(body),
        other => {
            HttpResponse::build(status).json(serde_json::json!({ "error": other.to_string() }))
        }
    }
}

fn parse_body<T: DeserializeOwned>(payload: &[u8]) -> Result<T, DomainError> {
    serde_json::from_slice(payload)
        .map_err(|e| DomainError::BadRequest(format!("invalid JSON body: {}", e)))
}

pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn list_posts(post_service: web::Data<Arc<PostService>>) -> impl Responder {
    tracing::info!("Listing posts");

    match post_service.list_posts().await {
        Ok(posts) => HttpResponse::Ok().json(posts),
        Err(err) => error_to_response(err),
    }
}

pub async fn get_post(
    post_service: web::Data<Arc<PostService>>,
    path: web::Path<String>,
) -> impl Responder {
    let post_id = path.into_inner();

    tracing::info!("Getting post with id={}", post_id);

    match post_service.get_post(&post_id).await {
        Ok(post) => HttpResponse::Ok().json(post),
        Err(err) => error_to_response(err),
    }
}

pub async fn create_post(
    post_service: web::Data<Arc<PostService>>,
    payload: web::Bytes,
) -> impl Responder {
    let req = match parse_body::<CreatePostRequest>(&payload) {
        Ok(req) => req,
        Err(err) => {
            tracing::warn!("Rejected create request: {}", err);
            return error_to_response(err);
        }
    };

    match post_service.create_post(req).await {
        Ok(post) => HttpResponse::Created().json(post),
        Err(err) => error_to_response(err),
    }
}

pub async fn update_post(
    post_service: web::Data<Arc<PostService>>,
    path: web::Path<String>,
    payload: web::Bytes,
) -> impl Responder {
    let post_id = path.into_inner();

    let req = match parse_body::<UpdatePostRequest>(&payload) {
        Ok(req) => req,
        Err(err) => {
            tracing::warn!("Rejected update request for id={}: {}", post_id, err);
            return error_to_response(err);
        }
    };

    match post_service.update_post(&post_id, req).await {
        Ok(post) => HttpResponse::Ok().json(post),
        Err(err) => error_to_response(err),
    }
}

pub async fn delete_post(
    post_service: web::Data<Arc<PostService>>,
    path: web::Path<String>,
) -> impl Responder {
    let post_id = path.into_inner();

    match post_service.delete_post(&post_id).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_to_response(err),
    }
}
