use crate::data::{DataService, UpstreamResponse};
use crate::domain::post::{CreatePostRequest, PostPatch, UpdatePostRequest};
use crate::domain::{DomainError, Post};
use reqwest::Method;
use serde::Serialize;
use std::sync::Arc;

const POSTS_PATH: &str = "/posts";

/// Translates post operations into calls against the data service.
pub struct PostService {
    data_service: Arc<dyn DataService>,
}

impl PostService {
    pub fn new(data_service: Arc<dyn DataService>) -> Self {
        Self { data_service }
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, DomainError> {
        let response = self
            .data_service
            .call(Method::GET, POSTS_PATH, None)
            .await?;

        if response.status != 200 {
            tracing::error!(
                "Failed to fetch posts: status={}, body={}",
                response.status,
                response.body
            );
            return Err(DomainError::FetchFailed {
                status: response.status,
            });
        }

        decode_rows("list", None, &response)
    }

    pub async fn get_post(&self, id: &str) -> Result<Post, DomainError> {
        require_id(id)?;

        let response = self
            .data_service
            .call(Method::GET, &filter_by_id(id)?, None)
            .await?;

        // Any non-200 is reported as not found.
        if response.status != 200 {
            tracing::warn!(
                "Data service answered {} for post id={}, reporting not found",
                response.status,
                id
            );
            return Err(DomainError::PostNotFound);
        }

        let rows = decode_rows("get", Some(id), &response)?;
        first_row(rows).ok_or(DomainError::PostNotFound)
    }

    pub async fn create_post(&self, req: CreatePostRequest) -> Result<Post, DomainError> {
        let post = Post::new(req);

        tracing::info!("Creating post id={}", post.id);

        let response = self
            .data_service
            .call(Method::POST, POSTS_PATH, Some(to_json(&post)?))
            .await?;

        if response.status != 201 {
            return Err(upstream_error("create", &post.id, response));
        }

        let rows = decode_rows("create", Some(&post.id), &response)?;
        let created = first_row(rows).ok_or_else(|| {
            DomainError::Decode("data service returned no rows for insert".to_string())
        })?;

        tracing::info!("Post created: id={}", created.id);

        Ok(created)
    }

    pub async fn update_post(&self, id: &str, req: UpdatePostRequest) -> Result<Post, DomainError> {
        require_id(id)?;

        if let Some(body_id) = req.id.as_deref().filter(|body_id| *body_id != id) {
            tracing::debug!("Ignoring body id={} in favour of path id={}", body_id, id);
        }

        let patch = PostPatch::new(id, req);

        tracing::info!("Updating post id={}", id);

        let response = self
            .data_service
            .call(Method::PATCH, &filter_by_id(id)?, Some(to_json(&patch)?))
            .await?;

        if response.status != 200 {
            return Err(upstream_error("update", id, response));
        }

        let rows = decode_rows("update", Some(id), &response)?;
        let updated = first_row(rows).ok_or_else(|| {
            tracing::info!("Update matched no rows: id={}", id);
            DomainError::PostNotFound
        })?;

        tracing::info!("Post updated: id={}", id);

        Ok(updated)
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), DomainError> {
        require_id(id)?;

        tracing::info!("Deleting post id={}", id);

        let response = self
            .data_service
            .call(Method::DELETE, &filter_by_id(id)?, None)
            .await?;

        if response.status != 204 {
            return Err(upstream_error("delete", id, response));
        }

        tracing::info!("Post deleted: id={}", id);

        Ok(())
    }
}

fn require_id(id: &str) -> Result<(), DomainError> {
    if id.is_empty() {
        return Err(DomainError::missing_id());
    }
    Ok(())
}

/// Builds `/posts?id=eq.<id>` with the id form-encoded.
fn filter_by_id(id: &str) -> Result<String, DomainError> {
    let query = serde_urlencoded::to_string([("id", format!("eq.{}", id))])
        .map_err(|e| DomainError::BadRequest(format!("invalid id: {}", e)))?;
    Ok(format!("{}?{}", POSTS_PATH, query))
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, DomainError> {
    serde_json::to_value(value).map_err(|e| DomainError::Encode(e.to_string()))
}

fn decode_rows(
    operation: &str,
    id: Option<&str>,
    response: &UpstreamResponse,
) -> Result<Vec<Post>, DomainError> {
    serde_json::from_str(&response.body).map_err(|e| {
        tracing::error!(
            "Failed to decode data service response for {} (id={:?}, status={}): {}",
            operation,
            id,
            response.status,
            e
        );
        DomainError::Decode(e.to_string())
    })
}

fn first_row(rows: Vec<Post>) -> Option<Post> {
    rows.into_iter().next()
}

fn upstream_error(operation: &str, id: &str, response: UpstreamResponse) -> DomainError {
    tracing::error!(
        "Data service rejected {} for post id={}: status={}, body={}",
        operation,
        id,
        response.status,
        response.body
    );
    DomainError::Upstream {
        status: response.status,
        body: response.body,
    }
}
