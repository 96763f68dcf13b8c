use crate::error::ClientError;
use crate::models::{CreatePostRequest, ErrorResponse, Post, UpdatePostRequest};
use reqwest::{Client, Response, StatusCode, Url};

#[derive(Debug, Clone)]
pub struct PostsClient {
    client: Client,
    base_url: String,
}

impl PostsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidRequest(format!("invalid server URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest("server URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
        let url = self.url(&["api", "posts"])?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        match status {
            StatusCode::OK => Ok(response.json::<Vec<Post>>().await?),
            _ => Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(response).await?,
            }),
        }
    }

    pub async fn get_post(&self, id: &str) -> Result<Post, ClientError> {
        let url = self.url(&["api", "posts", id])?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        handle_post_response(response).await
    }

    pub async fn create_post(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Post, ClientError> {
        let url = self.url(&["api", "posts"])?;
        let request = CreatePostRequest {
            title: title.into(),
            body: body.into(),
        };
        tracing::debug!("POST {}", url);

        let response = self.client.post(url).json(&request).send().await?;
        handle_post_response(response).await
    }

    pub async fn update_post(
        &self,
        id: &str,
        request: &UpdatePostRequest,
    ) -> Result<Post, ClientError> {
        let url = self.url(&["api", "posts", id])?;
        tracing::debug!("PATCH {}", url);

        let response = self.client.patch(url).json(request).send().await?;
        handle_post_response(response).await
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), ClientError> {
        let url = self.url(&["api", "posts", id])?;
        tracing::debug!("DELETE {}", url);

        let response = self.client.delete(url).send().await?;
        let status = response.status();

        match status {
            StatusCode::NO_CONTENT => Ok(()),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound),
            StatusCode::BAD_REQUEST => Err(ClientError::InvalidRequest(
                error_message(response).await?,
            )),
            _ => Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(response).await?,
            }),
        }
    }
}

async fn handle_post_response(response: Response) -> Result<Post, ClientError> {
    let status = response.status();

    match status {
        StatusCode::OK | StatusCode::CREATED => Ok(response.json::<Post>().await?),
        StatusCode::NOT_FOUND => Err(ClientError::NotFound),
        StatusCode::BAD_REQUEST => Err(ClientError::InvalidRequest(
            error_message(response).await?,
        )),
        _ => Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(response).await?,
        }),
    }
}

async fn error_message(response: Response) -> Result<String, ClientError> {
    let text = response.text().await?;
    Ok(extract_error(text))
}

// The gateway wraps its own errors as {"error": ...}; relayed upstream bodies
// are passed through as-is.
fn extract_error(text: String) -> String {
    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => body.error,
        Err(_) => text,
    }
}
