//! Typed client for the posts gateway HTTP API.

pub mod error;
pub mod http_client;
pub mod models;

pub use error::ClientError;
pub use http_client::PostsClient;
pub use models::{CreatePostRequest, Post, UpdatePostRequest};
