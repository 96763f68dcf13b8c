use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Post not found")]
    PostNotFound,

    #[error("Failed to fetch posts")]
    FetchFailed { status: u16 },

    #[error("Data service error ({status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Data service unreachable: {0}")]
    Transport(String),

    #[error("Failed to decode data service response: {0}")]
    Decode(String),

    #[error("Failed to encode data service request: {0}")]
    Encode(String),
}

impl DomainError {
    pub fn to_status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::PostNotFound => 404,
            Self::FetchFailed { status } | Self::Upstream { status, .. } => *status,
            Self::Transport(_) | Self::Decode(_) | Self::Encode(_) => 500,
        }
    }

    pub fn missing_id() -> Self {
        Self::BadRequest("missing id".to_string())
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
