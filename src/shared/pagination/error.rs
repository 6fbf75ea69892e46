use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaginationError {
    #[error("Unknown query parameter: {0}")]
    UnknownParameter(String),

    #[error("Filter key must split into 2 or 3 segments on '__': {0}")]
    MalformedKey(String),

    #[error("Unknown operator '{operator}' in key {key}")]
    UnknownOperator { key: String, operator: String },

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Field cannot be filtered or sorted: {0}")]
    UnknownField(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Database error: {0}")]
    Storage(#[from] sea_orm::DbErr),
}

impl PaginationError {
    /// Whether the caller sent a bad request (as opposed to a server-side failure).
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::InvalidBaseUrl(_))
    }

    pub(crate) fn invalid_value(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

pub type PaginationResult<T> = Result<T, PaginationError>;
