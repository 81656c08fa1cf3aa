use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AppError {
    #[error("no price data recorded for this item")]
    NotFound,
    #[error("authorization failed")]
    Unauthorized,
    #[error("network error: {0}")]
    Network(String),
    #[error("unreadable response: {0}")]
    Api(String),
    #[error("serialization failed: {0}")]
    Json(String),
    #[error("url missing dynamic parameter")]
    ParamMissing,
}

impl From<gloo_net::Error> for AppError {
    fn from(value: gloo_net::Error) -> Self {
        match value {
            gloo_net::Error::SerdeError(error) => Self::Api(error.to_string()),
            other => Self::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value.to_string())
    }
}

pub(crate) type AppResult<T> = Result<T, AppError>;
