use reqwest::StatusCode;
use thiserror::Error;

/// Réponse non-succès du backend, classée par statut HTTP
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("credentials rejected (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("bad request for {what}: {body}")]
    BadRequest { what: String, body: String },

    #[error("backend error for {what}: HTTP {status}")]
    Server { what: String, status: u16 },

    #[error("unexpected HTTP {status} for {what}")]
    Unexpected { what: String, status: u16 },
}

impl ApiError {
    pub fn from_status(status: StatusCode, what: &str, body: String) -> Self {
        let what = what.to_string();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized {
                status: status.as_u16(),
            },
            StatusCode::NOT_FOUND => ApiError::NotFound { what },
            s if s.is_client_error() => ApiError::BadRequest { what, body },
            s if s.is_server_error() => ApiError::Server {
                what,
                status: s.as_u16(),
            },
            s => ApiError::Unexpected {
                what,
                status: s.as_u16(),
            },
        }
    }
}
