//! Nothing ever goes wrong over a network.
use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

use crate::api::ErrorBody;

/// Error used by the entire crate.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP error.
    #[error("{0}")]
    HttpError(#[from] reqwest::Error),

    /// Url error.
    #[error("invalid url")]
    UrlError(#[from] url::ParseError),

    /// Upstream (unrecognized) Seafile error. Might be due to
    /// a user error.
    #[error("seafile error: {0}")]
    SeafileError(ErrorResponse),

    /// Bad credentials.
    #[error("bad credentials")]
    BadCredentials,

    /// Operation requires rights the account doesn't have.
    #[error("permission denied")]
    PermissionDenied,

    /// Not found.
    #[error("no such library, directory or file")]
    NotFound,

    /// Name conflict.
    #[error("file or directory already exists")]
    AlreadyExists,

    /// The library is encrypted and its password has not been supplied,
    /// or the one supplied was wrong.
    #[error("library password required")]
    PasswordRequired,

    /// The server answered with a 2xx status but the body didn't match
    /// the documented shape.
    #[error("unexpected response from server")]
    UnexpectedResponse,
}

/// An error response from the upstream Seafile API that doesn't map to a
/// more precise [`Error`] variant.
#[derive(Debug)]
pub struct ErrorResponse {
    /// HTTP status code of the response.
    pub status: StatusCode,
    /// Parsed error body, if there was one.
    pub body: ErrorBody,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.body.message() {
            Some(msg) => write!(f, "{} ({})", msg, self.status),
            None => self.status.fmt(f),
        }
    }
}

impl From<ErrorResponse> for Error {
    fn from(err: ErrorResponse) -> Self {
        // 440 is Seafile's own status for missing or wrong library passwords.
        match err.status {
            StatusCode::UNAUTHORIZED => Self::BadCredentials,
            StatusCode::FORBIDDEN => Self::PermissionDenied,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::CONFLICT => Self::AlreadyExists,
            s if s.as_u16() == 440 => Self::PasswordRequired,
            _ => Self::SeafileError(err),
        }
    }
}
