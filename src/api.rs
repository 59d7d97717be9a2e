//! API response decoding utilities.
use reqwest::Response;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::trace;

use crate::errors::ErrorResponse;

/// An error body returned by the Seafile API on failures.
///
/// Which key carries the message depends on the endpoint generation:
/// `/api2` mostly uses `error_msg`, the authentication endpoints use
/// `detail` and a few older ones plain `error`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    /// Error message under the common `error_msg` key.
    pub error_msg: Option<String>,
    /// Error message under `detail`.
    pub detail: Option<String>,
    /// Error message under plain `error`.
    pub error: Option<String>,
}

impl ErrorBody {
    /// Parse a response body, leniently. Error pages aren't always JSON
    /// (proxies, HTML error documents); anything unparseable becomes an
    /// empty body.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }

    /// The human-readable message, whichever key carried it.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.error_msg
            .as_deref()
            .or(self.detail.as_deref())
            .or(self.error.as_deref())
    }
}

/// Pass the response through if it has a 2xx status code, otherwise parse
/// the body as an [`ErrorBody`] and map it to an error.
pub(crate) async fn expect_success(res: Response) -> crate::Result<Response> {
    let status = res.status();

    if status.is_success() {
        return Ok(res);
    }

    let text = res.text().await?;

    trace!("error body: {}", text);

    Err(ErrorResponse {
        status,
        body: ErrorBody::parse(&text),
    }
    .into())
}

/// Parse JSON as the associated type if the response has a 2xx status
/// code, otherwise parse it as [`ErrorBody`].
///
/// # Errors
///
/// - invalid json
/// - upstream errors
pub(crate) async fn read_json<T: DeserializeOwned>(res: Response) -> crate::Result<T> {
    let res = expect_success(res).await?;

    Ok(res.json().await?)
}

#[cfg(test)]
mod tests {
    use super::ErrorBody;

    #[test]
    fn message_key_precedence() {
        let body: ErrorBody = serde_json::from_str(r#"{"error_msg": "Wrong password"}"#).unwrap();
        assert_eq!(body.message(), Some("Wrong password"));

        let body: ErrorBody =
            serde_json::from_str(r#"{"detail": "Invalid token header."}"#).unwrap();
        assert_eq!(body.message(), Some("Invalid token header."));

        let body: ErrorBody = serde_json::from_str(r#"{"error": "out of quota"}"#).unwrap();
        assert_eq!(body.message(), Some("out of quota"));

        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.message(), None);
    }

    #[test]
    fn lenient_body_parsing() {
        let body = ErrorBody::parse(r#"{"error_msg": "Out of quota.\n"}"#);
        assert_eq!(body.message(), Some("Out of quota.\n"));

        let body = ErrorBody::parse("<html><body><h1>502 Bad Gateway</h1></body></html>");
        assert_eq!(body.message(), None);

        let body = ErrorBody::parse("");
        assert_eq!(body.message(), None);
    }
}
