//! Authentication against a Seafile server.
use derive_more::Display;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    api::read_json,
    client::Client,
    errors::Error,
    resource::{clip_uri, ApiVersion},
};

/// An API token issued by a Seafile server.
///
/// Tokens are opaque and long-lived. They are sent with every request as
/// `Authorization: Token <token>`.
#[derive(Debug, Clone, Display)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap an already issued token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Obtain a token with username and password.
    ///
    /// Uses its own one-shot HTTP client, since a [`Client`] cannot exist
    /// without the token this returns.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - incorrect username and/or password
    #[instrument(skip(password))]
    pub async fn obtain(base_uri: &str, username: &str, password: &str) -> crate::Result<Self> {
        #[derive(Debug, Serialize)]
        struct Credentials<'a> {
            username: &'a str,
            password: &'a str,
        }

        #[derive(Debug, Deserialize)]
        struct TokenResponse {
            token: String,
        }

        let res = reqwest::Client::new()
            .post(format!(
                "{}{}/auth-token/",
                clip_uri(base_uri),
                ApiVersion::V2.mount_point()
            ))
            .form(&Credentials { username, password })
            .send()
            .await?;

        let TokenResponse { token } = read_json(res).await?;

        Ok(Self(token))
    }
}

/// Check that the client's token is accepted by the server.
///
/// # Errors
///
/// - network errors
/// - invalid or revoked token
#[instrument(skip_all)]
pub async fn ping(client: &Client) -> crate::Result<()> {
    let res = client
        .request(
            Method::GET,
            format!(
                "{}{}/auth/ping/",
                clip_uri(client.base_uri()),
                ApiVersion::V2.mount_point()
            ),
        )
        .send()
        .await?;

    let pong: String = read_json(res).await?;

    if pong == "pong" {
        Ok(())
    } else {
        Err(Error::UnexpectedResponse)
    }
}
