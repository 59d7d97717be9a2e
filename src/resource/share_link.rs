//! Public share links.
//!
//! Unlike the other resource families, share links only exist in the
//! current API generation, mounted under `/api/v2.1`.
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    api::{expect_success, read_json},
    client::Client,
    types::SharedLink,
};

use super::{ApiVersion, Resource};

/// Operations on share links.
#[derive(Debug, Clone, Copy)]
pub struct ShareLinks<'a> {
    client: &'a Client,
}

/// Share link creation request.
#[derive(Debug, Serialize)]
pub struct CreateShareLink<'a> {
    /// Library to share from.
    pub repo_id: Uuid,

    /// Path of the file or directory to share.
    pub path: &'a str,

    /// Password visitors must enter, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<&'a str>,

    /// Days until the link expires. Subject to server-side limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_days: Option<u32>,
}

impl<'a> ShareLinks<'a> {
    /// Bind the resource family to a client handle.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List all share links owned by the authenticated user.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - invalid token
    #[instrument(skip(self))]
    pub async fn list(&self) -> crate::Result<Vec<SharedLink>> {
        let res = self
            .client
            .request(Method::GET, format!("{}/share-links/", self.api_base_url()))
            .send()
            .await?;

        let links: Vec<SharedLink> = read_json(res).await?;

        debug!("listed {} share links", links.len());

        Ok(links)
    }

    /// Create a share link.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such file or directory
    /// - expiry outside the server's allowed range
    #[instrument(skip(self, req))]
    pub async fn create(&self, req: &CreateShareLink<'_>) -> crate::Result<SharedLink> {
        let res = self
            .client
            .request(Method::POST, format!("{}/share-links/", self.api_base_url()))
            .json(req)
            .send()
            .await?;

        read_json(res).await
    }

    /// Delete a share link by its token.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such link
    #[instrument(skip(self))]
    pub async fn delete(&self, token: &str) -> crate::Result<()> {
        let res = self
            .client
            .request(
                Method::DELETE,
                format!("{}/share-links/{}/", self.api_base_url(), token),
            )
            .send()
            .await?;

        expect_success(res).await?;

        Ok(())
    }
}

impl Resource for ShareLinks<'_> {
    const API_VERSION: ApiVersion = ApiVersion::V2_1;

    fn client(&self) -> &Client {
        self.client
    }
}
