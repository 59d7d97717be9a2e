//! Libraries, the top-level storage containers of a Seafile server.
use reqwest::Method;
use serde::Serialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    api::{expect_success, read_json},
    client::Client,
    errors::Error,
    types::{Library, LibraryCreated},
};

use super::{ApiVersion, Resource};

/// Operations on libraries.
#[derive(Debug, Clone, Copy)]
pub struct Libraries<'a> {
    client: &'a Client,
}

impl<'a> Libraries<'a> {
    /// Bind the resource family to a client handle.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List all libraries visible to the authenticated user.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - invalid token
    #[instrument(skip(self))]
    pub async fn list(&self) -> crate::Result<Vec<Library>> {
        let res = self
            .client
            .request(Method::GET, format!("{}/repos/", self.api_base_url()))
            .send()
            .await?;

        let libraries: Vec<Library> = read_json(res).await?;

        debug!("listed {} libraries", libraries.len());

        Ok(libraries)
    }

    /// Get a single library by id.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such library
    #[instrument(skip(self))]
    pub async fn get(&self, id: &Uuid) -> crate::Result<Library> {
        let res = self
            .client
            .request(Method::GET, format!("{}/repos/{}/", self.api_base_url(), id))
            .send()
            .await?;

        read_json(res).await
    }

    /// Whether a library with the given name is visible to the
    /// authenticated user. Names are not unique; this reports the first
    /// match.
    ///
    /// # Errors
    ///
    /// Same as [`Libraries::list`].
    #[instrument(skip(self))]
    pub async fn exists(&self, name: &str) -> crate::Result<bool> {
        let libraries = self.list().await?;

        Ok(libraries.iter().any(|l| l.name == name))
    }

    /// Create a new library. Pass a password to create an encrypted one.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - out of quota
    #[instrument(skip(self, password))]
    pub async fn create(
        &self,
        name: &str,
        desc: &str,
        password: Option<&str>,
    ) -> crate::Result<LibraryCreated> {
        #[derive(Debug, Serialize)]
        struct CreateLibrary<'a> {
            name: &'a str,
            desc: &'a str,
            passwd: Option<&'a str>,
        }

        let res = self
            .client
            .request(Method::POST, format!("{}/repos/", self.api_base_url()))
            .form(&CreateLibrary {
                name,
                desc,
                passwd: password,
            })
            .send()
            .await?;

        read_json(res).await
    }

    /// Rename a library.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such library
    /// - not the owner
    #[instrument(skip(self))]
    pub async fn rename(&self, id: &Uuid, new_name: &str) -> crate::Result<()> {
        let res = self
            .client
            .request(Method::POST, format!("{}/repos/{}/", self.api_base_url(), id))
            .query(&[("op", "rename")])
            .form(&[("repo_name", new_name)])
            .send()
            .await?;

        expect_success(res).await?;

        Ok(())
    }

    /// **Permanently** delete a library, including its history.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such library
    /// - not the owner
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &Uuid) -> crate::Result<()> {
        let res = self
            .client
            .request(Method::DELETE, format!("{}/repos/{}/", self.api_base_url(), id))
            .send()
            .await?;

        expect_success(res).await?;

        Ok(())
    }

    /// Unlock an encrypted library for the current session by supplying its
    /// password. Required before reading from or writing to it.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such library
    /// - wrong password
    #[instrument(skip(self, password))]
    pub async fn decrypt(&self, id: &Uuid, password: &str) -> crate::Result<()> {
        let res = self
            .client
            .request(Method::POST, format!("{}/repos/{}/", self.api_base_url(), id))
            .form(&[("password", password)])
            .send()
            .await?;

        let msg: String = read_json(res).await?;

        if msg == "success" {
            Ok(())
        } else {
            Err(Error::UnexpectedResponse)
        }
    }
}

impl Resource for Libraries<'_> {
    const API_VERSION: ApiVersion = ApiVersion::V2;

    fn client(&self) -> &Client {
        self.client
    }
}
