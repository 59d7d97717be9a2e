//! Directories within a library.
use reqwest::Method;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    api::{expect_success, read_json},
    client::Client,
    types::{DirEntry, EntryKind},
};

use super::{ApiVersion, Resource};

/// Operations on directories.
#[derive(Debug, Clone, Copy)]
pub struct Directories<'a> {
    client: &'a Client,
}

impl<'a> Directories<'a> {
    /// Bind the resource family to a client handle.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn dir_url(&self, library: &Uuid) -> String {
        format!("{}/repos/{}/dir/", self.api_base_url(), library)
    }

    /// List the entries of a directory.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such directory
    /// - library is encrypted and not unlocked
    #[instrument(skip(self))]
    pub async fn list(&self, library: &Uuid, path: &str) -> crate::Result<Vec<DirEntry>> {
        let res = self
            .client
            .request(Method::GET, self.dir_url(library))
            .query(&[("p", path)])
            .send()
            .await?;

        let entries: Vec<DirEntry> = read_json(res).await?;

        debug!("listed {} entries", entries.len());

        Ok(entries)
    }

    /// Whether `parent` contains a subdirectory named `name`.
    ///
    /// # Errors
    ///
    /// Same as [`Directories::list`].
    #[instrument(skip(self))]
    pub async fn exists(&self, library: &Uuid, parent: &str, name: &str) -> crate::Result<bool> {
        let entries = self.list(library, parent).await?;

        Ok(entries
            .iter()
            .any(|e| e.typ == EntryKind::Dir && e.name == name))
    }

    /// Create a directory. The parent directory must already exist; see
    /// [`Directories::create_all`] for the mkdir-p version.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - parent doesn't exist
    #[instrument(skip(self))]
    pub async fn create(&self, library: &Uuid, path: &str) -> crate::Result<()> {
        let res = self
            .client
            .request(Method::POST, self.dir_url(library))
            .query(&[("p", path)])
            .form(&[("operation", "mkdir")])
            .send()
            .await?;

        expect_success(res).await?;

        Ok(())
    }

    /// Create a directory and any missing ancestors, shallowest first.
    /// Directories that already exist along the way are left alone.
    ///
    /// # Errors
    ///
    /// Same as [`Directories::create`].
    #[instrument(skip(self))]
    pub async fn create_all(&self, library: &Uuid, path: &str) -> crate::Result<()> {
        let mut parent = String::from("/");

        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let dir = if parent == "/" {
                format!("/{segment}")
            } else {
                format!("{parent}/{segment}")
            };

            if !self.exists(library, &parent, segment).await? {
                self.create(library, &dir).await?;
            }

            parent = dir;
        }

        Ok(())
    }

    /// Rename a directory in place.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such directory
    #[instrument(skip(self))]
    pub async fn rename(&self, library: &Uuid, path: &str, new_name: &str) -> crate::Result<()> {
        let res = self
            .client
            .request(Method::POST, self.dir_url(library))
            .query(&[("p", path)])
            .form(&[("operation", "rename"), ("newname", new_name)])
            .send()
            .await?;

        expect_success(res).await?;

        Ok(())
    }

    /// Delete a directory and everything in it.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such directory
    #[instrument(skip(self))]
    pub async fn delete(&self, library: &Uuid, path: &str) -> crate::Result<()> {
        let res = self
            .client
            .request(Method::DELETE, self.dir_url(library))
            .query(&[("p", path)])
            .send()
            .await?;

        expect_success(res).await?;

        Ok(())
    }
}

impl Resource for Directories<'_> {
    const API_VERSION: ApiVersion = ApiVersion::V2;

    fn client(&self) -> &Client {
        self.client
    }
}
