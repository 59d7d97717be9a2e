//! Files within a library.
//!
//! Transfers are a two-step affair: ask the API for a link, then talk to
//! the file server behind it. The convenience methods here do both steps.
use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use reqwest::{multipart, Body, Method, Response, Url};
use serde::Deserialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    api::{expect_success, read_json},
    client::Client,
    errors::Error,
    types::{FileDetail, HistoryCommit, UploadedFile},
};

use super::{ApiVersion, Resource};

/// Operations on files.
#[derive(Debug, Clone, Copy)]
pub struct Files<'a> {
    client: &'a Client,
}

/// Split a file path into parent directory and file name.
fn split_path(path: &str) -> (&str, &str) {
    match path.rsplit_once('/') {
        Some(("", name)) => ("/", name),
        Some((dir, name)) => (dir, name),
        None => ("/", path),
    }
}

impl<'a> Files<'a> {
    /// Bind the resource family to a client handle.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn file_url(&self, library: &Uuid) -> String {
        format!("{}/repos/{}/file/", self.api_base_url(), library)
    }

    /// Get a download URL for a file.
    ///
    /// The URL points at the file server and needs no further
    /// authentication. With `reuse` it stays valid for about an hour
    /// instead of being consumed by the first request.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - file doesn't exist
    /// - library is encrypted and not unlocked
    #[instrument(skip(self))]
    pub async fn download_link(
        &self,
        library: &Uuid,
        path: &str,
        reuse: bool,
    ) -> crate::Result<Url> {
        let res = self
            .client
            .request(Method::GET, self.file_url(library))
            .query(&[("p", path), ("reuse", if reuse { "1" } else { "0" })])
            .send()
            .await?;

        let raw: String = read_json(res).await?;

        Ok(Url::parse(&raw)?)
    }

    #[instrument(skip(self))]
    async fn fetch(&self, library: &Uuid, path: &str) -> crate::Result<Response> {
        let url = self.download_link(library, path, false).await?;

        debug!("requesting file");

        let res = self.client.request(Method::GET, url).send().await?;

        expect_success(res).await
    }

    /// Open a stream to a file.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - file doesn't exist
    pub async fn download(
        &self,
        library: &Uuid,
        path: &str,
    ) -> crate::Result<impl Stream<Item = crate::Result<Bytes>>> {
        let res = self.fetch(library, path).await?;

        Ok(res.bytes_stream().map_err(Into::into))
    }

    /// Download a file as a string.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - file doesn't exist
    pub async fn download_string(&self, library: &Uuid, path: &str) -> crate::Result<String> {
        let text = self.fetch(library, path).await?.text().await?;

        Ok(text)
    }

    /// Download a file into memory.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - file doesn't exist
    pub async fn download_bytes(&self, library: &Uuid, path: &str) -> crate::Result<Bytes> {
        let res = self.fetch(library, path).await?;

        Ok(res.bytes().await?)
    }

    /// Get metadata associated with a file.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such file
    #[instrument(skip(self))]
    pub async fn detail(&self, library: &Uuid, path: &str) -> crate::Result<FileDetail> {
        let res = self
            .client
            .request(
                Method::GET,
                format!("{}/repos/{}/file/detail/", self.api_base_url(), library),
            )
            .query(&[("p", path)])
            .send()
            .await?;

        read_json(res).await
    }

    /// Whether a file exists at `path`.
    ///
    /// # Errors
    ///
    /// Network and upstream errors other than not-found.
    #[instrument(skip(self))]
    pub async fn exists(&self, library: &Uuid, path: &str) -> crate::Result<bool> {
        match self.detail(library, path).await {
            Ok(_) => Ok(true),
            Err(Error::NotFound) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Get a URL for uploading new files into a directory. The URL accepts
    /// multipart POSTs for a limited time; [`Files::upload`] does both
    /// steps in one go.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - directory doesn't exist
    #[instrument(skip(self))]
    pub async fn upload_link(&self, library: &Uuid, dir: &str) -> crate::Result<Url> {
        let res = self
            .client
            .request(
                Method::GET,
                format!("{}/repos/{}/upload-link/", self.api_base_url(), library),
            )
            .query(&[("p", dir)])
            .send()
            .await?;

        let raw: String = read_json(res).await?;

        Ok(Url::parse(&raw)?)
    }

    /// Upload a new file into `dir`.
    ///
    /// If an entry named `file_name` already exists, the server stores the
    /// upload under a deduplicated name instead of overwriting; use
    /// [`Files::update`] to overwrite.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - directory doesn't exist
    /// - out of quota
    #[instrument(skip(self, body))]
    pub async fn upload(
        &self,
        library: &Uuid,
        dir: &str,
        file_name: &str,
        body: impl Into<Body>,
    ) -> crate::Result<UploadedFile> {
        let mut url = self.upload_link(library, dir).await?;
        url.query_pairs_mut().append_pair("ret-json", "1");

        let file = multipart::Part::stream(body).file_name(file_name.to_owned());

        let form = multipart::Form::new()
            .part("file", file)
            .text("parent_dir", dir.to_owned())
            .text("replace", "0");

        let res = self
            .client
            .request(Method::POST, url)
            .multipart(form)
            .send()
            .await?;

        let mut uploaded: Vec<UploadedFile> = read_json(res).await?;

        debug!("uploaded {} files", uploaded.len());

        uploaded.pop().ok_or(Error::UnexpectedResponse)
    }

    /// Get a URL for uploading new revisions of files under `dir`.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - directory doesn't exist
    #[instrument(skip(self))]
    pub async fn update_link(&self, library: &Uuid, dir: &str) -> crate::Result<Url> {
        let res = self
            .client
            .request(
                Method::GET,
                format!("{}/repos/{}/update-link/", self.api_base_url(), library),
            )
            .query(&[("p", dir)])
            .send()
            .await?;

        let raw: String = read_json(res).await?;

        Ok(Url::parse(&raw)?)
    }

    /// Overwrite the file at `path` with a new revision. The old revision
    /// stays reachable through [`Files::history`].
    ///
    /// Returns the object id of the new revision.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - file doesn't exist
    #[instrument(skip(self, body))]
    pub async fn update(
        &self,
        library: &Uuid,
        path: &str,
        body: impl Into<Body>,
    ) -> crate::Result<String> {
        let (dir, name) = split_path(path);

        let url = self.update_link(library, dir).await?;

        let file = multipart::Part::stream(body).file_name(name.to_owned());

        let form = multipart::Form::new()
            .part("file", file)
            .text("target_file", path.to_owned());

        let res = self
            .client
            .request(Method::POST, url)
            .multipart(form)
            .send()
            .await?;

        let res = expect_success(res).await?;
        let id = res.text().await?;

        Ok(id.trim_matches('"').to_owned())
    }

    /// Rename a file in place.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such file
    #[instrument(skip(self))]
    pub async fn rename(&self, library: &Uuid, path: &str, new_name: &str) -> crate::Result<()> {
        let res = self
            .client
            .request(Method::POST, self.file_url(library))
            .query(&[("p", path)])
            .form(&[("operation", "rename"), ("newname", new_name)])
            .send()
            .await?;

        expect_success(res).await?;

        Ok(())
    }

    /// Copy a file into a directory, possibly in another library.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - source or destination doesn't exist
    #[instrument(skip(self))]
    pub async fn copy(
        &self,
        library: &Uuid,
        path: &str,
        dst_library: &Uuid,
        dst_dir: &str,
    ) -> crate::Result<()> {
        self.transfer(library, path, dst_library, dst_dir, "copy")
            .await
    }

    /// Move a file into a directory, possibly in another library.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - source or destination doesn't exist
    #[instrument(skip(self))]
    pub async fn move_to(
        &self,
        library: &Uuid,
        path: &str,
        dst_library: &Uuid,
        dst_dir: &str,
    ) -> crate::Result<()> {
        self.transfer(library, path, dst_library, dst_dir, "move")
            .await
    }

    async fn transfer(
        &self,
        library: &Uuid,
        path: &str,
        dst_library: &Uuid,
        dst_dir: &str,
        operation: &str,
    ) -> crate::Result<()> {
        let dst_repo = dst_library.to_string();

        let res = self
            .client
            .request(Method::POST, self.file_url(library))
            .query(&[("p", path)])
            .form(&[
                ("operation", operation),
                ("dst_repo", dst_repo.as_str()),
                ("dst_dir", dst_dir),
            ])
            .send()
            .await?;

        expect_success(res).await?;

        Ok(())
    }

    /// Delete a file.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such file
    #[instrument(skip(self))]
    pub async fn delete(&self, library: &Uuid, path: &str) -> crate::Result<()> {
        let res = self
            .client
            .request(Method::DELETE, self.file_url(library))
            .query(&[("p", path)])
            .send()
            .await?;

        expect_success(res).await?;

        Ok(())
    }

    /// The change history of a file, newest first.
    ///
    /// # Errors
    ///
    /// - network errors
    /// - no such file
    #[instrument(skip(self))]
    pub async fn history(&self, library: &Uuid, path: &str) -> crate::Result<Vec<HistoryCommit>> {
        #[derive(Debug, Deserialize)]
        struct History {
            commits: Vec<HistoryCommit>,
        }

        let res = self
            .client
            .request(
                Method::GET,
                format!("{}/repos/{}/file/history/", self.api_base_url(), library),
            )
            .query(&[("p", path)])
            .send()
            .await?;

        let history: History = read_json(res).await?;

        Ok(history.commits)
    }
}

impl Resource for Files<'_> {
    const API_VERSION: ApiVersion = ApiVersion::V2;

    fn client(&self) -> &Client {
        self.client
    }
}

#[cfg(test)]
mod tests {
    use super::split_path;

    #[test]
    fn split_path_into_dir_and_name() {
        assert_eq!(split_path("/docs/readme.md"), ("/docs", "readme.md"));
        assert_eq!(split_path("/docs/sub/readme.md"), ("/docs/sub", "readme.md"));
        assert_eq!(split_path("/readme.md"), ("/", "readme.md"));
        assert_eq!(split_path("readme.md"), ("/", "readme.md"));
    }
}
