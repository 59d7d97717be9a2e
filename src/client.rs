//! The HTTP client handle shared by every resource.
use reqwest::{header, IntoUrl, Method, RequestBuilder};

use crate::{
    auth::AuthToken,
    resource::{Directories, Files, Libraries, ShareLinks},
};

/// `User-Agent` used in all requests.
pub static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A handle to a Seafile server.
///
/// Holds the server's base URI and the account's API token. All resources
/// borrow one shared `Client`, so the base URI and credentials live in
/// exactly one place.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base_uri: String,
    token: AuthToken,
}

impl Client {
    /// Create a new client for the server at `base_uri`, e.g.
    /// `https://seafile.example.com`.
    ///
    /// The base URI is stored exactly as given; resources clip the trailing
    /// slash themselves when they derive their API roots from it.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client fails to initialize.
    #[must_use]
    pub fn new(base_uri: impl Into<String>, token: AuthToken) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap(),
            base_uri: base_uri.into(),
            token,
        }
    }

    /// The base URI this client was constructed with, unmodified.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    pub(crate) fn request(&self, method: Method, url: impl IntoUrl) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(header::AUTHORIZATION, format!("Token {}", self.token))
    }

    /// Library operations on this server.
    #[must_use]
    pub fn libraries(&self) -> Libraries<'_> {
        Libraries::new(self)
    }

    /// Directory operations on this server.
    #[must_use]
    pub fn directories(&self) -> Directories<'_> {
        Directories::new(self)
    }

    /// File operations on this server.
    #[must_use]
    pub fn files(&self) -> Files<'_> {
        Files::new(self)
    }

    /// Share link operations on this server.
    #[must_use]
    pub fn share_links(&self) -> ShareLinks<'_> {
        ShareLinks::new(self)
    }
}
