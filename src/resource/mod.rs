//! The resource families of the Seafile Web API.
//!
//! Seafile mounts two API generations on every server: the legacy one under
//! `/api2` and the current one under `/api/v2.1`. Each resource family pins
//! the generation its endpoints belong to and derives its API root from the
//! base URI of the [`Client`] it borrows, so one client handle serves both
//! generations at once.

pub mod directory;
pub mod file;
pub mod library;
pub mod share_link;

pub use directory::Directories;
pub use file::Files;
pub use library::Libraries;
pub use share_link::{CreateShareLink, ShareLinks};

use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{Display, EnumString};

use crate::client::Client;

/// An API generation and the path segment it is mounted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// The legacy web API, mounted under `/api2`.
    V2,
    /// The current web API, mounted under `/api/v2.1`.
    V2_1,
}

impl ApiVersion {
    /// The path segment this generation is mounted under, with a leading
    /// slash and no trailing one.
    #[must_use]
    pub const fn mount_point(self) -> &'static str {
        match self {
            Self::V2 => "/api2",
            Self::V2_1 => "/api/v2.1",
        }
    }
}

/// Remove a single trailing slash, if present. Anything that isn't a
/// trailing slash is left alone.
///
/// ```
/// use seafile_client::resource::clip_uri;
///
/// assert_eq!(clip_uri("https://example.com/"), "https://example.com");
/// assert_eq!(clip_uri("https://example.com"), "https://example.com");
/// assert_eq!(clip_uri("https://example.com//"), "https://example.com/");
/// ```
#[must_use]
pub fn clip_uri(uri: &str) -> &str {
    uri.strip_suffix('/').unwrap_or(uri)
}

/// Common behavior of every resource family.
pub trait Resource {
    /// The API generation this family's endpoints are mounted under.
    const API_VERSION: ApiVersion;

    /// The client handle requests are issued through.
    fn client(&self) -> &Client;

    /// The versioned API root for this family, derived from the client's
    /// base URI on every call.
    ///
    /// ```
    /// use seafile_client::{resource::Resource, AuthToken, Client};
    ///
    /// let client = Client::new("https://cloud.example.com/", AuthToken::new("abc123"));
    ///
    /// assert_eq!(
    ///     client.libraries().api_base_url(),
    ///     "https://cloud.example.com/api2"
    /// );
    /// assert_eq!(
    ///     client.share_links().api_base_url(),
    ///     "https://cloud.example.com/api/v2.1"
    /// );
    /// ```
    fn api_base_url(&self) -> String {
        format!(
            "{}{}",
            clip_uri(self.client().base_uri()),
            Self::API_VERSION.mount_point()
        )
    }
}

/// Access rights to a library, directory or file.
///
/// The wire format is `"r"` or `"rw"`, both in listings and in requests
/// that grant access.
///
/// ```
/// use std::str::FromStr;
///
/// use seafile_client::resource::Permission;
///
/// assert_eq!(Permission::ReadWrite.to_string(), "rw");
/// assert_eq!(Permission::from_str("r").unwrap(), Permission::ReadOnly);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, SerializeDisplay, DeserializeFromStr,
)]
pub enum Permission {
    /// Read only (`"r"`).
    #[strum(serialize = "r")]
    ReadOnly,
    /// Read and write (`"rw"`).
    #[strum(serialize = "rw")]
    ReadWrite,
}

#[cfg(test)]
mod tests {
    use crate::{resource::Resource, AuthToken, Client};

    use super::{clip_uri, Permission};

    fn client(base_uri: &str) -> Client {
        Client::new(base_uri, AuthToken::new("test"))
    }

    #[test]
    fn clip_is_anchored_and_removes_at_most_one_slash() {
        assert_eq!(clip_uri("https://example.com/a/b/"), "https://example.com/a/b");
        assert_eq!(clip_uri("https://example.com//"), "https://example.com/");
        assert_eq!(clip_uri("https://exa/mple.com"), "https://exa/mple.com");
        assert_eq!(clip_uri(""), "");
        assert_eq!(clip_uri("/"), "");
    }

    #[test]
    fn api_roots_per_generation() {
        let client = client("https://cloud.example.com");

        assert_eq!(
            client.libraries().api_base_url(),
            "https://cloud.example.com/api2"
        );
        assert_eq!(
            client.directories().api_base_url(),
            "https://cloud.example.com/api2"
        );
        assert_eq!(
            client.files().api_base_url(),
            "https://cloud.example.com/api2"
        );
        assert_eq!(
            client.share_links().api_base_url(),
            "https://cloud.example.com/api/v2.1"
        );
    }

    #[test]
    fn trailing_slash_does_not_double_up() {
        let client = client("https://cloud.example.com/");

        assert_eq!(
            client.libraries().api_base_url(),
            "https://cloud.example.com/api2"
        );
    }

    #[test]
    fn same_handle_derives_consistently() {
        let client = client("https://cloud.example.com/");

        assert_eq!(
            client.files().api_base_url(),
            client.libraries().api_base_url()
        );
        assert_eq!(client.files().api_base_url(), client.files().api_base_url());
    }

    #[test]
    fn permission_markers() {
        assert_eq!(Permission::ReadOnly.to_string(), "r");
        assert_eq!(Permission::ReadWrite.to_string(), "rw");
        assert_eq!("rw".parse::<Permission>().unwrap(), Permission::ReadWrite);
        assert!("admin".parse::<Permission>().is_err());

        assert_eq!(
            serde_json::from_str::<Permission>("\"r\"").unwrap(),
            Permission::ReadOnly
        );
        assert_eq!(serde_json::to_string(&Permission::ReadWrite).unwrap(), "\"rw\"");
    }
}
