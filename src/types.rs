//! Data returned by the Seafile Web API.
use serde::Deserialize;
use serde_with::serde_as;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    resource::Permission,
    serde::{OptRfc3339, UnixSeconds},
};

/// A library, the top-level storage container of a Seafile server. The
/// upstream API also calls these "repos".
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct Library {
    /// Library id.
    pub id: Uuid,

    /// Display name.
    pub name: String,

    /// Email address of the owning account.
    #[serde(default)]
    pub owner: Option<String>,

    /// Free-form description.
    #[serde(default)]
    pub desc: Option<String>,

    /// Whether the library contents are encrypted with a password.
    #[serde(default)]
    pub encrypted: bool,

    /// The authenticated user's rights on this library.
    #[serde(default)]
    pub permission: Option<Permission>,

    /// Last modification date.
    #[serde_as(as = "Option<UnixSeconds>")]
    #[serde(default)]
    pub mtime: Option<OffsetDateTime>,

    /// Total size in bytes.
    #[serde(default)]
    pub size: u64,
}

/// Response to library creation.
#[derive(Debug, Deserialize)]
pub struct LibraryCreated {
    /// Id of the new library.
    pub repo_id: Uuid,

    /// Name it was created with.
    pub repo_name: String,
}

/// What a directory entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A subdirectory.
    Dir,
}

/// One row of a directory listing.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct DirEntry {
    /// Object id of the entry, a 40 character hash.
    pub id: String,

    /// File or subdirectory.
    #[serde(rename = "type")]
    pub typ: EntryKind,

    /// Entry name, without the parent path.
    pub name: String,

    /// Size in bytes. Zero for subdirectories.
    #[serde(default)]
    pub size: u64,

    /// Last modification date.
    #[serde_as(as = "Option<UnixSeconds>")]
    #[serde(default)]
    pub mtime: Option<OffsetDateTime>,

    /// The authenticated user's rights on this entry.
    #[serde(default)]
    pub permission: Option<Permission>,
}

/// Metadata of a single file.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct FileDetail {
    /// Object id of the file.
    pub id: String,

    /// File name, without the parent path.
    pub name: String,

    /// Always [`EntryKind::File`].
    #[serde(rename = "type")]
    pub typ: EntryKind,

    /// Size in bytes.
    pub size: u64,

    /// Last modification date.
    #[serde_as(as = "Option<UnixSeconds>")]
    #[serde(default)]
    pub mtime: Option<OffsetDateTime>,
}

/// Confirmation row returned for an uploaded file.
#[derive(Debug, Deserialize)]
pub struct UploadedFile {
    /// Name the file ended up with. May differ from the requested name if
    /// it collided with an existing file.
    pub name: String,

    /// Object id of the new file.
    pub id: String,

    /// Size in bytes.
    pub size: u64,
}

/// One commit in the history of a file.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct HistoryCommit {
    /// Commit id.
    pub id: String,

    /// When the commit was made.
    #[serde_as(as = "UnixSeconds")]
    pub ctime: OffsetDateTime,

    /// Display name of the committing account.
    #[serde(default)]
    pub creator_name: Option<String>,

    /// Server-generated change summary.
    #[serde(default)]
    pub desc: Option<String>,

    /// Object id of the file as of this commit.
    #[serde(default)]
    pub rev_file_id: Option<String>,

    /// Size of the file as of this commit.
    #[serde(default)]
    pub rev_file_size: u64,
}

/// A public share link to a file or directory.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct SharedLink {
    /// Link token, the last path segment of the public URL.
    pub token: String,

    /// Full public URL.
    pub link: String,

    /// Library the link points into.
    pub repo_id: Uuid,

    /// Path of the shared file or directory within the library.
    pub path: String,

    /// Name of the shared file or directory.
    #[serde(default)]
    pub obj_name: Option<String>,

    /// Whether the link points at a directory.
    #[serde(default)]
    pub is_dir: bool,

    /// How often the link has been visited.
    #[serde(default)]
    pub view_cnt: u64,

    /// When the link was created.
    #[serde_as(as = "OptRfc3339")]
    #[serde(default)]
    pub ctime: Option<OffsetDateTime>,

    /// When the link expires. Empty on the wire if it never does.
    #[serde_as(as = "OptRfc3339")]
    #[serde(default)]
    pub expire_date: Option<OffsetDateTime>,

    /// Whether the link has expired.
    #[serde(default)]
    pub is_expired: bool,

    /// What the link allows visitors to do.
    #[serde(default)]
    pub permissions: Option<LinkPermissions>,
}

/// Visitor rights attached to a [`SharedLink`].
#[derive(Debug, Deserialize)]
pub struct LinkPermissions {
    /// Visitors may edit the file.
    pub can_edit: bool,
    /// Visitors may download the file.
    pub can_download: bool,
}
