#![doc = include_str!("../README.md")]
#![warn(
    unreachable_pub,
    missing_debug_implementations,
    missing_docs,
    clippy::pedantic
)]

pub mod api;
pub mod auth;
mod client;
pub mod errors;
pub mod resource;
pub(crate) mod serde;
pub mod types;

pub(crate) type Result<T> = core::result::Result<T, errors::Error>;

pub use auth::AuthToken;
pub use client::*;
pub use errors::Error;
