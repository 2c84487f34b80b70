//! AI Labs portal client.
//!
//! [`client::HttpClient`] is the generic request wrapper; [`portal::PortalApi`]
//! binds the portal's endpoints on top of it.

pub mod client;
pub mod config;
pub mod error;
pub mod image;
pub mod logger;
pub mod portal;

pub use client::{ApiResult, ClientConfig, ClientError, ErrorKind, HttpClient, Method, RequestOptions};
pub use image::image_url;
pub use portal::{Notice, PortalApi};
