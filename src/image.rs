//! Image-URL resolution for asset paths returned by the backend.

use crate::client::ClientConfig;
use crate::client::request::{is_absolute_url, resolve_url};

/// Turn a possibly-relative asset path into a full URL.
///
/// Empty or absent paths map to the placeholder image; absolute URLs are
/// returned unchanged; anything else is prefixed with the base URL.
pub fn image_url(config: &ClientConfig, path: Option<&str>) -> String {
    match path {
        None | Some("") => config.placeholder_image_url.clone(),
        Some(p) if is_absolute_url(p) => p.to_string(),
        Some(p) => resolve_url(&config.base_url, p),
    }
}
