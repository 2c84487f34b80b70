//! Portal REST bindings: one fixed `(method, path)` pair per operation,
//! all rooted under the configured API prefix.
//!
//! Payloads pass through untouched: fetches return the backend's JSON as-is,
//! submissions serialize the form and return the backend's reply.

pub mod forms;
pub mod notice;

use reqwest::Url;
use serde::Serialize;
use tracing::info;

use crate::client::{ApiResult, ClientError, HttpClient, RequestOptions};

pub use forms::{CareerApplication, ContactForm, PartnershipForm};
pub use notice::{Notice, NoticeLevel};

pub const VACANCIES: &str = "/vacancies";
pub const PROJECTS: &str = "/projects";
pub const EVENTS: &str = "/events";
pub const CONTACT: &str = "/contact";
pub const PARTNERSHIP: &str = "/academy/partnership";
pub const CAREERS_APPLY: &str = "/careers/apply";

#[derive(Debug, Clone)]
pub struct PortalApi {
    http: HttpClient,
}

impl PortalApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    // ── Listings ──────────────────────────────────────────────────────────────

    pub async fn fetch_vacancies(&self) -> ApiResult {
        self.get(VACANCIES).await
    }

    pub async fn fetch_projects(&self) -> ApiResult {
        self.get(PROJECTS).await
    }

    pub async fn fetch_project(&self, id_or_slug: &str) -> ApiResult {
        self.get(&item_endpoint(PROJECTS, id_or_slug)?).await
    }

    pub async fn fetch_events(&self) -> ApiResult {
        self.get(EVENTS).await
    }

    pub async fn fetch_event(&self, id_or_slug: &str) -> ApiResult {
        self.get(&item_endpoint(EVENTS, id_or_slug)?).await
    }

    // ── Submissions ───────────────────────────────────────────────────────────

    pub async fn submit_contact(&self, form: &ContactForm) -> ApiResult {
        self.post(CONTACT, form).await
    }

    pub async fn submit_partnership(&self, form: &PartnershipForm) -> ApiResult {
        self.post(PARTNERSHIP, form).await
    }

    pub async fn submit_career_application(&self, form: &CareerApplication) -> ApiResult {
        self.post(CAREERS_APPLY, form).await
    }

    // ── Admin ─────────────────────────────────────────────────────────────────

    /// Create a project. The payload shape is owned by the backend.
    pub async fn add_project(&self, project: &serde_json::Value) -> ApiResult {
        self.post(PROJECTS, project).await
    }

    /// Create an event. The payload shape is owned by the backend.
    pub async fn add_event(&self, event: &serde_json::Value) -> ApiResult {
        self.post(EVENTS, event).await
    }

    /// Resolve an asset path from a listing against the base URL.
    pub fn image_url(&self, path: Option<&str>) -> String {
        self.http.image_url(path)
    }

    async fn get(&self, endpoint: &str) -> ApiResult {
        let path = self.http.config().api_path(endpoint);
        self.http.call(&path, RequestOptions::get()).await
    }

    async fn post<T: Serialize + ?Sized>(&self, endpoint: &str, payload: &T) -> ApiResult {
        let path = self.http.config().api_path(endpoint);
        let options = RequestOptions::post().json(payload)?;
        let data = self.http.call(&path, options).await?;
        info!(%endpoint, "submission accepted");
        Ok(data)
    }
}

/// `{collection}/{id_or_slug}` with the id percent-encoded as one path segment.
///
/// Empty, `.` and `..` are rejected: as path segments they would resolve to
/// the collection itself.
fn item_endpoint(collection: &str, id_or_slug: &str) -> Result<String, ClientError> {
    if matches!(id_or_slug, "" | "." | "..") {
        return Err(ClientError::InvalidRequest(format!(
            "invalid id or slug: '{id_or_slug}'"
        )));
    }
    let mut url = Url::parse("http://portal.local/")
        .map_err(|e| ClientError::InvalidRequest(format!("failed to build path: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidRequest("failed to build path".into()))?
        .clear()
        .extend(collection.trim_matches('/').split('/'))
        .push(id_or_slug);
    Ok(url.path().to_string())
}
