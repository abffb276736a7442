//! Site host HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required).
//! Covers the full editing flow: list pages → patch page → create redirect.

use std::time::Duration;

use slugsheet_core::{PageRecord, RedirectRule};

use crate::error::ApiError;

// ── Constants ───────────────────────────────────────────────────────

pub const WEBFLOW_API_BASE: &str = "https://api.webflow.com";
pub const DEFAULT_PAGE_LIMIT: u32 = 200;

// ── API seam ────────────────────────────────────────────────────────

/// The host operations a submit pass needs. `SiteClient` is the
/// production implementation; submit tests substitute recording stubs.
pub trait SiteApi {
    fn list_pages(&self, site_id: &str) -> Result<Vec<PageRecord>, ApiError>;
    fn update_page(
        &self,
        page_id: &str,
        slug: &str,
        og_image: Option<&str>,
    ) -> Result<(), ApiError>;
    fn create_redirect(&self, site_id: &str, rule: &RedirectRule) -> Result<(), ApiError>;
}

// ── Client ──────────────────────────────────────────────────────────

/// Site host API client (blocking).
#[derive(Clone)]
pub struct SiteClient {
    http: reqwest::blocking::Client,
    api_base: String,
    token: String,
    page_limit: u32,
}

impl SiteClient {
    /// Create a client against the production API base.
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, WEBFLOW_API_BASE.to_string())
    }

    /// Create a client against an explicit API base (tests, self-hosted).
    pub fn with_base_url(token: String, api_base: String) -> Self {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("slugsheet/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_base,
            token,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Override the page-listing limit.
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit;
        self
    }

    /// List the site's static pages.
    ///
    /// Collection pages (those carrying a non-empty `collectionId`) are
    /// CMS-backed and cannot be edited here; they are filtered out.
    /// Empty image URLs decode to `None`.
    pub fn list_pages(&self, site_id: &str) -> Result<Vec<PageRecord>, ApiError> {
        let url = format!(
            "{}/v2/sites/{}/pages?limit={}",
            self.api_base, site_id, self.page_limit
        );
        let resp = self.get(&url)?;
        let json: serde_json::Value = resp.json().map_err(|e| ApiError::Parse(e.to_string()))?;

        let empty = Vec::new();
        let pages = json["pages"].as_array().unwrap_or(&empty);

        let records = pages
            .iter()
            .filter(|p| p["collectionId"].as_str().map_or(true, |id| id.is_empty()))
            .map(|p| PageRecord {
                id: p["id"].as_str().unwrap_or("").to_string(),
                name: p["title"].as_str().unwrap_or("").to_string(),
                slug: p["slug"].as_str().unwrap_or("").to_string(),
                og_image: p["seo"]["openGraph"]["image"]["url"]
                    .as_str()
                    .filter(|u| !u.is_empty())
                    .map(String::from),
            })
            .collect();

        Ok(records)
    }

    /// Patch one page's slug and OG image. An absent image sends an empty
    /// image object — the host clears the field.
    pub fn update_page(
        &self,
        page_id: &str,
        slug: &str,
        og_image: Option<&str>,
    ) -> Result<(), ApiError> {
        let url = format!("{}/v2/pages/{}", self.api_base, page_id);
        let image = match og_image {
            Some(u) => serde_json::json!({ "url": u }),
            None => serde_json::json!({}),
        };
        let body = serde_json::json!({
            "slug": slug,
            "seo": { "openGraph": { "image": image } },
        });
        self.patch_json(&url, &body)?;
        Ok(())
    }

    /// Create one redirect rule. The host takes a rules array; each call
    /// sends exactly one rule.
    pub fn create_redirect(&self, site_id: &str, rule: &RedirectRule) -> Result<(), ApiError> {
        let url = format!("{}/v2/sites/{}/redirects", self.api_base, site_id);
        self.post_json(&url, &serde_json::json!({ "rules": [rule] }))?;
        Ok(())
    }

    // ── Internal helpers ────────────────────────────────────────────

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response, ApiError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response)
    }

    fn patch_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        let response = self
            .http
            .patch(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response)
    }

    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response)
    }

    /// Map non-success statuses onto the error taxonomy.
    fn check(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, ApiError> {
        let status = response.status().as_u16();
        if response.status().is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        match status {
            401 | 403 => Err(ApiError::Auth(status, body)),
            400 | 422 => Err(ApiError::Validation(body)),
            _ => Err(ApiError::Http(status, body)),
        }
    }
}

impl SiteApi for SiteClient {
    fn list_pages(&self, site_id: &str) -> Result<Vec<PageRecord>, ApiError> {
        SiteClient::list_pages(self, site_id)
    }

    fn update_page(
        &self,
        page_id: &str,
        slug: &str,
        og_image: Option<&str>,
    ) -> Result<(), ApiError> {
        SiteClient::update_page(self, page_id, slug, og_image)
    }

    fn create_redirect(&self, site_id: &str, rule: &RedirectRule) -> Result<(), ApiError> {
        SiteClient::create_redirect(self, site_id, rule)
    }
}

// ── Tests ───────────────────────────────────────────────────────────
