//! Site host API client — shared between the CLI commands.
//!
//! This crate is the single source of truth for the host wire contract:
//! list pages, patch a page's slug and OG image, create redirects.
//!
//! No retries. No concurrency. Progress output lives with the callers.

mod client;
mod error;
mod submit;

pub use client::{SiteApi, SiteClient, DEFAULT_PAGE_LIMIT, WEBFLOW_API_BASE};
pub use error::ApiError;
pub use submit::{execute_plan, ApplyError, ApplyOutcome};
