//! Submission planning: turn dirty rows into the ordered list of host
//! calls a submit pass will make.

use serde::Serialize;

use crate::model::PageRow;

/// Status code used for slug-change redirects.
pub const PERMANENT_REDIRECT: u16 = 301;

/// A server-side path mapping created when a slug changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectRule {
    pub from: String,
    pub to: String,
    pub status: u16,
}

impl RedirectRule {
    /// Build the rule for a slug change. Paths carry a leading slash.
    pub fn for_slug_change(old_slug: &str, new_slug: &str) -> Self {
        Self {
            from: format!("/{}", old_slug),
            to: format!("/{}", new_slug),
            status: PERMANENT_REDIRECT,
        }
    }
}

/// One dirty row's pending submission: the page update plus, when the slug
/// changed and redirects are enabled, the redirect to create after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedChange {
    pub page_id: String,
    pub name: String,
    pub old_slug: String,
    pub slug: String,
    pub og_image: Option<String>,
    pub redirect: Option<RedirectRule>,
}

/// Plan the submission for the current rows: dirty rows only, in row
/// order. A redirect is attached iff `create_redirects` is set and the
/// row's slug actually changed — re-confirmed rows and image-only edits
/// never produce one.
pub fn plan_changes(rows: &[PageRow], create_redirects: bool) -> Vec<PlannedChange> {
    rows.iter()
        .filter(|r| r.dirty)
        .map(|r| {
            let redirect = if create_redirects && r.slug_changed() {
                Some(RedirectRule::for_slug_change(&r.current_slug, &r.new_slug))
            } else {
                None
            };
            PlannedChange {
                page_id: r.id.clone(),
                name: r.name.clone(),
                old_slug: r.current_slug.clone(),
                slug: r.new_slug.clone(),
                og_image: r.new_og_image.clone(),
                redirect,
            }
        })
        .collect()
}
