//! Submit loop: walk a plan in order, stop at the first host error.

use slugsheet_core::{PlannedChange, RedirectRule};

use crate::client::SiteApi;
use crate::error::ApiError;

/// Totals from a fully applied plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub pages_updated: usize,
    pub redirects_created: usize,
}

/// A submit pass that stopped early.
///
/// `completed` counts fully applied changes. The failed page's update may
/// already have landed when its redirect was what failed — the change
/// still does not count as completed.
#[derive(Debug)]
pub struct ApplyError {
    pub completed: usize,
    pub failed_page: String,
    pub source: ApiError,
}

impl std::fmt::Display for ApplyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed at \"{}\" after {} completed change(s): {}",
            self.failed_page, self.completed, self.source
        )
    }
}

impl std::error::Error for ApplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Apply a plan in row order, one change at a time: patch the page, then
/// create its redirect when one is planned. Stops at the first host
/// error — earlier changes stay applied, later ones are never attempted.
pub fn execute_plan(
    api: &dyn SiteApi,
    site_id: &str,
    plan: &[PlannedChange],
    progress: bool,
) -> Result<ApplyOutcome, ApplyError> {
    let mut outcome = ApplyOutcome::default();

    for (i, change) in plan.iter().enumerate() {
        if progress {
            eprintln!("{}", update_line(i + 1, plan.len(), change));
        }

        api.update_page(&change.page_id, &change.slug, change.og_image.as_deref())
            .map_err(|e| ApplyError {
                completed: i,
                failed_page: change.name.clone(),
                source: e,
            })?;
        outcome.pages_updated += 1;

        if let Some(rule) = &change.redirect {
            if progress {
                eprintln!("{}", redirect_line(rule));
            }
            api.create_redirect(site_id, rule).map_err(|e| ApplyError {
                completed: i,
                failed_page: change.name.clone(),
                source: e,
            })?;
            outcome.redirects_created += 1;
        }
    }

    Ok(outcome)
}

fn update_line(step: usize, total: usize, change: &PlannedChange) -> String {
    format!("  [{}/{}] {} -> /{}", step, total, change.name, change.slug)
}

fn redirect_line(rule: &RedirectRule) -> String {
    format!("        redirect {} -> {}", rule.from, rule.to)
}
