//! The submitting commands: `apply` (CSV import) and `set` (single row).
//!
//! Both follow the same shape: fetch the live rows, stage edits through a
//! session, plan, then either print the plan (`--dry-run`) or execute it
//! and report the outcome.

use std::path::PathBuf;

use slugsheet_client::{execute_plan, ApplyError};
use slugsheet_config::Settings;
use slugsheet_core::{decode_csv, plan_changes, PlannedChange, RowPatch, Session};

use crate::exit_codes::{EXIT_APPLY_PARTIAL, EXIT_ERROR};
use crate::util;
use crate::{api_error, site_client, CliError};

// ============================================================================
// apply
// ============================================================================

pub(crate) fn cmd_apply(
    file: PathBuf,
    site: Option<String>,
    token: Option<String>,
    dry_run: bool,
    redirects: bool,
    no_redirects: bool,
    json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    if !file.exists() {
        return Err(CliError::args(format!(
            "file not found: {}",
            file.display()
        )));
    }

    let settings = Settings::load();
    let token = util::resolve_token(token)?;
    let site = util::resolve_site(site, &settings)?;
    let create_redirects = resolve_redirects(redirects, no_redirects, &settings);

    let content = util::read_file_as_utf8(&file)?;
    let records = decode_csv(&content);

    let progress = !quiet && atty::is(atty::Stream::Stderr);

    // Step 1: fetch the live rows
    if progress {
        eprint!("Fetching pages... ");
    }
    let client = site_client(token, &settings);
    let pages = client.list_pages(&site).map_err(api_error)?;
    if progress {
        eprintln!("{} static page(s)", pages.len());
    }

    // Step 2: merge the file and plan
    let mut session = Session::new(pages);
    session.apply_import(&records);
    let plan = plan_changes(session.rows(), create_redirects);

    if plan.is_empty() {
        if json {
            println!(
                "{}",
                serde_json::json!({ "pages_updated": 0, "redirects_created": 0 })
            );
        } else {
            eprintln!(
                "Nothing to apply: no row in {} matched a page by name.",
                file.display()
            );
        }
        return Ok(());
    }

    if dry_run {
        return print_plan(&plan, json);
    }

    // Step 3: submit, stopping at the first failure
    if progress {
        eprintln!("Applying {} change(s)...", plan.len());
    }
    let outcome = execute_plan(&client, &site, &plan, progress)
        .map_err(|e| apply_failure(e, plan.len()))?;

    // Step 4: reload to confirm the committed state
    if progress {
        eprint!("Reloading... ");
    }
    match client.list_pages(&site) {
        Ok(pages) => {
            session.reload(pages);
            if progress {
                eprintln!("done ({} page(s) live)", session.rows().len());
            }
        }
        // The writes above already landed; a failed reload only loses the
        // confirmation.
        Err(e) => {
            if progress {
                eprintln!();
            }
            eprintln!("warning: reload failed: {}", e);
        }
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "pages_updated": outcome.pages_updated,
                "redirects_created": outcome.redirects_created,
            })
        );
    } else {
        eprintln!(
            "Applied {} page update(s), {} redirect(s).",
            outcome.pages_updated, outcome.redirects_created
        );
    }

    Ok(())
}

// ============================================================================
// set
// ============================================================================

pub(crate) fn cmd_set(
    page: String,
    site: Option<String>,
    token: Option<String>,
    slug: Option<String>,
    og_image: Option<String>,
    clear_og_image: bool,
    dry_run: bool,
) -> Result<(), CliError> {
    if slug.is_none() && og_image.is_none() && !clear_og_image {
        return Err(CliError::args("nothing to change")
            .with_hint("pass --slug, --og-image, or --clear-og-image"));
    }

    let settings = Settings::load();
    let token = util::resolve_token(token)?;
    let site = util::resolve_site(site, &settings)?;

    let client = site_client(token, &settings);
    let pages = client.list_pages(&site).map_err(api_error)?;

    let mut session = Session::new(pages);
    let target_id = session
        .find_by_id(&page)
        .or_else(|| session.find_by_name(&page))
        .map(|row| row.id.clone())
        .ok_or_else(|| CliError {
            code: EXIT_ERROR,
            message: format!("no page with id or name \"{}\" on this site", page),
            hint: Some("run `slugsheet pages` to list them".into()),
        })?;

    let patch = RowPatch {
        new_slug: slug,
        new_og_image: if clear_og_image {
            // An empty string clears the image downstream.
            Some(String::new())
        } else {
            og_image
        },
    };
    session.apply_edit(&target_id, patch);

    let plan = plan_changes(session.rows(), settings.auto_redirects);
    if dry_run {
        return print_plan(&plan, false);
    }

    let outcome = execute_plan(&client, &site, &plan, false)
        .map_err(|e| apply_failure(e, plan.len()))?;
    eprintln!(
        "Updated {} page(s), created {} redirect(s).",
        outcome.pages_updated, outcome.redirects_created
    );

    Ok(())
}

// ── Shared helpers ──────────────────────────────────────────────────

/// `--no-redirects` > `--redirects` > `redirects.auto` from settings.
fn resolve_redirects(redirects: bool, no_redirects: bool, settings: &Settings) -> bool {
    if no_redirects {
        false
    } else if redirects {
        true
    } else {
        settings.auto_redirects
    }
}

fn print_plan(plan: &[PlannedChange], json: bool) -> Result<(), CliError> {
    if json {
        let output =
            serde_json::to_string_pretty(plan).map_err(|e| CliError::io(e.to_string()))?;
        println!("{}", output);
        return Ok(());
    }

    println!("Planned change(s): {}", plan.len());
    for change in plan {
        println!(
            "  {}: /{} -> /{}  og: {}",
            change.name,
            change.old_slug,
            change.slug,
            change.og_image.as_deref().unwrap_or("-")
        );
        if let Some(rule) = &change.redirect {
            println!("    redirect {} -> {} ({})", rule.from, rule.to, rule.status);
        }
    }
    Ok(())
}

/// A failure before anything committed keeps its API exit code; once part
/// of the plan has landed the caller needs the partial-apply code, because
/// the site no longer matches either the file or the pre-apply state.
fn apply_failure(err: ApplyError, total: usize) -> CliError {
    if err.completed == 0 {
        return api_error(err.source);
    }
    CliError {
        code: EXIT_APPLY_PARTIAL,
        message: format!(
            "applied {} of {} change(s), then \"{}\" failed: {}",
            err.completed, total, err.failed_page, err.source
        ),
        hint: Some(
            "re-run `slugsheet export` to see the committed state, then fix and re-apply".into(),
        ),
    }
}

// ── Tests ───────────────────────────────────────────────────────────
