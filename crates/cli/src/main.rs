// Slugsheet CLI - bulk slug and OG-image editing for hosted sites

mod apply;
mod exit_codes;
mod util;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use slugsheet_client::{ApiError, SiteClient};
use slugsheet_config::Settings;
use slugsheet_core::{encode_csv, Session};

// Re-export exit codes from registry (single source of truth)
use exit_codes::{api_exit_code, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "slugsheet")]
#[command(about = "Bulk slug and Open Graph image editor for hosted sites")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List a site's static pages with their slug and OG image
    #[command(after_help = "\
Examples:
  slugsheet pages --site 64f0c1a2b3d4e5f6a7b8c9d0
  slugsheet pages --site 64f0c1a2b3d4e5f6a7b8c9d0 --json | jq -r '.[].new_slug'")]
    Pages {
        /// Site id (falls back to the configured default)
        #[arg(long, env = "WEBFLOW_SITE_ID")]
        site: Option<String>,

        /// API token (falls back to WEBFLOW_API_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Machine-readable output
        #[arg(long)]
        json: bool,

        /// Only rows with staged changes. A fresh fetch has none; this
        /// exists for parity with `apply --dry-run` scripting.
        #[arg(long)]
        changed_only: bool,
    },

    /// Export pages to an editable CSV
    #[command(after_help = "\
Examples:
  slugsheet export --site 64f0c1a2b3d4e5f6a7b8c9d0
  slugsheet export --site 64f0c1a2b3d4e5f6a7b8c9d0 -o pages.csv
  slugsheet export --site 64f0c1a2b3d4e5f6a7b8c9d0 -o - | head -3")]
    Export {
        /// Site id (falls back to the configured default)
        #[arg(long, env = "WEBFLOW_SITE_ID")]
        site: Option<String>,

        /// API token (falls back to WEBFLOW_API_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Output file ("-" for stdout)
        #[arg(long, short = 'o', default_value = "pages-slug-og.csv")]
        output: PathBuf,
    },

    /// Merge an edited CSV back into the live pages and submit the changes
    #[command(after_help = "\
Examples:
  slugsheet apply pages.csv --site 64f0c1a2b3d4e5f6a7b8c9d0 --dry-run
  slugsheet apply pages.csv --site 64f0c1a2b3d4e5f6a7b8c9d0
  slugsheet apply pages.csv --site 64f0c1a2b3d4e5f6a7b8c9d0 --no-redirects")]
    Apply {
        /// Edited CSV (rows are matched to pages by the Name column)
        file: PathBuf,

        /// Site id (falls back to the configured default)
        #[arg(long, env = "WEBFLOW_SITE_ID")]
        site: Option<String>,

        /// API token (falls back to WEBFLOW_API_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Print the plan and exit without touching the site
        #[arg(long)]
        dry_run: bool,

        /// Create 301 redirects for slug changes (overrides settings)
        #[arg(long, conflicts_with = "no_redirects")]
        redirects: bool,

        /// Never create redirects (overrides settings)
        #[arg(long)]
        no_redirects: bool,

        /// Machine-readable output
        #[arg(long)]
        json: bool,

        /// Suppress stderr progress
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Edit one page's slug or OG image, by page id or name
    #[command(after_help = "\
Examples:
  slugsheet set about --site 64f0c1a2b3d4e5f6a7b8c9d0 --slug about-us
  slugsheet set \"About the Team\" --site 64f0c1a2b3d4e5f6a7b8c9d0 --og-image https://cdn.example.com/team.png
  slugsheet set about --site 64f0c1a2b3d4e5f6a7b8c9d0 --clear-og-image --dry-run")]
    Set {
        /// Page id, or page name (first case-insensitive match)
        page: String,

        /// Site id (falls back to the configured default)
        #[arg(long, env = "WEBFLOW_SITE_ID")]
        site: Option<String>,

        /// API token (falls back to WEBFLOW_API_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// New slug
        #[arg(long)]
        slug: Option<String>,

        /// New OG image URL
        #[arg(long, conflicts_with = "clear_og_image")]
        og_image: Option<String>,

        /// Remove the custom OG image
        #[arg(long)]
        clear_og_image: bool,

        /// Print the plan and exit without touching the site
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: slugsheet <command> [options]");
            eprintln!("       slugsheet --help for more information");
            Ok(())
        }
        Some(Commands::Pages {
            site,
            token,
            json,
            changed_only,
        }) => cmd_pages(site, token, json, changed_only),
        Some(Commands::Export {
            site,
            token,
            output,
        }) => cmd_export(site, token, output),
        Some(Commands::Apply {
            file,
            site,
            token,
            dry_run,
            redirects,
            no_redirects,
            json,
            quiet,
        }) => apply::cmd_apply(
            file, site, token, dry_run, redirects, no_redirects, json, quiet,
        ),
        Some(Commands::Set {
            page,
            site,
            token,
            slug,
            og_image,
            clear_og_image,
            dry_run,
        }) => apply::cmd_set(page, site, token, slug, og_image, clear_og_image, dry_run),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError {
            code,
            message,
            hint,
        }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_IO,
            message: msg.into(),
            hint: None,
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Map an API error onto the registry code, with a recovery hint where
/// one exists.
pub fn api_error(err: ApiError) -> CliError {
    let hint = match &err {
        ApiError::Auth(..) => {
            Some("check --token or the WEBFLOW_API_TOKEN environment variable".to_string())
        }
        ApiError::Network(_) => {
            Some("check connectivity and the \"api.base\" setting".to_string())
        }
        ApiError::Validation(_) => {
            Some("the host rejected a value; look for slug collisions or invalid characters".to_string())
        }
        _ => None,
    };
    CliError {
        code: api_exit_code(&err),
        message: err.to_string(),
        hint,
    }
}

fn site_client(token: String, settings: &Settings) -> SiteClient {
    SiteClient::with_base_url(token, settings.api_base.clone())
        .with_page_limit(settings.page_limit)
}

// ============================================================================
// pages
// ============================================================================

const NAME_COL: usize = 28;
const SLUG_COL: usize = 24;

fn cmd_pages(
    site: Option<String>,
    token: Option<String>,
    json: bool,
    changed_only: bool,
) -> Result<(), CliError> {
    let settings = Settings::load();
    let token = util::resolve_token(token)?;
    let site = util::resolve_site(site, &settings)?;

    let client = site_client(token, &settings);
    let pages = client.list_pages(&site).map_err(api_error)?;

    let session = Session::new(pages);
    let rows = session.visible_rows(changed_only);

    if json {
        let output = serde_json::to_string_pretty(&rows)
            .map_err(|e| CliError::io(e.to_string()))?;
        println!("{}", output);
        return Ok(());
    }

    if rows.is_empty() {
        // An empty filter result on a non-empty site means nothing is staged.
        if session.is_empty() {
            eprintln!("No static pages found.");
        } else {
            eprintln!("No rows with staged changes.");
        }
        return Ok(());
    }

    // Table format
    println!(
        "{} {} {}",
        util::pad_right("NAME", NAME_COL),
        util::pad_right("SLUG", SLUG_COL),
        "OG IMAGE"
    );
    println!("{}", "-".repeat(72));

    for row in &rows {
        println!(
            "{} {} {}",
            util::pad_right(&row.name, NAME_COL),
            util::pad_right(&format!("/{}", row.new_slug), SLUG_COL),
            row.new_og_image.as_deref().unwrap_or("-")
        );
    }

    eprintln!();
    eprintln!("{} page(s)", rows.len());

    Ok(())
}

// ============================================================================
// export
// ============================================================================

fn cmd_export(
    site: Option<String>,
    token: Option<String>,
    output: PathBuf,
) -> Result<(), CliError> {
    let settings = Settings::load();
    let token = util::resolve_token(token)?;
    let site = util::resolve_site(site, &settings)?;

    let client = site_client(token, &settings);
    let pages = client.list_pages(&site).map_err(api_error)?;

    let session = Session::new(pages);
    let csv = encode_csv(session.rows());

    if output.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(csv.as_bytes())
            .map_err(|e| CliError::io(e.to_string()))?;
    } else {
        std::fs::write(&output, &csv).map_err(|e| {
            CliError::io(format!("cannot write {}: {}", output.display(), e))
        })?;
        eprintln!(
            "Wrote {} row(s) to {}",
            session.rows().len(),
            output.display()
        );
    }

    Ok(())
}
