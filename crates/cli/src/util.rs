//! Shared CLI helpers: credential/site resolution, tolerant file reading,
//! display-width padding for the table output.

use std::path::Path;

use unicode_width::UnicodeWidthStr;

use slugsheet_config::Settings;

use crate::exit_codes;
use crate::CliError;

/// Environment variable consulted when `--token` is absent.
pub(crate) const TOKEN_ENV: &str = "WEBFLOW_API_TOKEN";

/// Resolve the API token: flag value > environment variable > error.
pub(crate) fn resolve_token(flag: Option<String>) -> Result<String, CliError> {
    resolve_token_from(flag, TOKEN_ENV)
}

pub(crate) fn resolve_token_from(
    flag: Option<String>,
    env_var: &str,
) -> Result<String, CliError> {
    if let Some(token) = flag {
        let trimmed = token.trim().to_string();
        if trimmed.is_empty() {
            return Err(missing_token(env_var));
        }
        return Ok(trimmed);
    }

    if let Ok(token) = std::env::var(env_var) {
        let trimmed = token.trim().to_string();
        if !trimmed.is_empty() {
            return Ok(trimmed);
        }
    }

    Err(missing_token(env_var))
}

fn missing_token(env_var: &str) -> CliError {
    CliError {
        code: exit_codes::EXIT_API_AUTH,
        message: format!("missing API token (use --token or set {})", env_var),
        hint: None,
    }
}

/// Resolve the target site: flag (or its env var, via clap) > settings > error.
pub(crate) fn resolve_site(
    flag: Option<String>,
    settings: &Settings,
) -> Result<String, CliError> {
    if let Some(site) = flag {
        let trimmed = site.trim().to_string();
        if !trimmed.is_empty() {
            return Ok(trimmed);
        }
    }

    if let Some(site) = &settings.site {
        let trimmed = site.trim().to_string();
        if !trimmed.is_empty() {
            return Ok(trimmed);
        }
    }

    Err(
        CliError::args("no site id given (use --site or configure a default)").with_hint(
            format!("set \"api.site\" in {}", Settings::config_path_display()),
        ),
    )
}

/// Read a file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub(crate) fn read_file_as_utf8(path: &Path) -> Result<String, CliError> {
    let bytes = std::fs::read(path)
        .map_err(|e| CliError::io(format!("cannot read {}: {}", path.display(), e)))?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Truncate a string to fit within `width` display columns, adding ".." if truncated.
/// Uses Unicode display width so CJK/emoji alignment stays correct.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    if width < 3 {
        for ch in s.chars() {
            let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
            if cw <= width {
                return ch.to_string();
            }
        }
        return String::new();
    }

    let str_width = UnicodeWidthStr::width(s);
    if str_width <= width {
        return s.to_string();
    }

    // Walk chars, accumulating display width, stop at width - 2 to leave room for ".."
    let budget = width - 2;
    let mut used = 0;
    let mut end_byte = 0;
    for (i, ch) in s.char_indices() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > budget {
            end_byte = i;
            break;
        }
        used += cw;
        end_byte = i + ch.len_utf8();
    }

    format!("{}..", &s[..end_byte])
}

/// Pad or truncate a string to exactly `width` display columns.
/// If shorter, right-pads with spaces. If longer, truncates with "..".
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let sw = UnicodeWidthStr::width(s);
    if sw > width {
        truncate_display(s, width)
    } else {
        format!("{}{}", s, " ".repeat(width - sw))
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn token_flag_wins_and_is_trimmed() {
        let token = resolve_token_from(Some("  tok_123  ".into()), "__SLUGSHEET_UNSET").unwrap();
        assert_eq!(token, "tok_123");
    }

    #[test]
    fn whitespace_only_flag_is_missing() {
        let err = resolve_token_from(Some("   ".into()), "__SLUGSHEET_UNSET").unwrap_err();
        assert_eq!(err.code, exit_codes::EXIT_API_AUTH);
        assert!(err.message.contains("missing API token"));
        assert!(err.message.contains("__SLUGSHEET_UNSET"));
    }

    #[test]
    fn no_flag_no_env_is_missing() {
        std::env::remove_var("__SLUGSHEET_TEST_TOKEN_MISSING");
        let err = resolve_token_from(None, "__SLUGSHEET_TEST_TOKEN_MISSING").unwrap_err();
        assert_eq!(err.code, exit_codes::EXIT_API_AUTH);
    }

    #[test]
    fn site_flag_beats_settings() {
        let settings = Settings {
            site: Some("site_cfg".into()),
            ..Settings::default()
        };
        let site = resolve_site(Some(" site_flag ".into()), &settings).unwrap();
        assert_eq!(site, "site_flag");
    }

    #[test]
    fn site_falls_back_to_settings() {
        let settings = Settings {
            site: Some("site_cfg".into()),
            ..Settings::default()
        };
        assert_eq!(resolve_site(None, &settings).unwrap(), "site_cfg");
        assert_eq!(
            resolve_site(Some("  ".into()), &settings).unwrap(),
            "site_cfg"
        );
    }

    #[test]
    fn site_missing_everywhere_is_usage_error() {
        let err = resolve_site(None, &Settings::default()).unwrap_err();
        assert_eq!(err.code, exit_codes::EXIT_USAGE);
        assert!(err.hint.is_some());
    }

    #[test]
    fn read_utf8_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all("Name,Slug\nCaf\u{e9},cafe\n".as_bytes()).unwrap();
        let content = read_file_as_utf8(f.path()).unwrap();
        assert!(content.contains("Caf\u{e9}"));
    }

    #[test]
    fn read_windows_1252_file() {
        // 0xE9 is é in Windows-1252 but invalid UTF-8
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"Caf\xe9,cafe\n").unwrap();
        let content = read_file_as_utf8(f.path()).unwrap();
        assert!(content.contains("Caf\u{e9}"));
    }

    #[test]
    fn read_missing_file_is_io_error() {
        let err = read_file_as_utf8(Path::new("/nonexistent/pages.csv")).unwrap_err();
        assert_eq!(err.code, exit_codes::EXIT_IO);
        assert!(err.message.contains("/nonexistent/pages.csv"));
    }

    #[test]
    fn pad_right_short_and_long() {
        assert_eq!(pad_right("ab", 5), "ab   ");
        assert_eq!(pad_right("abcde", 5), "abcde");
        assert_eq!(pad_right("abcdef", 5), "abc..");
    }

    #[test]
    fn truncate_cjk_boundary() {
        // Double-width chars must not be split mid-column
        let s = "\u{4e16}\u{754c}\u{4f60}\u{597d}";
        let t = truncate_display(s, 6);
        assert_eq!(t, "\u{4e16}\u{754c}..");
    }
}
