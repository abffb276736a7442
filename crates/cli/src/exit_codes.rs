//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                              |
//! |---------|-----------|------------------------------------------|
//! | 0       | Universal | Success                                  |
//! | 1       | Universal | General error (unspecified)              |
//! | 2       | Universal | CLI usage error (bad args, missing flag) |
//! | 3       | Universal | File I/O error                           |
//! | 10-19   | api       | Host API codes                           |
//! | 20-29   | apply     | Submission codes                         |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use slugsheet_client::ApiError;

// =============================================================================
// Universal (0-3)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// File I/O error - cannot read or write a local file.
pub const EXIT_IO: u8 = 3;

// =============================================================================
// Host API (10-19)
// =============================================================================

/// Authentication rejected (401/403) or no token given.
pub const EXIT_API_AUTH: u8 = 10;

/// Network failure - DNS, connect, timeout.
pub const EXIT_API_NETWORK: u8 = 11;

/// Upstream HTTP error outside the mapped classes (5xx, 404, ...).
pub const EXIT_API_UPSTREAM: u8 = 12;

/// Response body did not parse as the expected JSON shape.
pub const EXIT_API_PARSE: u8 = 13;

/// Host rejected the payload (400/422), e.g. a slug collision.
pub const EXIT_API_VALIDATION: u8 = 14;

// =============================================================================
// Apply (20-29)
// =============================================================================

/// Submission stopped mid-plan: some pages committed, the rest were not.
pub const EXIT_APPLY_PARTIAL: u8 = 20;

/// Map an API error to its registry code.
pub fn api_exit_code(err: &ApiError) -> u8 {
    match err {
        ApiError::Auth(..) => EXIT_API_AUTH,
        ApiError::Network(..) => EXIT_API_NETWORK,
        ApiError::Http(..) => EXIT_API_UPSTREAM,
        ApiError::Parse(..) => EXIT_API_PARSE,
        ApiError::Validation(..) => EXIT_API_VALIDATION,
    }
}
