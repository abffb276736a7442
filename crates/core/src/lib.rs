//! `slugsheet-core` — Page-row engine for bulk slug/OG-image editing.
//!
//! Pure engine crate: builds editable rows from host page records, encodes
//! and decodes the CSV exchange format, merges imported records back into
//! rows, and plans the submission. No CLI, IO, or HTTP dependencies.

pub mod csv;
pub mod model;
pub mod plan;
pub mod reconcile;
pub mod session;

pub use csv::{decode_csv, encode_csv};
pub use model::{ImportRecord, PageRecord, PageRow, RowPatch};
pub use plan::{plan_changes, PlannedChange, RedirectRule, PERMANENT_REDIRECT};
pub use reconcile::{merge_import, normalize_name};
pub use session::Session;
