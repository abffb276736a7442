//! Import reconciliation: merge CSV-derived records into live rows by
//! case/whitespace-insensitive name matching.

use crate::model::{ImportRecord, PageRow};

/// Join-key normalization used on both sides of the match.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Merge imported records into rows, returning the next row collection.
///
/// For each row the **first** record with a matching normalized name is
/// consulted; later duplicates are ignored. A match forces `dirty` even
/// when no field changes value. Non-empty `new_slug` overwrites; a
/// `new_og_image` of length >= 1 (whitespace-only included) overwrites;
/// empty or absent fields leave the row's value untouched. Unmatched rows
/// pass through unchanged. Never fails.
pub fn merge_import(rows: &[PageRow], records: &[ImportRecord]) -> Vec<PageRow> {
    rows.iter()
        .map(|row| {
            let key = normalize_name(&row.name);
            let matched = records.iter().find(|rec| normalize_name(&rec.name) == key);

            let Some(rec) = matched else {
                return row.clone();
            };

            let mut next = row.clone();
            if let Some(slug) = &rec.new_slug {
                if !slug.is_empty() {
                    next.new_slug = slug.clone();
                }
            }
            if let Some(og) = &rec.new_og_image {
                if !og.is_empty() {
                    next.new_og_image = Some(og.clone());
                }
            }
            next.dirty = true;
            next
        })
        .collect()
}
