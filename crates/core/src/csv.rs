//! CSV exchange format for page rows.
//!
//! Encode writes the five-column grid (`Name`, `Current Slug`, `New Slug`,
//! `Current OG Image`, `New OG Image`); decode reads back the three columns
//! an import can change. The decoder is deliberately tolerant rather than
//! strict RFC 4180: columns are located by case-insensitive header name,
//! missing columns degrade to absent fields, malformed rows never fail.

use crate::model::{ImportRecord, PageRow};

pub const CSV_HEADER: [&str; 5] = [
    "Name",
    "Current Slug",
    "New Slug",
    "Current OG Image",
    "New OG Image",
];

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

/// Encode rows in input order. Header line first, records joined with `\n`,
/// no trailing newline. `dirty` and `id` are not part of the projection.
pub fn encode_csv(rows: &[PageRow]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for row in rows {
        let fields = [
            row.name.as_str(),
            row.current_slug.as_str(),
            row.new_slug.as_str(),
            row.current_og_image.as_deref().unwrap_or(""),
            row.new_og_image.as_deref().unwrap_or(""),
        ];
        let line = fields.map(escape_field).join(",");
        lines.push(line);
    }

    lines.join("\n")
}

/// Quote a field iff it contains a comma, quote, or newline; internal
/// quotes are doubled. Anything else passes through verbatim.
fn escape_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

/// Decode CSV text into import records. Never fails: unknown columns are
/// ignored, missing columns yield absent fields, short rows degrade the
/// same way. Empty `New Slug`/`New OG Image` cells decode to `None`.
pub fn decode_csv(text: &str) -> Vec<ImportRecord> {
    let normalized = text.replace("\r\n", "\n");
    let mut records = split_records(&normalized);
    records.retain(|r| !r.is_empty());

    let mut lines = records.into_iter();
    let header_line = match lines.next() {
        Some(line) => line,
        None => return Vec::new(),
    };

    let header: Vec<String> = split_fields(&header_line)
        .iter()
        .map(|h| strip_wrapping_quotes(h.trim()).to_string())
        .collect();
    let position = |label: &str| header.iter().position(|h| h.eq_ignore_ascii_case(label));

    // Current Slug / Current OG Image columns are ignored even if present.
    let i_name = position("Name");
    let i_new_slug = position("New Slug");
    let i_new_og = position("New OG Image");

    lines
        .map(|line| {
            let cols: Vec<String> = split_fields(&line)
                .iter()
                .map(|c| strip_wrapping_quotes(c).to_string())
                .collect();
            let col = |idx: Option<usize>| idx.and_then(|i| cols.get(i)).cloned();

            ImportRecord {
                name: col(i_name).unwrap_or_default(),
                new_slug: col(i_new_slug).filter(|s| !s.is_empty()),
                new_og_image: col(i_new_og).filter(|s| !s.is_empty()),
            }
        })
        .collect()
}

/// Split text into records on `\n`, except inside an open quoted field —
/// embedded newlines must survive the round trip. Quote characters pass
/// through untouched; field-level unquoting happens in `split_fields`.
fn split_records(text: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;

    for ch in text.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                cur.push('"');
            }
            '\n' if !in_quotes => records.push(std::mem::take(&mut cur)),
            _ => cur.push(ch),
        }
    }
    records.push(cur);
    records
}

/// Quote-aware field splitter: `"` toggles the in-quotes state, `""` inside
/// quotes decodes to one literal quote, `,` outside quotes ends a field.
fn split_fields(record: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut chars = record.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    cur.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut cur)),
            _ => cur.push(ch),
        }
    }
    fields.push(cur);
    fields
}

/// Strip one wrapping quote pair if a split field still carries one
/// (unbalanced inputs can leave them). One pair, never recursive.
fn strip_wrapping_quotes(field: &str) -> &str {
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        &field[1..field.len() - 1]
    } else {
        field
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
