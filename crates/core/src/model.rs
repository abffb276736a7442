use serde::Serialize;

// ---------------------------------------------------------------------------
// Host input
// ---------------------------------------------------------------------------

/// One page as the host's page-listing API reports it.
///
/// `id` is the host's opaque stable identifier; this crate never generates
/// ids. An empty-string image URL from the host is normalized to `None`
/// before a record is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub og_image: Option<String>,
}

// ---------------------------------------------------------------------------
// Editable rows
// ---------------------------------------------------------------------------

/// One page's editable state.
///
/// `name` is the sole join key during CSV import and is not guaranteed
/// unique. `new_slug`/`new_og_image` start equal to their `current_*`
/// counterparts and hold the values submitted on save. `dirty` is monotonic
/// within a session: once set it is only cleared by a full reload.
///
/// Invariant: `new_og_image`/`current_og_image` are `None` or non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRow {
    pub id: String,
    pub name: String,
    pub current_slug: String,
    pub new_slug: String,
    pub current_og_image: Option<String>,
    pub new_og_image: Option<String>,
    pub dirty: bool,
}

impl PageRow {
    /// Build a fresh (clean) row from a host page record.
    pub fn from_record(page: PageRecord) -> Self {
        let og = normalize_og(page.og_image);
        Self {
            id: page.id,
            name: page.name,
            current_slug: page.slug.clone(),
            new_slug: page.slug,
            current_og_image: og.clone(),
            new_og_image: og,
            dirty: false,
        }
    }

    /// Whether the working slug differs from the committed one.
    pub fn slug_changed(&self) -> bool {
        self.new_slug != self.current_slug
    }
}

/// Collapse empty-string image URLs to `None`.
pub(crate) fn normalize_og(og: Option<String>) -> Option<String> {
    og.filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Import records
// ---------------------------------------------------------------------------

/// A CSV-derived partial update keyed by page name.
///
/// Absent fields mean "no change requested" for that field, never "clear
/// this field." The decoder also maps empty cells to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRecord {
    pub name: String,
    pub new_slug: Option<String>,
    pub new_og_image: Option<String>,
}

// ---------------------------------------------------------------------------
// Direct edits
// ---------------------------------------------------------------------------

/// A single-row edit: fields left `None` are untouched.
///
/// Unlike import merging, a direct edit is applied verbatim: an empty slug
/// stays empty, and `new_og_image: Some("")` clears the image.
#[derive(Debug, Clone, Default)]
pub struct RowPatch {
    pub new_slug: Option<String>,
    pub new_og_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: &str, name: &str, slug: &str, og: Option<&str>) -> PageRecord {
        PageRecord {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            og_image: og.map(String::from),
        }
    }

    #[test]
    fn from_record_defaults_working_values() {
        let row = PageRow::from_record(page("p1", "Home", "home", Some("http://x/a.png")));
        assert_eq!(row.new_slug, "home");
        assert_eq!(row.current_slug, "home");
        assert_eq!(row.new_og_image.as_deref(), Some("http://x/a.png"));
        assert!(!row.dirty);
        assert!(!row.slug_changed());
    }

    #[test]
    fn from_record_empty_og_becomes_none() {
        let row = PageRow::from_record(page("p1", "Home", "home", Some("")));
        assert_eq!(row.current_og_image, None);
        assert_eq!(row.new_og_image, None);
    }
}
