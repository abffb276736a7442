//! Session state: the owned row collection and its command handlers.
//!
//! All transitions are explicit — `apply_edit`, `apply_import`, `reload` —
//! each replacing state rather than mutating rows behind the caller's back.
//! `reload` is the only way a dirty flag ever clears.

use crate::model::{normalize_og, ImportRecord, PageRecord, PageRow, RowPatch};
use crate::reconcile::{merge_import, normalize_name};

/// An editing session over one site's non-collection pages.
#[derive(Debug, Clone, Default)]
pub struct Session {
    rows: Vec<PageRow>,
}

impl Session {
    /// Build a fresh session; every row starts clean with working values
    /// equal to committed ones.
    pub fn new(pages: Vec<PageRecord>) -> Self {
        Self {
            rows: pages.into_iter().map(PageRow::from_record).collect(),
        }
    }

    pub fn rows(&self) -> &[PageRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows for display; with `only_changed` set, dirty rows only.
    pub fn visible_rows(&self, only_changed: bool) -> Vec<&PageRow> {
        self.rows
            .iter()
            .filter(|r| !only_changed || r.dirty)
            .collect()
    }

    /// Rows to submit.
    pub fn dirty_rows(&self) -> Vec<&PageRow> {
        self.rows.iter().filter(|r| r.dirty).collect()
    }

    /// Patch one row by id. Any patch dirties the row, even when the new
    /// value equals the old one. Returns false when no row has that id.
    pub fn apply_edit(&mut self, id: &str, patch: RowPatch) -> bool {
        let Some(row) = self.rows.iter_mut().find(|r| r.id == id) else {
            return false;
        };

        if let Some(slug) = patch.new_slug {
            row.new_slug = slug;
        }
        if let Some(og) = patch.new_og_image {
            // An explicit empty string clears the image.
            row.new_og_image = normalize_og(Some(og));
        }
        row.dirty = true;
        true
    }

    /// Merge imported records into the collection (see `merge_import`).
    pub fn apply_import(&mut self, records: &[ImportRecord]) {
        self.rows = merge_import(&self.rows, records);
    }

    /// Full replacement from the host; resets working values and clears
    /// every dirty flag.
    pub fn reload(&mut self, pages: Vec<PageRecord>) {
        self.rows = pages.into_iter().map(PageRow::from_record).collect();
    }

    pub fn find_by_id(&self, id: &str) -> Option<&PageRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// First row whose normalized name matches, in row order.
    pub fn find_by_name(&self, name: &str) -> Option<&PageRow> {
        let key = normalize_name(name);
        self.rows.iter().find(|r| normalize_name(&r.name) == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages() -> Vec<PageRecord> {
        vec![
            PageRecord {
                id: "p1".into(),
                name: "Home".into(),
                slug: "home".into(),
                og_image: Some("http://x/home.png".into()),
            },
            PageRecord {
                id: "p2".into(),
                name: "About".into(),
                slug: "about".into(),
                og_image: None,
            },
        ]
    }

    #[test]
    fn new_session_is_clean() {
        let session = Session::new(pages());
        assert_eq!(session.rows().len(), 2);
        assert!(session.dirty_rows().is_empty());
        assert_eq!(session.visible_rows(true).len(), 0);
        assert_eq!(session.visible_rows(false).len(), 2);
    }

    #[test]
    fn empty_session_reports_empty() {
        assert!(Session::default().is_empty());
        assert!(!Session::new(pages()).is_empty());
    }

    #[test]
    fn edit_marks_dirty_even_without_value_change() {
        let mut session = Session::new(pages());
        let patched = session.apply_edit(
            "p1",
            RowPatch {
                new_slug: Some("home".into()),
                new_og_image: None,
            },
        );
        assert!(patched);
        assert!(session.find_by_id("p1").unwrap().dirty);
        assert_eq!(session.find_by_id("p1").unwrap().new_slug, "home");
    }

    #[test]
    fn empty_slug_patch_applies_verbatim_unlike_merge() {
        let mut session = Session::new(pages());

        // Import merging refuses empty slugs...
        session.apply_import(&[ImportRecord {
            name: "About".into(),
            new_slug: Some(String::new()),
            new_og_image: None,
        }]);
        assert_eq!(session.find_by_id("p2").unwrap().new_slug, "about");

        // ...but a direct edit is taken as given.
        session.apply_edit(
            "p2",
            RowPatch {
                new_slug: Some(String::new()),
                new_og_image: None,
            },
        );
        let row = session.find_by_id("p2").unwrap();
        assert_eq!(row.new_slug, "");
        assert!(row.dirty);
    }

    #[test]
    fn edit_with_empty_og_clears_it() {
        let mut session = Session::new(pages());
        session.apply_edit(
            "p1",
            RowPatch {
                new_slug: None,
                new_og_image: Some(String::new()),
            },
        );
        let row = session.find_by_id("p1").unwrap();
        assert_eq!(row.new_og_image, None);
        assert_eq!(row.current_og_image.as_deref(), Some("http://x/home.png"));
    }

    #[test]
    fn edit_unknown_id_is_noop() {
        let mut session = Session::new(pages());
        let patched = session.apply_edit("missing", RowPatch::default());
        assert!(!patched);
        assert!(session.dirty_rows().is_empty());
    }

    #[test]
    fn dirty_survives_later_operations_until_reload() {
        let mut session = Session::new(pages());
        session.apply_edit(
            "p2",
            RowPatch {
                new_slug: Some("about-us".into()),
                new_og_image: None,
            },
        );
        assert_eq!(session.dirty_rows().len(), 1);

        // An import that does not touch p2 leaves its dirty flag alone.
        session.apply_import(&[ImportRecord {
            name: "Home".into(),
            new_slug: Some("landing".into()),
            new_og_image: None,
        }]);
        assert_eq!(session.dirty_rows().len(), 2);
        assert_eq!(session.find_by_id("p2").unwrap().new_slug, "about-us");

        session.reload(pages());
        assert!(session.dirty_rows().is_empty());
        assert_eq!(session.find_by_id("p1").unwrap().new_slug, "home");
    }

    #[test]
    fn find_by_name_first_match_in_row_order() {
        let mut all = pages();
        all.push(PageRecord {
            id: "p3".into(),
            name: "  HOME ".into(),
            slug: "home-2".into(),
            og_image: None,
        });
        let session = Session::new(all);
        assert_eq!(session.find_by_name("home").unwrap().id, "p1");
        assert_eq!(session.find_by_name(" ABOUT ").unwrap().id, "p2");
        assert!(session.find_by_name("missing").is_none());
    }
}
