use slugsheet_core::{
    decode_csv, encode_csv, plan_changes, ImportRecord, PageRecord, RowPatch, Session,
};

fn site_pages() -> Vec<PageRecord> {
    vec![
        PageRecord {
            id: "pg_home".into(),
            name: "Home".into(),
            slug: "home".into(),
            og_image: Some("http://cdn.example/home.png".into()),
        },
        PageRecord {
            id: "pg_about".into(),
            name: "About, the Team".into(),
            slug: "about".into(),
            og_image: None,
        },
        PageRecord {
            id: "pg_contact".into(),
            name: "  Contact Us".into(),
            slug: "contact".into(),
            og_image: Some("http://cdn.example/contact.png".into()),
        },
    ]
}

// -------------------------------------------------------------------------
// Export → edit → import → plan
// -------------------------------------------------------------------------

#[test]
fn full_csv_round_trip_flow() {
    let mut session = Session::new(site_pages());

    // Exported grid carries every row, comma-bearing names quoted.
    let exported = encode_csv(session.rows());
    assert!(exported.starts_with("Name,Current Slug,New Slug,Current OG Image,New OG Image\n"));
    assert!(exported.contains("\"About, the Team\""));

    // Operator edits the file externally: new slug for About, new image
    // for Contact (name case differs), Home untouched.
    let edited = "\
Name,New Slug,New OG Image
\"About, the Team\",about-the-team,
contact us,,http://cdn.example/contact-v2.png";

    let records = decode_csv(edited);
    assert_eq!(records.len(), 2);

    session.apply_import(&records);

    let about = session.find_by_id("pg_about").unwrap();
    assert_eq!(about.new_slug, "about-the-team");
    assert!(about.dirty);

    let contact = session.find_by_id("pg_contact").unwrap();
    assert_eq!(contact.new_slug, "contact");
    assert_eq!(
        contact.new_og_image.as_deref(),
        Some("http://cdn.example/contact-v2.png")
    );
    assert!(contact.dirty);

    assert!(!session.find_by_id("pg_home").unwrap().dirty);

    // Plan: two dirty rows, one slug change, one redirect.
    let plan = plan_changes(session.rows(), true);
    assert_eq!(plan.len(), 2);
    assert_eq!(plan[0].page_id, "pg_about");
    let rule = plan[0].redirect.as_ref().unwrap();
    assert_eq!(rule.from, "/about");
    assert_eq!(rule.to, "/about-the-team");
    assert!(plan[1].redirect.is_none());
}

#[test]
fn direct_edit_then_reload_clears_everything() {
    let mut session = Session::new(site_pages());

    session.apply_edit(
        "pg_home",
        RowPatch {
            new_slug: Some("landing".into()),
            new_og_image: None,
        },
    );
    assert_eq!(plan_changes(session.rows(), true).len(), 1);

    // A successful submit cycle ends in a reload from the host.
    session.reload(site_pages());
    assert!(session.dirty_rows().is_empty());
    assert!(plan_changes(session.rows(), true).is_empty());
    assert_eq!(session.find_by_id("pg_home").unwrap().new_slug, "home");
}

#[test]
fn import_of_unrelated_file_changes_nothing() {
    let mut session = Session::new(site_pages());
    let before = session.rows().to_vec();

    let records = vec![ImportRecord {
        name: "No Such Page".into(),
        new_slug: Some("nope".into()),
        new_og_image: None,
    }];
    session.apply_import(&records);

    assert_eq!(session.rows(), &before[..]);
}

#[test]
fn exported_file_reimports_as_identity_plus_dirty() {
    // Re-importing an untouched export changes no values but marks every
    // row dirty: matching alone dirties.
    let mut session = Session::new(site_pages());
    let exported = encode_csv(session.rows());

    let records = decode_csv(&exported);
    assert_eq!(records.len(), 3);
    session.apply_import(&records);

    for (row, page) in session.rows().iter().zip(site_pages()) {
        assert_eq!(row.new_slug, page.slug);
        assert!(row.dirty);
    }
}
