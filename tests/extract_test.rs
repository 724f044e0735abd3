//! End-to-end tests over the `.go` fixtures.

use std::path::PathBuf;

use insertgen::error::Error;
use insertgen::{extract_structs, generate_inserts, try_extract_structs};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_example_file() {
    let structs = extract_structs(fixture("example.go"));
    assert_eq!(structs.len(), 1);
    assert_eq!(structs[0].name, "User");
    assert_eq!(structs[0].fields, vec!["ID", "Name", "InvitationCode"]);

    let query = structs[0].to_query_builder();
    assert_eq!(query.table_name, "users");
    assert_eq!(query.fields, vec!["id", "name", "invitation_code"]);
    assert_eq!(
        generate_inserts(fixture("example.go")),
        vec!["INSERT INTO users (id, name, invitation_code) VALUES (:id, :name, :invitation_code)"]
    );
}

#[test]
fn test_models_file_in_declaration_order() {
    let inserts = generate_inserts(fixture("models.go"));
    assert_eq!(
        inserts,
        vec![
            "INSERT INTO bases (created_at, updated_at) VALUES (:created_at, :updated_at)",
            "INSERT INTO categories (id, title) VALUES (:id, :title)",
            "INSERT INTO review_posts (post_id, body, rating) VALUES (:post_id, :body, :rating)",
            "INSERT INTO post_counts (post_id, count) VALUES (:post_id, :count)",
            "INSERT INTO empties () VALUES ()",
            "INSERT INTO caches (entries, on_evict) VALUES (:entries, :on_evict)",
            "INSERT INTO hits (key, found) VALUES (:key, :found)",
        ]
    );
}

#[test]
fn test_column_count_matches_named_fields() {
    for decl in extract_structs(fixture("models.go")) {
        let query = decl.to_query_builder();
        assert_eq!(query.fields.len(), decl.fields.len());
        assert!(query.fields.iter().all(|f| !f.is_empty()));
    }
}

#[test]
fn test_file_without_structs() {
    assert!(extract_structs(fixture("no_structs.go")).is_empty());
    assert!(try_extract_structs(fixture("no_structs.go")).unwrap().is_empty());
}

#[test]
fn test_invalid_file_is_non_fatal() {
    assert!(extract_structs(fixture("invalid.go")).is_empty());
    assert!(generate_inserts(fixture("invalid.go")).is_empty());

    let err = try_extract_structs(fixture("invalid.go")).unwrap_err();
    assert!(err.is_parse_failure());
    assert!(matches!(err, Error::Syntax { .. }));
}

#[test]
fn test_missing_file_is_non_fatal() {
    let path = fixture("does_not_exist.go");
    assert!(extract_structs(&path).is_empty());

    let err = try_extract_structs(&path).unwrap_err();
    assert!(err.is_parse_failure());
    assert!(matches!(err, Error::Read { .. }));
}
