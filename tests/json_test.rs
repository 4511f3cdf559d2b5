//! Integration tests for the JSON boundary.

use issuetree::{
    format_issues, format_messages, issues_from_json, Issue, IssueParseError, IssuePath, ToJson,
    ISSUES_KEY,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_issues_from_json_preserves_order() {
    let issues = issues_from_json(&json!([
        { "message": "Error message 1", "path": ["foo"] },
        { "message": "Error message 2" },
        { "message": "Error message 3", "path": [] },
    ]))
    .unwrap();

    assert_eq!(
        issues,
        vec![
            Issue::new("Error message 1").at(["foo"]),
            Issue::new("Error message 2"),
            Issue::new("Error message 3").with_path(IssuePath::root()),
        ]
    );
}

#[test]
fn test_key_objects_and_indices() {
    let issue = Issue::from_json(&json!({
        "message": "too long",
        "path": [{ "key": "tags" }, 2, { "key": "label" }]
    }))
    .unwrap();

    assert_eq!(issue.path.unwrap().to_string(), "tags[2].label");
}

#[test]
fn test_json_in_tree_out() {
    let issues = issues_from_json(&json!([
        { "message": "required", "path": ["address", "street"] },
        { "message": "unknown city", "path": ["address", "city"] },
        { "message": "incomplete", "path": ["address"] },
        { "message": "form expired" },
    ]))
    .unwrap();

    assert_eq!(
        format_messages(&issues).to_json(),
        json!({
            "_issues": ["form expired"],
            "address": {
                "_issues": ["incomplete"],
                "street": { "_issues": ["required"] },
                "city": { "_issues": ["unknown city"] },
            },
        })
    );
}

#[test]
fn test_issue_json_round_trip_through_tree() {
    let source = json!([
        { "message": "a", "path": ["foo", 0] },
        { "message": "b" },
    ]);
    let issues = issues_from_json(&source).unwrap();
    let tree = format_issues(&issues);

    assert_eq!(tree.issues()[0].to_json(), source[1]);
    assert_eq!(
        tree.get(&"foo[0]".parse().unwrap()).unwrap().issues()[0].to_json(),
        source[0]
    );
}

#[test]
fn test_not_an_array() {
    assert_eq!(
        issues_from_json(&json!({ "message": "m" })).unwrap_err(),
        IssueParseError::NotAnArray
    );
}

#[test]
fn test_malformed_entries_still_format() {
    let issues = issues_from_json(&json!([
        { "message": "ok", "path": ["a"] },
        { "message": 1 },
        { "message": "p", "path": "a.b" },
        { "path": ["a", -1, true] },
    ]))
    .unwrap();

    assert_eq!(issues.len(), 4);
    assert_eq!(
        format_messages(&issues).to_json(),
        json!({
            "_issues": ["1", "p"],
            "a": {
                "_issues": ["ok"],
                "-1": { "_issues": [], "true": { "_issues": [""] } },
            },
        })
    );
}

#[test]
fn test_nested_error_source() {
    use std::error::Error;

    let err = issues_from_json(&json!([{ "message": "m" }, "not an issue"])).unwrap_err();
    let source = err.source().unwrap();
    assert_eq!(source.to_string(), "issue must be an object");
}

fn count_rendered_issues(value: &serde_json::Value) -> usize {
    value
        .as_object()
        .map(|obj| {
            obj.iter()
                .map(|(key, child)| match key.as_str() {
                    ISSUES_KEY => child.as_array().map_or(0, Vec::len),
                    _ => count_rendered_issues(child),
                })
                .sum()
        })
        .unwrap_or(0)
}

#[test]
fn test_reserved_field_name_loses_no_issues() {
    let issues = vec![
        Issue::new("shallow").at([ISSUES_KEY]),
        Issue::new("deep").at([ISSUES_KEY, "deep"]),
        Issue::new("form"),
    ];

    let tree = format_messages(&issues);
    let rendered = tree.to_json();

    assert_eq!(tree.issue_count(), 3);
    assert_eq!(count_rendered_issues(&rendered), 3);
    assert_eq!(
        rendered,
        json!({
            "_issues": ["form"],
            r"\_issues": { "_issues": ["shallow"], "deep": { "_issues": ["deep"] } },
        })
    );
}
