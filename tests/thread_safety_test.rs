//! Tests for formatting issues from several threads at once.

use std::sync::Arc;
use std::thread;

use issuetree::{format_issues, format_messages, FormattedIssues, Issue, Issues};

fn signup_issues(i: usize) -> Vec<Issue> {
    vec![
        Issue::new(format!("user {} is taken", i)).at(["username"]),
        Issue::new("passwords do not match"),
        Issue::new("must be a valid email").at(["contact", "email"]),
    ]
}

#[test]
fn test_concurrent_formatting_of_shared_issues() {
    let issues = Arc::new(signup_issues(0));
    let expected = format_issues(issues.iter());

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let issues = Arc::clone(&issues);
            thread::spawn(move || format_issues(issues.iter()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_concurrent_formatting_of_independent_issues() {
    let handles: Vec<_> = (0..10)
        .map(|i| {
            thread::spawn(move || {
                let tree = format_messages(&signup_issues(i));
                assert_eq!(
                    tree.field("username").unwrap().issues(),
                    &[format!("user {} is taken", i)]
                );
                assert_eq!(tree.issue_count(), 3);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_trees_move_between_threads() {
    let issues = Issues::from_vec(signup_issues(7)).unwrap();
    let tree: FormattedIssues = thread::spawn(move || format_issues(&issues))
        .join()
        .unwrap();

    let email = tree.field("contact").and_then(|c| c.field("email")).unwrap();
    assert_eq!(email.issues()[0].message, "must be a valid email");
}
