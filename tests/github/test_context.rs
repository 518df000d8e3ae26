//! Tests for loading the GitHub Actions context.

use push_build_information::{GitHubContext, GitHubError, runner_debug};
use std::collections::HashMap;
use std::io::Write;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

const BASE_VARS: &[(&str, &str)] = &[
    ("GITHUB_SERVER_URL", "https://github.com"),
    ("GITHUB_REPOSITORY", "octo/demo"),
    ("GITHUB_SHA", "abc123"),
    ("GITHUB_REF", "refs/heads/main"),
    ("GITHUB_RUN_NUMBER", "42"),
    ("GITHUB_RUN_ID", "9001"),
];

#[test]
fn test_context_from_lookup() {
    let context = GitHubContext::from_lookup(lookup(BASE_VARS)).unwrap();

    assert_eq!(context.server_url, "https://github.com");
    assert_eq!(context.owner, "octo");
    assert_eq!(context.repo, "demo");
    assert_eq!(context.sha, "abc123");
    assert_eq!(context.git_ref, "refs/heads/main");
    assert_eq!(context.run_number, 42);
    assert_eq!(context.run_id, 9001);
    assert!(context.push_event.is_none());
    assert!(!context.debug);
}

#[test]
fn test_context_urls() {
    let context = GitHubContext::from_lookup(lookup(BASE_VARS)).unwrap();

    assert_eq!(context.repository_url(), "https://github.com/octo/demo");
    assert_eq!(
        context.run_url(9001),
        "https://github.com/octo/demo/actions/runs/9001"
    );
}

#[test]
fn test_context_defaults_server_and_trims_slash() {
    let context = GitHubContext::from_lookup(lookup(&[("GITHUB_REPOSITORY", "octo/demo")])).unwrap();
    assert_eq!(context.server_url, "https://github.com");
    assert_eq!(context.run_number, 0);

    let context = GitHubContext::from_lookup(lookup(&[
        ("GITHUB_SERVER_URL", "https://ghe.example.com/"),
        ("GITHUB_REPOSITORY", "octo/demo"),
    ]))
    .unwrap();
    assert_eq!(context.repository_url(), "https://ghe.example.com/octo/demo");
}

#[test]
fn test_context_debug_flag() {
    let mut vars = BASE_VARS.to_vec();
    vars.push(("RUNNER_DEBUG", "1"));
    let context = GitHubContext::from_lookup(lookup(&vars)).unwrap();
    assert!(context.debug);
}

#[test]
fn test_runner_debug_needs_exactly_one() {
    assert!(runner_debug(lookup(&[("RUNNER_DEBUG", "1")])));
    assert!(runner_debug(lookup(&[("RUNNER_DEBUG", " 1 ")])));
    assert!(!runner_debug(lookup(&[("RUNNER_DEBUG", "0")])));
    assert!(!runner_debug(lookup(&[("RUNNER_DEBUG", "true")])));
    assert!(!runner_debug(lookup(&[])));
}

#[test]
fn test_runner_debug_is_readable_without_repository() {
    // Logging is configured before the rest of the context loads.
    let vars = [("RUNNER_DEBUG", "1"), ("GITHUB_REPOSITORY", "just-a-name")];
    assert!(runner_debug(lookup(&vars)));
    assert!(GitHubContext::from_lookup(lookup(&vars)).is_err());
}

#[test]
fn test_context_rejects_malformed_repository() {
    let result = GitHubContext::from_lookup(lookup(&[("GITHUB_REPOSITORY", "just-a-name")]));
    assert!(matches!(result, Err(GitHubError::InvalidInput(_))));
}

#[test]
fn test_context_rejects_malformed_run_number() {
    let mut vars = BASE_VARS.to_vec();
    vars.retain(|(k, _)| *k != "GITHUB_RUN_NUMBER");
    vars.push(("GITHUB_RUN_NUMBER", "forty-two"));
    let result = GitHubContext::from_lookup(lookup(&vars));
    assert!(matches!(result, Err(GitHubError::InvalidInput(_))));
}

#[test]
fn test_context_reads_push_event_payload() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"ref":"refs/heads/main","commits":[{{"id":"a","message":"m1"}},{{"id":"b","message":"m2"}}]}}"#
    )
    .unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let mut vars = BASE_VARS.to_vec();
    vars.push(("GITHUB_EVENT_PATH", path.as_str()));
    let context = GitHubContext::from_lookup(lookup(&vars)).unwrap();

    let ids: Vec<_> = context.push_commits().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
}

#[test]
fn test_context_ignores_missing_event_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("event.json");
    let path = path.to_str().unwrap().to_string();

    let mut vars = BASE_VARS.to_vec();
    vars.push(("GITHUB_EVENT_PATH", path.as_str()));
    let context = GitHubContext::from_lookup(lookup(&vars)).unwrap();

    assert!(context.push_event.is_none());
    assert!(context.push_commits().is_empty());
}
