//! Tests for branch ref normalization.

use push_build_information::normalize_branch;

#[test]
fn test_strips_heads_prefix() {
    assert_eq!(normalize_branch("refs/heads/main"), "main");
    assert_eq!(normalize_branch("refs/heads/feature/login"), "feature/login");
}

#[test]
fn test_strips_prefix_only_once() {
    assert_eq!(normalize_branch("refs/heads/refs/heads/x"), "refs/heads/x");
}

#[test]
fn test_other_values_pass_through() {
    assert_eq!(normalize_branch("main"), "main");
    assert_eq!(normalize_branch("refs/tags/v1.0.0"), "refs/tags/v1.0.0");
    assert_eq!(normalize_branch("refs/pull/7/merge"), "refs/pull/7/merge");
    assert_eq!(normalize_branch("xrefs/heads/main"), "xrefs/heads/main");
    assert_eq!(normalize_branch(""), "");
}
