//! Tests for pushing build information to a mock Octopus server.

use httpmock::prelude::*;
use push_build_information::{
    BuildInformationCommit, BuildInformationRepository, CreateBuildInformationCommand,
    OctopusClient, OctopusError, OverwriteMode, PackageIdentity,
};
use serde_json::json;

fn command(packages: &[&str]) -> CreateBuildInformationCommand {
    CreateBuildInformationCommand {
        space_name: "Default".to_string(),
        build_environment: "GitHub Actions".to_string(),
        build_number: "42".to_string(),
        build_url: "https://github.com/octo/demo/actions/runs/9001".to_string(),
        branch: "main".to_string(),
        vcs_type: "Git".to_string(),
        vcs_root: "https://github.com/octo/demo".to_string(),
        vcs_commit_number: "abc123".to_string(),
        commits: vec![BuildInformationCommit {
            id: "abc123".to_string(),
            comment: "Fix the thing".to_string(),
        }],
        packages: packages
            .iter()
            .map(|id| PackageIdentity {
                id: (*id).to_string(),
                version: "1.0.0".to_string(),
            })
            .collect(),
    }
}

fn repository(server: &MockServer) -> BuildInformationRepository {
    BuildInformationRepository::new(
        OctopusClient::builder()
            .server_url(server.base_url())
            .api_key("API-TEST")
            .build()
            .unwrap(),
    )
}

async fn mock_spaces(server: &MockServer) -> httpmock::Mock<'_> {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/spaces");
            then.status(200)
                .json_body(json!({ "Items": [{ "Id": "Spaces-1", "Name": "Default" }] }));
        })
        .await
}

#[tokio::test]
async fn test_push_once_per_package() {
    let server = MockServer::start_async().await;
    mock_spaces(&server).await;

    let web = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/Spaces-1/build-information")
                .query_param("overwriteMode", "OverwriteExisting")
                .header("x-octopus-apikey", "API-TEST")
                .json_body(json!({
                    "PackageId": "Acme.Web",
                    "Version": "1.0.0",
                    "OctopusBuildInformation": {
                        "BuildEnvironment": "GitHub Actions",
                        "BuildNumber": "42",
                        "BuildUrl": "https://github.com/octo/demo/actions/runs/9001",
                        "Branch": "main",
                        "VcsType": "Git",
                        "VcsRoot": "https://github.com/octo/demo",
                        "VcsCommitNumber": "abc123",
                        "Commits": [{ "Id": "abc123", "Comment": "Fix the thing" }]
                    }
                }));
            then.status(201);
        })
        .await;
    let worker = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/Spaces-1/build-information")
                .json_body_partial(r#"{ "PackageId": "Acme.Worker", "Version": "1.0.0" }"#);
            then.status(201);
        })
        .await;

    repository(&server)
        .push(&command(&["Acme.Web", "Acme.Worker"]), OverwriteMode::OverwriteExisting)
        .await
        .unwrap();

    web.assert_async().await;
    worker.assert_async().await;
}

#[tokio::test]
async fn test_push_without_packages_contacts_nothing() {
    let server = MockServer::start_async().await;
    let spaces = mock_spaces(&server).await;
    let post = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/Spaces-1/build-information");
            then.status(201);
        })
        .await;

    repository(&server)
        .push(&command(&[]), OverwriteMode::FailIfExists)
        .await
        .unwrap();

    spaces.assert_hits_async(0).await;
    post.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_push_conflict_is_an_error() {
    let server = MockServer::start_async().await;
    mock_spaces(&server).await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/Spaces-1/build-information");
            then.status(400)
                .body(r#"{"ErrorMessage":"Build information already exists"}"#);
        })
        .await;

    let result = repository(&server)
        .push(&command(&["Acme.Web"]), OverwriteMode::FailIfExists)
        .await;

    match result {
        Err(OctopusError::Api { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("already exists"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_push_stops_at_first_failure() {
    let server = MockServer::start_async().await;
    mock_spaces(&server).await;
    let first = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/Spaces-1/build-information")
                .json_body_partial(r#"{ "PackageId": "Acme.Web" }"#);
            then.status(500);
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/Spaces-1/build-information")
                .json_body_partial(r#"{ "PackageId": "Acme.Worker" }"#);
            then.status(201);
        })
        .await;

    let result = repository(&server)
        .push(&command(&["Acme.Web", "Acme.Worker"]), OverwriteMode::FailIfExists)
        .await;

    assert!(matches!(result, Err(OctopusError::Api { status: 500, .. })));
    first.assert_async().await;
    second.assert_hits_async(0).await;
}

#[test]
fn test_command_serializes_like_the_api_client() {
    let value = serde_json::to_value(command(&["Acme.Web"])).unwrap();

    assert_eq!(value["spaceName"], "Default");
    assert_eq!(value["BuildEnvironment"], "GitHub Actions");
    assert_eq!(value["VcsType"], "Git");
    assert_eq!(value["Commits"][0]["Id"], "abc123");
    assert_eq!(value["Packages"][0]["Version"], "1.0.0");
}
