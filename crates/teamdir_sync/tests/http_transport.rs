//! HTTP transport tests against a local mock server.

use serde_json::{json, Value};
use std::time::Duration;
use teamdir_core::{decode_content, encode_content, Member};
use teamdir_sync::{
    AccessToken, ContentsTransport, GithubContentsClient, LocalConfig, LocalEndpointClient,
    LocalTransport, MemberStore, ReadResponse, RemoteConfig, RemoteStore, RetryConfig, SyncError,
    SyncState, SyncTracker, WriteRequest, WriteResponse,
};
use teamdir_testkit::sample_members;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FILE: &str = "/repos/acme/people/contents/data/employees.json";

fn client(server: &MockServer) -> GithubContentsClient {
    let config = RemoteConfig::new("acme", "people", AccessToken::new("test-token"))
        .with_api_base(server.uri());
    GithubContentsClient::new(config).unwrap()
}

fn remote_store(server: &MockServer) -> RemoteStore<GithubContentsClient> {
    RemoteStore::new(
        client(server),
        RetryConfig::default().with_base_delay(Duration::from_millis(1)),
    )
}

fn contents_body(sha: &str, members: &[Member]) -> Value {
    let content = encode_content(members).unwrap();
    // the API wraps base64 at 60 columns
    let wrapped: Vec<String> = content
        .as_bytes()
        .chunks(60)
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .collect();
    json!({ "sha": sha, "content": wrapped.join("\n"), "encoding": "base64" })
}

#[tokio::test]
async fn read_sends_headers_and_ref() {
    let members = sample_members();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILE))
        .and(query_param("ref", "main"))
        .and(header("Authorization", "token test-token"))
        .and(header("Accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contents_body("abc", &members)))
        .expect(1)
        .mount(&server)
        .await;

    match client(&server).read().await.unwrap() {
        ReadResponse::Found(file) => {
            assert_eq!(file.sha, "abc");
            assert_eq!(decode_content(&file.content).unwrap(), members);
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test]
async fn read_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILE))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    assert_eq!(client(&server).read().await.unwrap(), ReadResponse::NotFound);
}

#[tokio::test]
async fn read_failure_carries_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILE))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Bad credentials"})),
        )
        .mount(&server)
        .await;

    let store = remote_store(&server);
    let tracker = SyncTracker::new();
    let err = store.load(&tracker).await.unwrap_err();
    assert_eq!(err.to_string(), "GitHub API Error (401): Bad credentials");
    assert_eq!(tracker.state(), SyncState::Error);
}

#[tokio::test]
async fn read_failure_without_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILE))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    assert_eq!(
        client(&server).read().await.unwrap(),
        ReadResponse::Failed {
            status: 500,
            message: "Unknown error".into()
        }
    );
}

#[tokio::test]
async fn write_body_and_statuses() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(FILE))
        .and(header("Authorization", "token test-token"))
        .and(body_partial_json(json!({"branch": "main", "sha": "abc"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(FILE))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"message": "sha does not match"})),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let request = WriteRequest {
        message: "Internal Update - now".into(),
        content: "W10=".into(),
        sha: Some("abc".into()),
    };
    assert_eq!(client.write(&request).await.unwrap(), WriteResponse::Written);
    assert_eq!(
        client.write(&request).await.unwrap(),
        WriteResponse::Conflict {
            message: "sha does not match".into()
        }
    );
}

#[tokio::test]
async fn new_file_write_omits_sha() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILE))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(FILE))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let members = sample_members();
    let store = remote_store(&server);
    let tracker = SyncTracker::new();
    store.save(&members, &tracker).await.unwrap();
    assert_eq!(tracker.state(), SyncState::Success);

    let requests = server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .unwrap();
    let body: Value = serde_json::from_slice(&put.body).unwrap();
    assert!(body.get("sha").is_none());
    assert_eq!(body["branch"], "main");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Internal Update - "));
    let content = body["content"].as_str().unwrap();
    assert_eq!(decode_content(content).unwrap(), members);
}

#[tokio::test]
async fn conflicts_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILE))
        .respond_with(ResponseTemplate::new(200).set_body_json(contents_body("abc", &sample_members())))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(FILE))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"message": "stale"})))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(FILE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let store = remote_store(&server);
    let tracker = SyncTracker::new();
    store.save(&sample_members(), &tracker).await.unwrap();

    let status = tracker.snapshot();
    assert_eq!(status.state, SyncState::Success);
    assert!(status.error_message.is_none());

    let requests = server.received_requests().await.unwrap();
    let puts = requests.iter().filter(|r| r.method.as_str() == "PUT").count();
    assert_eq!(puts, 3);
}

#[tokio::test]
async fn terminal_write_failure_stops_after_one_put() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILE))
        .respond_with(ResponseTemplate::new(200).set_body_json(contents_body("abc", &sample_members())))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(FILE))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "Invalid request"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = remote_store(&server);
    let tracker = SyncTracker::new();
    let err = store.save(&sample_members(), &tracker).await.unwrap_err();
    assert!(matches!(err, SyncError::WriteFailed { status: 422, .. }));
    assert_eq!(
        tracker.snapshot().error_message.as_deref(),
        Some("Update Error (422): Invalid request")
    );
}

#[tokio::test]
async fn garbled_version_reread_is_retried() {
    let members = sample_members();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FILE))
        .respond_with(ResponseTemplate::new(200).set_body_json(contents_body("abc", &members)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(FILE))
        .respond_with(ResponseTemplate::new(200).set_body_string("{garbled"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(FILE))
        .respond_with(ResponseTemplate::new(200).set_body_json(contents_body("def", &members)))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(FILE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let store = remote_store(&server);
    let tracker = SyncTracker::new();
    store.save(&members, &tracker).await.unwrap();
    assert_eq!(tracker.state(), SyncState::Success);

    let requests = server.received_requests().await.unwrap();
    let gets = requests.iter().filter(|r| r.method.as_str() == "GET").count();
    let puts: Vec<_> = requests.iter().filter(|r| r.method.as_str() == "PUT").collect();
    assert_eq!(gets, 3);
    assert_eq!(puts.len(), 1);
    let body: Value = serde_json::from_slice(&puts[0].body).unwrap();
    assert_eq!(body["sha"], "def");
}

#[tokio::test]
async fn unreachable_server_is_a_retryable_fault() {
    let config = RemoteConfig::new("acme", "people", AccessToken::new("test-token"))
        .with_api_base("http://127.0.0.1:1");
    let client = GithubContentsClient::new(config).unwrap();

    let err = client.read().await.unwrap_err();
    assert!(err.is_retryable());
}

#[tokio::test]
async fn local_endpoint_posts_collection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        LocalEndpointClient::new(LocalConfig::new(format!("{}/api/members", server.uri())))
            .unwrap();
    let members = sample_members();
    client.post_members(&members).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let posted: Vec<Member> = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(posted, members);
}

#[tokio::test]
async fn local_endpoint_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/members"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "git commit failed"})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/members"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let client =
        LocalEndpointClient::new(LocalConfig::new(format!("{}/api/members", server.uri())))
            .unwrap();

    let err = client.post_members(&[]).await.unwrap_err();
    assert_eq!(err.to_string(), "git commit failed");
    let err = client.post_members(&[]).await.unwrap_err();
    assert_eq!(err.to_string(), "Local save failed");
}
