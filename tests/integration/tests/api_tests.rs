//! API Integration Tests
//!
//! Each test serves its own scratch archive directory over a real socket.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::sync::Arc;

use futures::future::join_all;
use integration_tests::{
    assert_json, assert_status, ArchiveFixture, CountResponse, ErrorResponse, MetadataResponse,
    TestServer, ThreadViewResponse,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

const GENERAL_COUNT: &str = "/api/v1/workspaces/acme/channels/general/count";

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let archive = ArchiveFixture::acme();
    let server = TestServer::start(archive.path()).await.expect("Failed to start server");

    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Count Tests
// ============================================================================

#[tokio::test]
async fn test_count_written_back_to_metadata_document() {
    let archive = ArchiveFixture::acme();
    let server = TestServer::start(archive.path()).await.unwrap();

    let response = server.get(GENERAL_COUNT).await.unwrap();
    let count: CountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.channel, "general");
    assert_eq!(count.message_count, 8);
    assert!(!count.cached);
    assert!(count.persisted);

    let document = archive.read_metadata("acme").expect("metadata written");
    assert_eq!(document["channels"]["general"]["messageCount"], 8);
    assert!(document["channels"]["general"]["lastCounted"].is_string());
}

#[tokio::test]
async fn test_persisted_count_survives_restart() {
    let archive = ArchiveFixture::acme();
    {
        let server = TestServer::start(archive.path()).await.unwrap();
        let response = server.get(GENERAL_COUNT).await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let server = TestServer::start(archive.path()).await.unwrap();
    let response = server.get(GENERAL_COUNT).await.unwrap();
    let count: CountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.message_count, 8);
    assert!(count.cached);
}

#[tokio::test]
async fn test_existing_metadata_is_trusted() {
    let archive = ArchiveFixture::acme();
    archive.metadata(
        "acme",
        &json!({
            "channels": {
                "general": { "messageCount": 42, "lastCounted": "2024-01-01T00:00:00Z" }
            }
        }),
    );
    let server = TestServer::start(archive.path()).await.unwrap();

    let response = server
        .get("/api/v1/workspaces/acme/channels/General/count")
        .await
        .unwrap();
    let count: CountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.channel, "General");
    assert_eq!(count.message_count, 42);
    assert!(count.cached);
}

#[tokio::test]
async fn test_empty_channel_counts_zero() {
    let archive = ArchiveFixture::acme();
    let server = TestServer::start(archive.path()).await.unwrap();

    let response = server
        .get("/api/v1/workspaces/acme/channels/random/count")
        .await
        .unwrap();
    let count: CountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.message_count, 0);
}

#[tokio::test]
async fn test_concurrent_counts_agree() {
    let archive = ArchiveFixture::acme();
    let server = Arc::new(TestServer::start(archive.path()).await.unwrap());

    let requests = (0..10).map(|_| {
        let server = Arc::clone(&server);
        async move {
            let response = server.get(GENERAL_COUNT).await.unwrap();
            assert_json::<CountResponse>(response, StatusCode::OK)
                .await
                .unwrap()
        }
    });
    let counts = join_all(requests).await;

    assert!(counts.iter().all(|c| c.message_count == 8));
    let document = archive.read_metadata("acme").expect("metadata written");
    assert_eq!(document["channels"].as_object().map(serde_json::Map::len), Some(1));
}

#[tokio::test]
async fn test_unknown_workspace() {
    let archive = ArchiveFixture::acme();
    let server = TestServer::start(archive.path()).await.unwrap();

    let response = server
        .get("/api/v1/workspaces/globex/channels/general/count")
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_WORKSPACE");
    assert!(body.error.message.contains("globex"));

    // once the directory appears the workspace loads normally
    archive.page("globex", "general", "2024-01-01.json", &json!([{ "ts": "1.0", "text": "hi" }]));
    let response = server
        .get("/api/v1/workspaces/globex/channels/general/count")
        .await
        .unwrap();
    let body: CountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.message_count, 1);
}

#[tokio::test]
async fn test_corrupt_metadata_reported() {
    let archive = ArchiveFixture::acme();
    archive.metadata("acme", &json!({ "version": 2 }));
    let server = TestServer::start(archive.path()).await.unwrap();

    let response = server.get(GENERAL_COUNT).await.unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();
    assert_eq!(body.error.code, "INVALID_METADATA_FORMAT");

    let response = server.get("/api/v1/workspaces/acme/metadata").await.unwrap();
    let metadata: MetadataResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!metadata.loaded);
    assert_eq!(
        metadata.last_error.map(|e| e.code).as_deref(),
        Some("INVALID_METADATA_FORMAT")
    );
}

#[tokio::test]
async fn test_batch_counts() {
    let archive = ArchiveFixture::acme();
    let server = TestServer::start(archive.path()).await.unwrap();

    let response = server
        .post(
            "/api/v1/workspaces/acme/counts",
            &json!({ "channels": ["general", "random", "missing"] }),
        )
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let results = body["results"].as_array().unwrap();

    assert_eq!(results[0]["messageCount"], 8);
    assert_eq!(results[1]["messageCount"], 0);
    assert_eq!(results[2]["error"]["code"], "UNKNOWN_CHANNEL");

    let document = archive.read_metadata("acme").expect("metadata written");
    assert_eq!(document["channels"]["general"]["messageCount"], 8);
    assert_eq!(document["channels"]["random"]["messageCount"], 0);
    assert!(document["channels"].get("missing").is_none());
}

#[tokio::test]
async fn test_batch_counts_rejects_blank_names() {
    let archive = ArchiveFixture::acme();
    let server = TestServer::start(archive.path()).await.unwrap();

    let response = server
        .post("/api/v1/workspaces/acme/counts", &json!({ "channels": ["general", " "] }))
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

// ============================================================================
// Metadata Tests
// ============================================================================

#[tokio::test]
async fn test_clear_channel_recounts_new_pages() {
    let archive = ArchiveFixture::acme();
    let server = TestServer::start(archive.path()).await.unwrap();

    let response = server.get(GENERAL_COUNT).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    archive.page(
        "acme",
        "general",
        "2024-01-03.json",
        &json!([{ "ts": "1700172800.000100", "user": "U1", "text": "new day" }]),
    );

    let response = server
        .delete("/api/v1/workspaces/acme/metadata?channel=general")
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(GENERAL_COUNT).await.unwrap();
    let count: CountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.message_count, 9);
    assert!(!count.cached);
}

#[tokio::test]
async fn test_clear_workspace_unloads_snapshot() {
    let archive = ArchiveFixture::acme();
    let server = TestServer::start(archive.path()).await.unwrap();

    let response = server.get(GENERAL_COUNT).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/api/v1/workspaces/acme/metadata").await.unwrap();
    let metadata: MetadataResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(metadata.workspace, "acme");
    assert!(metadata.loaded);
    assert!(metadata.channels.contains_key("general"));

    let response = server.delete("/api/v1/workspaces/acme/metadata").await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get("/api/v1/workspaces/acme/metadata").await.unwrap();
    let metadata: MetadataResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!metadata.loaded);
    assert!(metadata.channels.is_empty());

    // Clearing everything does not touch the document on disk
    let document = archive.read_metadata("acme").expect("metadata kept");
    assert_eq!(document["channels"]["general"]["messageCount"], 8);
}

// ============================================================================
// Thread Tests
// ============================================================================

#[tokio::test]
async fn test_threads_assembled() {
    let archive = ArchiveFixture::acme();
    let server = TestServer::start(archive.path()).await.unwrap();

    let response = server
        .get("/api/v1/workspaces/acme/channels/general/threads")
        .await
        .unwrap();
    let view: ThreadViewResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(view.channel, "general");
    assert_eq!(view.dropped_count, 1);
    assert_eq!(view.roots.len(), 5);

    let first = &view.roots[0];
    assert_eq!(first.message["text"], "deploy today?");
    assert_eq!(first.reply_count, 2);
    assert_eq!(first.replies[0]["text"], "yes");
    assert_eq!(first.replies[1]["text"], "done");

    // The upload without a timestamp takes its file's creation time
    let last = &view.roots[4];
    assert_eq!(last.message["text"], "uploaded a file");
    assert_eq!(last.message["ts"], "1700086600");
}

#[tokio::test]
async fn test_threads_rejects_traversal() {
    let archive = ArchiveFixture::acme();
    let server = TestServer::start(archive.path()).await.unwrap();

    let response = server
        .get("/api/v1/workspaces/acme/channels/a%5Cb/threads")
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_IDENTIFIER");
}
