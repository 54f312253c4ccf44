//! Test fixtures
//!
//! A scratch archive directory laid out like an export, plus the response
//! shapes the tests deserialize.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Archive directory in a temp dir, removed on drop
pub struct ArchiveFixture {
    dir: TempDir,
}

impl ArchiveFixture {
    /// Create an empty archive
    pub fn empty() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("archive-it-")
            .tempdir()
            .unwrap_or_else(|e| panic!("create temp archive: {e}"));
        Self { dir }
    }

    /// Workspace `acme` with channel `general` (3 + 5 messages, one thread)
    /// and an empty channel `random`
    pub fn acme() -> Self {
        let fixture = Self::empty();
        fixture.page(
            "acme",
            "general",
            "2024-01-01.json",
            &json!([
                { "ts": "1700000000.000100", "user": "U1", "text": "deploy today?" },
                { "ts": "1700000060.000200", "user": "U2", "text": "yes", "thread_ts": "1700000000.000100" },
                { "ts": "1700000120.000300", "user": "U3", "text": "lunch" }
            ]),
        );
        fixture.page(
            "acme",
            "general",
            "2024-01-02.json",
            &json!([
                { "ts": "1700086400.000100", "user": "U1", "text": "morning" },
                { "ts": "1700086460.000200", "user": "U2", "text": "done", "thread_ts": "1700000000.000100" },
                { "ts": "1700086520.000300", "user": "U3", "text": "nice" },
                {
                    "ts": "",
                    "user": "U4",
                    "text": "uploaded a file",
                    "files": [{ "id": "F1", "name": "notes.txt", "created": 1700086600 }]
                },
                { "ts": "not-a-time", "user": "U5", "text": "lost" }
            ]),
        );
        fixture.channel("acme", "random");
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create an empty channel directory
    pub fn channel(&self, workspace: &str, channel: &str) -> PathBuf {
        let dir = self.path().join(workspace).join(channel);
        std::fs::create_dir_all(&dir).unwrap_or_else(|e| panic!("create {dir:?}: {e}"));
        dir
    }

    /// Write one message page
    pub fn page(&self, workspace: &str, channel: &str, file: &str, messages: &Value) {
        let path = self.channel(workspace, channel).join(file);
        write_json(&path, messages);
    }

    /// Write the workspace metadata document
    pub fn metadata(&self, workspace: &str, document: &Value) {
        let dir = self.path().join(workspace);
        std::fs::create_dir_all(&dir).unwrap_or_else(|e| panic!("create {dir:?}: {e}"));
        write_json(&dir.join("channel-metadata.json"), document);
    }

    /// Read the workspace metadata document back, if present
    pub fn read_metadata(&self, workspace: &str) -> Option<Value> {
        let path = self.path().join(workspace).join("channel-metadata.json");
        let bytes = std::fs::read(path).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

fn write_json(path: &Path, value: &Value) {
    let bytes = serde_json::to_vec_pretty(value).unwrap_or_else(|e| panic!("encode: {e}"));
    std::fs::write(path, bytes).unwrap_or_else(|e| panic!("write {path:?}: {e}"));
}

/// Count for one channel
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    pub channel: String,
    pub message_count: u64,
    pub cached: bool,
    pub persisted: bool,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Cached metadata of a workspace
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataResponse {
    pub workspace: String,
    pub loaded: bool,
    pub channels: serde_json::Map<String, Value>,
    pub last_error: Option<ErrorDetail>,
}

/// A root message with its replies
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub message: Value,
    pub reply_count: usize,
    pub replies: Vec<Value>,
}

/// Assembled threads of a channel
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadViewResponse {
    pub channel: String,
    pub roots: Vec<ThreadResponse>,
    pub dropped_count: usize,
}
