#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;
use wiremock::{Mock, MockServer, ResponseTemplate};
use wiremock::matchers::{method, path};

use mentor_train::Client;

pub const TRAIN_PATH: &str = "/api/ai-index/orgs/syracuse/users/relstad/documents/train/";
pub const PATHWAY: &str = "25223e76-fc94-4cc2-aec1-f9fb51f0c2bf";

pub fn build_client(base_url: &str) -> Client {
    Client::builder()
        .api_token("test-token")
        .base_url(base_url)
        .build()
        .unwrap()
}

pub fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    path
}

pub async fn mount_train_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(TRAIN_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "message": "ok",
            "task_id": "t1",
            "document_id": "d1"
        })))
        .mount(server)
        .await;
}
