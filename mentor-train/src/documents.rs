//! Documents API surface.

use std::path::Path;
use std::sync::Arc;

use mentor_train_types::documents::{TrainDocumentRequest, TrainDocumentResponse};

use crate::client::ClientInner;
use crate::error::{Error, Result};

/// 单个训练文档的大小上限（100 MiB）。
pub const MAX_DOCUMENT_BYTES: u64 = 100 * 1024 * 1024;

#[derive(Clone)]
pub struct Documents {
    pub(crate) inner: Arc<ClientInner>,
}

impl Documents {
    pub(crate) const fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// 训练端点 URL：`{base}api/ai-index/orgs/{org}/users/{user}/documents/train/`。
    ///
    /// # Errors
    /// 当组织 ID 或用户 ID 为空时返回错误。
    pub fn train_url(&self, org_id: &str, user_id: &str) -> Result<String> {
        build_train_url(&self.inner.api_client.base_url, org_id, user_id)
    }

    /// 提交训练请求。
    ///
    /// # Errors
    /// 当请求失败、服务端返回非 2xx 或响应解析失败时返回错误。
    pub async fn train(
        &self,
        org_id: &str,
        user_id: &str,
        request: &TrainDocumentRequest,
    ) -> Result<TrainDocumentResponse> {
        let url = self.train_url(org_id, user_id)?;
        tracing::info!(
            %url,
            pathway = %request.pathway,
            bytes = request.file.len(),
            "submitting document for training"
        );
        let body = serde_json::to_vec(request)?;
        let http_request = self
            .inner
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);

        let response = self.inner.send(http_request).await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ApiError {
                status,
                message: error_detail(&body),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice::<TrainDocumentResponse>(&body)?)
    }

    /// 从文件路径读取文档并提交训练请求。
    ///
    /// 文件在发出任何网络请求之前完成校验与读取。
    ///
    /// # Errors
    /// 当文件不可用、请求失败或响应解析失败时返回错误。
    pub async fn train_from_path(
        &self,
        org_id: &str,
        user_id: &str,
        pathway: &str,
        path: impl AsRef<Path>,
    ) -> Result<TrainDocumentResponse> {
        let path = path.as_ref();
        self.train_url(org_id, user_id)?;
        if !is_uuid_pathway(pathway) {
            tracing::warn!(
                pathway,
                "pathway ID is not a UUID (expected e.g. 25223e76-fc94-4cc2-aec1-f9fb51f0c2bf)"
            );
        }
        let data = read_source_file(path).await?;

        let mut request = TrainDocumentRequest::new(pathway, data);
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            request = request.with_name(name);
        }
        self.train(org_id, user_id, &request).await
    }
}

fn build_train_url(base_url: &str, org_id: &str, user_id: &str) -> Result<String> {
    if org_id.trim().is_empty() {
        return Err(Error::InvalidConfig {
            message: "Organization ID must be a non-empty string".into(),
        });
    }
    if user_id.trim().is_empty() {
        return Err(Error::InvalidConfig {
            message: "User ID must be a non-empty string".into(),
        });
    }

    let mut url = reqwest::Url::parse(base_url).map_err(|err| Error::InvalidConfig {
        message: err.to_string(),
    })?;
    url.path_segments_mut()
        .map_err(|()| Error::InvalidConfig {
            message: format!("Base URL cannot be used as a path prefix: {base_url}"),
        })?
        .pop_if_empty()
        .extend([
            "api",
            "ai-index",
            "orgs",
            org_id,
            "users",
            user_id,
            "documents",
            "train",
            "",
        ]);
    Ok(url.to_string())
}

/// Pathway ID 是否为 UUID 格式。
#[must_use]
pub fn is_uuid_pathway(pathway: &str) -> bool {
    uuid::Uuid::try_parse(pathway).is_ok()
}

/// 校验并读取待上传文件。
///
/// # Errors
/// 当文件不存在、不是普通文件、为空或超过大小上限时返回错误。
pub async fn read_source_file(path: &Path) -> Result<Vec<u8>> {
    let source_error = |message: String| Error::SourceFile {
        path: path.to_path_buf(),
        message,
    };

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|err| source_error(format!("cannot be accessed: {err}")))?;
    if !metadata.is_file() {
        return Err(source_error("is not a regular file".into()));
    }
    let size = metadata.len();
    if size == 0 {
        return Err(source_error("is empty".into()));
    }
    if size > MAX_DOCUMENT_BYTES {
        return Err(source_error(format!(
            "is too large: {:.2} MiB (max {} MiB)",
            size as f64 / (1024.0 * 1024.0),
            MAX_DOCUMENT_BYTES / (1024 * 1024)
        )));
    }

    let mime_type = mime_guess::from_path(path).first_or_octet_stream();
    if mime_type == mime_guess::mime::APPLICATION_OCTET_STREAM {
        tracing::warn!(path = %path.display(), "unknown file type, sending as generic binary");
    }
    tracing::info!(
        path = %path.display(),
        size_kib = %format!("{:.2}", size as f64 / 1024.0),
        mime = %mime_type,
        "source file validated"
    );

    tokio::fs::read(path)
        .await
        .map_err(|err| source_error(format!("cannot be read: {err}")))
}

/// 错误响应详情：能解析为 JSON 时输出紧凑 JSON，否则原样返回文本。
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value.to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_client_inner_with_base;
    use std::io::Write;

    #[test]
    fn test_train_url_template() {
        let url = build_train_url("https://base.manager.ai.syr.edu/", "syracuse", "relstad")
            .unwrap();
        assert_eq!(
            url,
            "https://base.manager.ai.syr.edu/api/ai-index/orgs/syracuse/users/relstad/documents/train/"
        );
    }

    #[test]
    fn test_train_url_keeps_base_path_and_encodes_segments() {
        let url = build_train_url("http://127.0.0.1:8080/proxy/", "my org", "a/b").unwrap();
        assert_eq!(
            url,
            "http://127.0.0.1:8080/proxy/api/ai-index/orgs/my%20org/users/a%2Fb/documents/train/"
        );
    }

    #[test]
    fn test_train_url_rejects_empty_ids() {
        let err = build_train_url("https://example.com/", "", "user").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
        let err = build_train_url("https://example.com/", "org", "  ").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_documents_train_url_uses_client_base() {
        let inner = test_client_inner_with_base("http://localhost:9999");
        let docs = Documents::new(Arc::new(inner));
        let url = docs.train_url("syracuse", "jasidel").unwrap();
        assert_eq!(
            url,
            "http://localhost:9999/api/ai-index/orgs/syracuse/users/jasidel/documents/train/"
        );
    }

    #[test]
    fn test_pathway_uuid_check() {
        assert!(is_uuid_pathway("25223e76-fc94-4cc2-aec1-f9fb51f0c2bf"));
        assert!(!is_uuid_pathway("abc-123"));
    }

    #[test]
    fn test_error_detail_prefers_json() {
        assert_eq!(
            error_detail(r#"{ "detail": "Invalid token." }"#),
            r#"{"detail":"Invalid token."}"#
        );
        assert_eq!(error_detail("  plain text\n"), "plain text");
    }

    #[tokio::test]
    async fn test_read_source_file_validation() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.pdf");
        let err = read_source_file(&missing).await.unwrap_err();
        assert!(matches!(err, Error::SourceFile { ref path, .. } if path == &missing));

        let err = read_source_file(dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("not a regular file"));

        let empty = dir.path().join("empty.txt");
        std::fs::File::create(&empty).unwrap();
        let err = read_source_file(&empty).await.unwrap_err();
        assert!(err.to_string().contains("is empty"));

        let doc = dir.path().join("doc.txt");
        std::fs::File::create(&doc)
            .unwrap()
            .write_all(b"ABC")
            .unwrap();
        assert_eq!(read_source_file(&doc).await.unwrap(), b"ABC".to_vec());
    }
}
