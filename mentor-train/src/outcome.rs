//! Tagged result of a training upload.

use http::StatusCode;
use mentor_train_types::documents::TrainDocumentResponse;

use crate::error::{Error, Result};

/// 训练请求的结果。
///
/// 网络、服务端与响应解析错误被归为 `Failure`，由调用方决定退出或重试；
/// 凭据、源文件与配置错误仍以 `Err` 返回。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainOutcome {
    Success(TrainDocumentResponse),
    Failure {
        status: Option<u16>,
        reason: Option<String>,
        detail: String,
    },
}

impl TrainOutcome {
    /// 由 `Documents::train*` 的返回值构造结果。
    ///
    /// # Errors
    /// 本地错误（请求未发出）原样返回。
    pub fn from_result(result: Result<TrainDocumentResponse>) -> Result<Self> {
        match result {
            Ok(response) => Ok(Self::Success(response)),
            Err(err) if err.is_local() => Err(err),
            Err(Error::ApiError { status, message }) => Ok(Self::failure(Some(status), message)),
            Err(Error::HttpClient { source }) => {
                let status = source.status().map(|status| status.as_u16());
                let detail = if source.is_timeout() {
                    format!("request timed out: {source}")
                } else if source.is_connect() {
                    format!("connection error: {source}")
                } else {
                    source.to_string()
                };
                Ok(Self::failure(status, detail))
            }
            Err(Error::Serialization { source }) => {
                Ok(Self::failure(None, format!("malformed response: {source}")))
            }
            Err(err) => Ok(Self::failure(None, err.to_string())),
        }
    }

    fn failure(status: Option<u16>, detail: String) -> Self {
        let reason = status
            .and_then(|code| StatusCode::from_u16(code).ok())
            .and_then(|code| code.canonical_reason())
            .map(str::to_string);
        Self::Failure {
            status,
            reason,
            detail,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_success_is_kept() {
        let response = TrainDocumentResponse {
            message: Some("ok".into()),
            task_id: Some("t1".into()),
            document_id: Some("d1".into()),
        };
        let outcome = TrainOutcome::from_result(Ok(response.clone())).unwrap();
        assert_eq!(outcome, TrainOutcome::Success(response));
        assert!(outcome.is_success());
    }

    #[test]
    fn test_api_error_becomes_failure_with_reason() {
        let outcome = TrainOutcome::from_result(Err(Error::ApiError {
            status: 401,
            message: "bad token".into(),
        }))
        .unwrap();
        assert_eq!(
            outcome,
            TrainOutcome::Failure {
                status: Some(401),
                reason: Some("Unauthorized".into()),
                detail: "bad token".into(),
            }
        );
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_unknown_status_has_no_reason() {
        let outcome = TrainOutcome::from_result(Err(Error::ApiError {
            status: 599,
            message: String::new(),
        }))
        .unwrap();
        assert!(matches!(outcome, TrainOutcome::Failure { reason: None, .. }));
    }

    #[test]
    fn test_malformed_response_becomes_failure() {
        let source = serde_json::from_str::<TrainDocumentResponse>("not json").unwrap_err();
        let outcome = TrainOutcome::from_result(Err(Error::Serialization { source })).unwrap();
        assert!(
            matches!(outcome, TrainOutcome::Failure { status: None, ref detail, .. } if detail.starts_with("malformed response"))
        );
    }

    #[test]
    fn test_local_errors_are_propagated() {
        let err = TrainOutcome::from_result(Err(Error::SourceFile {
            path: PathBuf::from("missing.pdf"),
            message: "cannot be accessed".into(),
        }))
        .unwrap_err();
        assert!(matches!(err, Error::SourceFile { .. }));
    }
}
