//! API token loading.

use std::fmt;
use std::path::Path;

use reqwest::header::HeaderValue;

use crate::error::{Error, Result};

pub const DEFAULT_CREDENTIALS_FILE: &str = "api_credentials.txt";
const MIN_EXPECTED_TOKEN_LEN: usize = 10;
const AUTH_SCHEME: &str = "Api-Token";

/// API Token（`Authorization: Api-Token <token>`）。
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// 由字符串创建 Token（去除首尾空白）。
    ///
    /// # Errors
    /// 当 Token 为空时返回错误。
    pub fn new(token: impl AsRef<str>) -> Result<Self> {
        let token = token.as_ref().trim();
        if token.is_empty() {
            return Err(Error::InvalidConfig {
                message: "API token is empty".into(),
            });
        }
        Ok(Self(token.to_string()))
    }

    /// 从凭据文件读取 Token（取第一行非空内容）。
    ///
    /// # Errors
    /// 当文件无法读取或内容为空时返回错误。
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|err| Error::Credentials {
            path: path.to_path_buf(),
            message: format!("cannot be read ({err}); put your API key on the first line"),
        })?;
        // Leading blank lines are skipped on purpose; only the first line with content counts.
        let token = contents
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or_else(|| Error::Credentials {
                path: path.to_path_buf(),
                message: "API key is empty".into(),
            })?;
        if token.len() < MIN_EXPECTED_TOKEN_LEN {
            tracing::warn!(
                path = %path.display(),
                "API key looks unusually short; double-check the credentials file"
            );
        }
        tracing::info!(path = %path.display(), "API key loaded");
        Ok(Self(token.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 构造 `Authorization` 头。
    ///
    /// # Errors
    /// 当 Token 含有非法头字符时返回错误。
    pub(crate) fn header_value(&self) -> Result<HeaderValue> {
        let mut value = HeaderValue::from_str(&format!("{AUTH_SCHEME} {}", self.0)).map_err(
            |_| Error::InvalidConfig {
                message: "Invalid API token value".into(),
            },
        )?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}
