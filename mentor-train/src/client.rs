//! Client configuration and transport layer.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client as HttpClient, Proxy};

use crate::credentials::ApiToken;
use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://base.manager.ai.syr.edu/";

/// 文档训练 API 客户端。
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub http: HttpClient,
    pub config: ClientConfig,
    pub api_client: ApiClient,
}

/// 客户端配置。
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API Token。
    pub api_token: ApiToken,
    /// HTTP 配置。
    pub http_options: HttpOptions,
}

/// HTTP 配置。
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    /// 请求超时（秒），未设置时使用 HTTP 客户端默认值。
    pub timeout: Option<u64>,
    pub proxy: Option<String>,
    pub headers: HashMap<String, String>,
    pub base_url: Option<String>,
}

impl Client {
    /// 使用 API Token 创建客户端。
    ///
    /// # Errors
    /// 当 Token 无效或构建客户端失败时返回错误。
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        Self::builder().api_token(api_token).build()
    }

    /// 从环境变量创建客户端。
    ///
    /// 读取 `MENTOR_API_TOKEN`，缺失时读取 `MENTOR_API_TOKEN_FILE` 指向的凭据文件；
    /// `MENTOR_BASE_URL` 可覆盖服务地址。
    ///
    /// # Errors
    /// 当环境变量缺失或构建客户端失败时返回错误。
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();
        if let Some(token) = non_blank_env("MENTOR_API_TOKEN") {
            builder = builder.api_token(token);
        } else if let Some(path) = non_blank_env("MENTOR_API_TOKEN_FILE") {
            builder = builder.api_token_file(path);
        } else {
            return Err(Error::InvalidConfig {
                message: "MENTOR_API_TOKEN or MENTOR_API_TOKEN_FILE not found".into(),
            });
        }
        if let Some(base_url) = non_blank_env("MENTOR_BASE_URL") {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    /// 创建 Builder。
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// 访问 Documents API。
    #[must_use]
    pub fn documents(&self) -> crate::documents::Documents {
        crate::documents::Documents::new(self.inner.clone())
    }

    /// 服务基础 URL（以 `/` 结尾）。
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.api_client.base_url
    }

    /// 当前 HTTP 配置。
    #[must_use]
    pub fn http_options(&self) -> &HttpOptions {
        &self.inner.config.http_options
    }
}

/// 客户端 Builder。
#[derive(Default)]
pub struct ClientBuilder {
    api_token: Option<String>,
    api_token_file: Option<PathBuf>,
    http_options: HttpOptions,
}

impl ClientBuilder {
    /// 设置 API Token。
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// 从凭据文件读取 API Token（在 `build` 时读取）。
    #[must_use]
    pub fn api_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.api_token_file = Some(path.into());
        self
    }

    /// 设置请求超时（秒）。
    #[must_use]
    pub const fn timeout(mut self, secs: u64) -> Self {
        self.http_options.timeout = Some(secs);
        self
    }

    /// 设置代理。
    #[must_use]
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.http_options.proxy = Some(url.into());
        self
    }

    /// 增加默认 HTTP 头。
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.http_options.headers.insert(key.into(), value.into());
        self
    }

    /// 设置自定义基础 URL。
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.http_options.base_url = Some(base_url.into());
        self
    }

    /// 构建客户端。
    ///
    /// # Errors
    /// 当 Token 缺失或无效、参数无效或构建 HTTP 客户端失败时返回错误。
    pub fn build(self) -> Result<Client> {
        let Self {
            api_token,
            api_token_file,
            http_options,
        } = self;

        let api_token = Self::resolve_token(api_token.as_deref(), api_token_file)?;
        let headers = Self::build_headers(&http_options, &api_token)?;
        let http = Self::build_http_client(&http_options, headers)?;

        let config = ClientConfig {
            api_token,
            http_options,
        };
        let api_client = ApiClient::new(&config)?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                config,
                api_client,
            }),
        })
    }

    fn resolve_token(api_token: Option<&str>, api_token_file: Option<PathBuf>) -> Result<ApiToken> {
        match (api_token, api_token_file) {
            (Some(_), Some(_)) => Err(Error::InvalidConfig {
                message: "API token cannot be combined with a credentials file".into(),
            }),
            (Some(token), None) => ApiToken::new(token),
            (None, Some(path)) => ApiToken::from_file(path),
            (None, None) => Err(Error::InvalidConfig {
                message: "API token or credentials file required".into(),
            }),
        }
    }

    fn build_headers(http_options: &HttpOptions, api_token: &ApiToken) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (key, value) in &http_options.headers {
            let name =
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| Error::InvalidConfig {
                    message: format!("Invalid header name: {key}"),
                })?;
            let value = HeaderValue::from_str(value).map_err(|_| Error::InvalidConfig {
                message: format!("Invalid header value for {key}"),
            })?;
            headers.insert(name, value);
        }

        let auth = api_token.header_value()?;
        if !headers.contains_key(AUTHORIZATION) {
            headers.insert(AUTHORIZATION, auth);
        }

        Ok(headers)
    }

    fn build_http_client(http_options: &HttpOptions, headers: HeaderMap) -> Result<HttpClient> {
        let mut http_builder = HttpClient::builder();
        if let Some(timeout) = http_options.timeout {
            http_builder = http_builder.timeout(Duration::from_secs(timeout));
        }

        if let Some(proxy_url) = &http_options.proxy {
            let proxy = Proxy::all(proxy_url).map_err(|e| Error::InvalidConfig {
                message: format!("Invalid proxy: {e}"),
            })?;
            http_builder = http_builder.proxy(proxy);
        }

        if !headers.is_empty() {
            http_builder = http_builder.default_headers(headers);
        }

        Ok(http_builder.build()?)
    }
}

impl ClientInner {
    /// 发送请求。
    ///
    /// # Errors
    /// 当请求构建或网络请求失败时返回错误。
    pub async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let request = request.build()?;
        tracing::debug!(method = %request.method(), url = %request.url(), "sending request");
        let response = self.http.execute(request).await?;
        tracing::debug!(status = %response.status(), "received response");
        Ok(response)
    }
}

pub(crate) struct ApiClient {
    pub base_url: String,
}

impl ApiClient {
    /// 创建 API 客户端配置。
    ///
    /// # Errors
    /// 当基础 URL 无法解析时返回错误。
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config
            .http_options
            .base_url
            .as_deref()
            .map_or_else(|| DEFAULT_BASE_URL.to_string(), normalize_base_url);
        reqwest::Url::parse(&base_url).map_err(|err| Error::InvalidConfig {
            message: format!("Invalid base URL {base_url}: {err}"),
        })?;
        Ok(Self { base_url })
    }
}

fn normalize_base_url(base_url: &str) -> String {
    let mut value = base_url.trim().to_string();
    if !value.ends_with('/') {
        value.push('/');
    }
    value
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
