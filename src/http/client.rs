use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::http::types::{CapturedRequest, Endpoint, VerificationReport};
use crate::stub::Stub;
use crate::{Result, VanilliError};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 9000;
/// 默认 stub 的优先级，其他匹配的 stub 总是优先
pub const DEFAULT_STUB_PRIORITY: i64 = 100_000;

/// 通过 `/_vanilli/` 管理接口与运行中的 vanilli 通信
///
/// 每次调用只有一次请求，不重试。
#[derive(Clone, Debug)]
pub struct VanilliClient {
    inner: reqwest::Client,
    host: String,
    port: u16,
}

impl Default for VanilliClient {
    fn default() -> Self {
        Self::new(DEFAULT_PORT)
    }
}

impl VanilliClient {
    pub fn new(port: u16) -> Self {
        Self {
            inner: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            host: DEFAULT_HOST.to_string(),
            port,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.port).with_host(&config.host)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `http://<host>:<port>/_vanilli/`
    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&format!(
            "http://{}:{}/_vanilli/",
            self.host, self.port
        ))?)
    }

    fn endpoint(&self, endpoint: Endpoint<'_>) -> Result<Url> {
        let mut url = self.base_url()?;
        url.path_segments_mut()
            .map_err(|_| VanilliError::Other(format!("cannot append path to {}", self.host)))?
            .pop_if_empty()
            .extend(endpoint.segments());
        Ok(url)
    }

    /// 发送请求；非 2xx 时把服务端返回的内容带进错误
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        check_status(request.send().await?).await
    }

    async fn post_stubs(&self, endpoint: Endpoint<'_>, stubs: &[Stub]) -> Result<()> {
        let url = self.endpoint(endpoint)?;
        debug!(%url, count = stubs.len(), "POST");
        let body = serde_json::to_vec(stubs)?;
        let request = self
            .inner
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
            .body(body);
        self.send(request).await?;
        Ok(())
    }

    /// 一次请求注册所有 stub
    pub async fn stub(&self, stubs: &[Stub]) -> Result<()> {
        self.post_stubs(Endpoint::Stubs, stubs).await
    }

    /// 注册只在没有其他匹配时才生效的 stub，已设置的 priority 会被覆盖
    pub async fn stub_default(&self, stubs: &[Stub]) -> Result<()> {
        let defaults: Vec<Stub> = stubs
            .iter()
            .cloned()
            .map(|stub| stub.priority(DEFAULT_STUB_PRIORITY))
            .collect();
        self.post_stubs(Endpoint::Stubs, &defaults).await
    }

    /// 注册 expectation，之后由 [`verify`](Self::verify) 检查；每一项都带上 `"expect": true`
    pub async fn expect(&self, expectations: &[Stub]) -> Result<()> {
        let expectations: Vec<Stub> = expectations
            .iter()
            .cloned()
            .map(Stub::expected)
            .collect();
        self.post_stubs(Endpoint::Expectations, &expectations).await
    }

    /// 删除所有 stub 和 expectation
    pub async fn clear(&self) -> Result<()> {
        let url = self.endpoint(Endpoint::Stubs)?;
        debug!(%url, "DELETE");
        self.send(self.inner.delete(url)).await?;
        Ok(())
    }

    pub async fn verify(&self) -> Result<()> {
        let url = self.endpoint(Endpoint::Verify)?;
        debug!(%url, "GET");
        let response = self.send(self.inner.get(url)).await?;
        let text = response.text().await?;
        let report: VerificationReport = serde_json::from_str(&text)?;

        if report.is_ok() {
            Ok(())
        } else {
            Err(VanilliError::Verification(report.message()))
        }
    }

    /// `capture_id` 下记录的请求，按时间先后排列；未知 id 返回空列表
    pub async fn get_captures(&self, capture_id: &str) -> Result<Vec<CapturedRequest>> {
        let url = self.endpoint(Endpoint::Captures(capture_id))?;
        debug!(%url, "GET");
        let response = self.inner.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let response = check_status(response).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// `capture_id` 下最近一次记录的请求
    pub async fn get_capture(&self, capture_id: &str) -> Result<Option<CapturedRequest>> {
        Ok(self.get_captures(capture_id).await?.pop())
    }

    pub async fn ping(&self) -> Result<()> {
        let url = self.endpoint(Endpoint::Ping)?;
        self.send(self.inner.get(url)).await?;
        Ok(())
    }

    /// server 状态的原始诊断输出
    pub async fn dump(&self) -> Result<String> {
        let url = self.endpoint(Endpoint::Dump)?;
        debug!(%url, "GET");
        let response = self.send(self.inner.get(url)).await?;
        Ok(response.text().await?)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response.text().await.unwrap_or_default();
    Err(VanilliError::Transport {
        status: Some(status.as_u16()),
        detail,
    })
}
