use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::options::{MatchOptions, RequestOptions, ResponseSpec};
use super::transform::{
    STATUS_MISSING, URL_MISSING, fail_body_with_no_content_type, non_null,
    stringify_non_json_body, strip_null_matches,
};
use super::types::{Criteria, MatchValue, Method, StubResponse};
use crate::{Result, VanilliError};

/// stub 或 expectation 的注册数据
///
/// 先由请求条件创建，再通过链式调用补全：
///
/// ```ignore
/// let stub = Stub::get("/some/url", MatchOptions::new())?
///     .respond_with(ResponseSpec::with_status(200).content_type("text/plain").body("hi"))?
///     .wait(250)
///     .capture("greeting");
/// ```
///
/// 序列化为稀疏对象：未设置的字段直接省略，不会以 `null` 发送。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stub {
    criteria: Criteria,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    priority: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response: Option<StubResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    times: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    capture_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expect: Option<bool>,
}

impl Stub {
    pub fn on_request(
        method: Method,
        url: impl Into<MatchValue>,
        options: impl Into<RequestOptions>,
    ) -> Result<Self> {
        let url = url.into();
        if url.is_missing() {
            return Err(VanilliError::validation(URL_MISSING));
        }

        let RequestOptions {
            matching,
            content_type,
            body,
        } = options.into();
        let body = non_null(body);
        fail_body_with_no_content_type(body.as_ref(), content_type.as_deref())?;

        let body = stringify_non_json_body(body, content_type.as_deref());
        let criteria = Criteria {
            method,
            url,
            content_type,
            body,
            query: matching.query.map(strip_null_matches),
            headers: matching.headers.map(strip_null_matches),
        };

        Ok(Self {
            criteria,
            priority: matching.priority,
            response: None,
            times: None,
            capture_id: None,
            expect: None,
        })
    }

    pub fn get(url: impl Into<MatchValue>, options: MatchOptions) -> Result<Self> {
        Self::on_request(Method::Get, url, options)
    }

    pub fn post(url: impl Into<MatchValue>, options: impl Into<RequestOptions>) -> Result<Self> {
        Self::on_request(Method::Post, url, options)
    }

    pub fn put(url: impl Into<MatchValue>, options: impl Into<RequestOptions>) -> Result<Self> {
        Self::on_request(Method::Put, url, options)
    }

    pub fn delete(url: impl Into<MatchValue>, options: MatchOptions) -> Result<Self> {
        Self::on_request(Method::Delete, url, options)
    }

    pub fn head(url: impl Into<MatchValue>, options: MatchOptions) -> Result<Self> {
        Self::on_request(Method::Head, url, options)
    }

    /// 设置响应。这里给出的字段覆盖已有的值，没给出的字段保持不变
    pub fn respond_with(mut self, response: impl Into<ResponseSpec>) -> Result<Self> {
        let ResponseSpec {
            status,
            content_type,
            body,
            headers,
            times,
        } = response.into();

        let status = status.ok_or_else(|| VanilliError::validation(STATUS_MISSING))?;
        let body = non_null(body);
        fail_body_with_no_content_type(body.as_ref(), content_type.as_deref())?;

        let mut merged = self.response.take().unwrap_or_default();
        merged.status = Some(status);
        if content_type.is_some() {
            merged.content_type = content_type;
        }
        if body.is_some() {
            merged.body = body;
        }
        if let Some(headers) = headers {
            merged
                .headers
                .get_or_insert_with(BTreeMap::new)
                .extend(headers);
        }
        merged.body = stringify_non_json_body(merged.body, merged.content_type.as_deref());

        self.response = Some(merged);
        self.times = times.count();
        Ok(self)
    }

    pub fn wait(mut self, milliseconds: u64) -> Self {
        self.response.get_or_insert_with(StubResponse::default).wait = Some(milliseconds);
        self
    }

    pub fn capture(mut self, capture_id: impl Into<String>) -> Self {
        self.capture_id = Some(capture_id.into());
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// 标记为需要 verify 的 expectation
    pub fn expected(mut self) -> Self {
        self.expect = Some(true);
        self
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn response(&self) -> Option<&StubResponse> {
        self.response.as_ref()
    }

    pub fn priority_value(&self) -> Option<i64> {
        self.priority
    }

    pub fn times(&self) -> Option<u32> {
        self.times
    }

    pub fn capture_id(&self) -> Option<&str> {
        self.capture_id.as_deref()
    }

    pub fn is_expectation(&self) -> bool {
        self.expect.unwrap_or(false)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
