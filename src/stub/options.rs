use std::collections::BTreeMap;

use serde_json::Value;

use super::transform::{map_values, non_null, strip_null_matches};
use super::types::{MatchValue, Times};

/// 所有方法共用的可选匹配字段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOptions {
    pub(crate) query: Option<BTreeMap<String, MatchValue>>,
    pub(crate) headers: Option<BTreeMap<String, MatchValue>>,
    pub(crate) priority: Option<i64>,
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<MatchValue>) -> Self {
        insert_match(&mut self.query, key.into(), value.into());
        self
    }

    /// 替换整个 query 映射，空集合仍然以 `{}` 发送
    pub fn queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<MatchValue>,
    {
        self.query = Some(strip_null_matches(map_values(params, Into::into)));
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<MatchValue>) -> Self {
        insert_match(&mut self.headers, key.into(), value.into());
        self
    }

    /// 替换整个 header 映射，空集合仍然以 `{}` 发送
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<MatchValue>,
    {
        self.headers = Some(strip_null_matches(map_values(headers, Into::into)));
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }
}

// null 值等同于删除该项
fn insert_match(
    map: &mut Option<BTreeMap<String, MatchValue>>,
    key: String,
    value: MatchValue,
) {
    if value.is_null() {
        if let Some(map) = map.as_mut() {
            map.remove(&key);
        }
    } else {
        map.get_or_insert_with(BTreeMap::new).insert(key, value);
    }
}

/// 带请求体的方法使用的匹配字段
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub(crate) matching: MatchOptions,
    pub(crate) content_type: Option<String>,
    pub(crate) body: Option<Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = non_null(Some(body.into()));
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<MatchValue>) -> Self {
        self.matching = self.matching.query(key, value);
        self
    }

    pub fn queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<MatchValue>,
    {
        self.matching = self.matching.queries(params);
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<MatchValue>) -> Self {
        self.matching = self.matching.header(key, value);
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<MatchValue>,
    {
        self.matching = self.matching.headers(headers);
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.matching = self.matching.priority(priority);
        self
    }
}

impl From<MatchOptions> for RequestOptions {
    fn from(matching: MatchOptions) -> Self {
        Self {
            matching,
            ..Self::default()
        }
    }
}

/// 响应内容。`ResponseSpec::default()` 没有 status，会被
/// [`Stub::respond_with`](super::Stub::respond_with) 拒绝。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseSpec {
    pub(crate) status: Option<u16>,
    pub(crate) content_type: Option<String>,
    pub(crate) body: Option<Value>,
    pub(crate) headers: Option<BTreeMap<String, String>>,
    pub(crate) times: Times,
}

impl ResponseSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(status: u16) -> Self {
        Self::default().status(status)
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = non_null(Some(body.into()));
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers = Some(map_values(headers, Into::into));
        self
    }

    pub fn times(mut self, times: impl Into<Times>) -> Self {
        self.times = times.into();
        self
    }
}

impl From<u16> for ResponseSpec {
    fn from(status: u16) -> Self {
        Self::with_status(status)
    }
}
