use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Result, VanilliError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl FromStr for Method {
    type Err = VanilliError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "PATCH" => Ok(Method::Patch),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            _ => Err(VanilliError::validation(format!(
                "Invalid HTTP method: {}",
                s
            ))),
        }
    }
}

impl Method {
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// server 用来匹配请求字段的值
///
/// 普通值原样发送。[`Regex`] 以 `{"regex": "<source>"}` 发送，由 server 端编译，
/// 客户端只发送正则源码。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchValue {
    Regex { regex: String },
    Exact(Value),
}

impl MatchValue {
    pub fn regex(source: impl Into<String>) -> Self {
        MatchValue::Regex {
            regex: source.into(),
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, MatchValue::Regex { .. })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, MatchValue::Exact(Value::Null))
    }

    /// null 或空字符串不能作为 url
    pub(crate) fn is_missing(&self) -> bool {
        match self {
            MatchValue::Exact(Value::Null) => true,
            MatchValue::Exact(Value::String(s)) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<Regex> for MatchValue {
    fn from(re: Regex) -> Self {
        MatchValue::regex(re.as_str())
    }
}

impl From<&Regex> for MatchValue {
    fn from(re: &Regex) -> Self {
        MatchValue::regex(re.as_str())
    }
}

impl From<Value> for MatchValue {
    fn from(value: Value) -> Self {
        MatchValue::Exact(value)
    }
}

impl From<&str> for MatchValue {
    fn from(s: &str) -> Self {
        MatchValue::Exact(Value::from(s))
    }
}

impl From<String> for MatchValue {
    fn from(s: String) -> Self {
        MatchValue::Exact(Value::from(s))
    }
}

impl From<&String> for MatchValue {
    fn from(s: &String) -> Self {
        MatchValue::Exact(Value::from(s.as_str()))
    }
}

impl From<i64> for MatchValue {
    fn from(n: i64) -> Self {
        MatchValue::Exact(Value::from(n))
    }
}

impl From<i32> for MatchValue {
    fn from(n: i32) -> Self {
        MatchValue::Exact(Value::from(n))
    }
}

impl From<u32> for MatchValue {
    fn from(n: u32) -> Self {
        MatchValue::Exact(Value::from(n))
    }
}

impl From<bool> for MatchValue {
    fn from(b: bool) -> Self {
        MatchValue::Exact(Value::from(b))
    }
}

/// stub 可被匹配的次数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Times {
    Exactly(u32),
    /// 不限次数。序列化时省略 `times`，server 把缺失视为不限
    Any,
}

impl Default for Times {
    fn default() -> Self {
        Times::Exactly(1)
    }
}

impl From<u32> for Times {
    fn from(n: u32) -> Self {
        Times::Exactly(n)
    }
}

impl Times {
    pub fn count(&self) -> Option<u32> {
        match self {
            Times::Exactly(n) => Some(*n),
            Times::Any => None,
        }
    }
}

/// stub 适用于哪些请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    pub method: Method,
    pub url: MatchValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<BTreeMap<String, MatchValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, MatchValue>>,
}

/// 匹配成功后 server 返回的响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StubResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// 响应前的延迟（毫秒）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_roundtrip_str() {
        assert_eq!(Method::parse("get").unwrap(), Method::Get);
        assert_eq!(Method::parse("DELETE").unwrap(), Method::Delete);
        assert_eq!(Method::Head.to_string(), "HEAD");
        assert!(Method::parse("FETCH").is_err());
    }

    #[test]
    fn test_method_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Method::Put).unwrap(), r#""PUT""#);
    }

    #[test]
    fn test_regex_serializes_as_source_wrapper() {
        let value = MatchValue::from(Regex::new(r"^/users/\d+$").unwrap());
        assert!(value.is_regex());
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            serde_json::json!({ "regex": r"^/users/\d+$" })
        );
    }

    #[test]
    fn test_plain_values_pass_through() {
        assert_eq!(
            serde_json::to_value(MatchValue::from("/my/url")).unwrap(),
            serde_json::json!("/my/url")
        );
        assert_eq!(
            serde_json::to_value(MatchValue::from(1)).unwrap(),
            serde_json::json!(1)
        );
    }

    #[test]
    fn test_missing_url_values() {
        assert!(MatchValue::from("").is_missing());
        assert!(MatchValue::Exact(Value::Null).is_missing());
        assert!(!MatchValue::from("/").is_missing());
        assert!(!MatchValue::regex("").is_missing());
    }

    #[test]
    fn test_times_default_and_any() {
        assert_eq!(Times::default().count(), Some(1));
        assert_eq!(Times::from(666).count(), Some(666));
        assert_eq!(Times::Any.count(), None);
    }

    #[test]
    fn test_empty_response_serializes_as_empty_object() {
        let json = serde_json::to_string(&StubResponse::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
