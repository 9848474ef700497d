use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `/_vanilli/` 下的管理接口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Stubs,
    Expectations,
    Verify,
    Captures(&'a str),
    Ping,
    Dump,
}

impl Endpoint<'_> {
    /// 相对于管理接口 base url 的路径段
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Endpoint::Stubs => vec!["stubs"],
            Endpoint::Expectations => vec!["expectations"],
            Endpoint::Verify => vec!["verify"],
            Endpoint::Captures(id) => vec!["captures", id],
            Endpoint::Ping => vec!["ping"],
            Endpoint::Dump => vec!["dump"],
        }
    }
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments().join("/"))
    }
}

/// `GET verify` 的响应体
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct VerificationReport {
    #[serde(default)]
    pub errors: Vec<String>,
}

impl VerificationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message(&self) -> String {
        self.errors.join("\n")
    }
}

/// server 在某个 capture id 下记录的请求
///
/// 常用字段有类型，其余字段保存在 `extra` 中。
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Stubs.to_string(), "stubs");
        assert_eq!(Endpoint::Captures("abc").to_string(), "captures/abc");
        assert_eq!(Endpoint::Ping.segments(), vec!["ping"]);
    }

    #[test]
    fn test_report_message() {
        let report: VerificationReport =
            serde_json::from_value(json!({"errors": ["X unmet", "Y unmet"]})).unwrap();
        assert!(!report.is_ok());
        assert_eq!(report.message(), "X unmet\nY unmet");

        let empty: VerificationReport = serde_json::from_value(json!({})).unwrap();
        assert!(empty.is_ok());
    }

    #[test]
    fn test_capture_keeps_unknown_fields() {
        let capture: CapturedRequest = serde_json::from_value(json!({
            "body": {"name": "bob"},
            "contentType": "application/json",
            "url": "/users"
        }))
        .unwrap();
        assert_eq!(capture.body, Some(json!({"name": "bob"})));
        assert_eq!(capture.content_type.as_deref(), Some("application/json"));
        assert_eq!(capture.extra.get("url"), Some(&json!("/users")));
    }
}
