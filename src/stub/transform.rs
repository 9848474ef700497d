//! 请求条件和响应共用的纯函数

use std::collections::BTreeMap;

use serde_json::Value;

use super::types::MatchValue;
use crate::{Result, VanilliError};

pub const JSON_CONTENT_TYPE: &str = "application/json";

pub(crate) const URL_MISSING: &str = "Url is missing.";
pub(crate) const STATUS_MISSING: &str = "Status code is missing.";
pub(crate) const BODY_WITHOUT_CONTENT_TYPE: &str =
    "Body was specified for but content-type was missing.";

/// 有 body 时必须同时有 content type
pub fn fail_body_with_no_content_type(
    body: Option<&Value>,
    content_type: Option<&str>,
) -> Result<()> {
    if body.is_some() && content_type.is_none() {
        return Err(VanilliError::validation(BODY_WITHOUT_CONTENT_TYPE));
    }
    Ok(())
}

/// content type 不是 `application/json` 时，对象 body 以 JSON 文本发送；
/// 是 `application/json` 时保持原结构。
pub fn stringify_non_json_body(body: Option<Value>, content_type: Option<&str>) -> Option<Value> {
    match body {
        Some(Value::Object(map)) if content_type != Some(JSON_CONTENT_TYPE) => {
            Some(Value::String(Value::Object(map).to_string()))
        }
        other => other,
    }
}

/// null 与未设置等价，不会出现在请求里
pub fn non_null(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

/// 去掉值为 null 的匹配项，映射本身保留
pub fn strip_null_matches(map: BTreeMap<String, MatchValue>) -> BTreeMap<String, MatchValue> {
    map.into_iter().filter(|(_, value)| !value.is_null()).collect()
}

/// 对键值集合中的每个值调用 `f`
pub fn map_values<I, K, V, T, F>(entries: I, f: F) -> BTreeMap<String, T>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    F: Fn(V) -> T,
{
    entries
        .into_iter()
        .map(|(key, value)| (key.into(), f(value)))
        .collect()
}
