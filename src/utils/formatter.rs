use colored::*;
use comfy_table::{ContentArrangement, Table};
use serde_json::Value;

use crate::http::CapturedRequest;

/// 终端输出格式化（captures / verify / dump）
pub struct OutputFormatter {
    color: bool,
    /// 表格中 body 的最大显示长度
    max_body_len: usize,
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter {
    pub fn new() -> Self {
        Self {
            color: true,
            max_body_len: 200,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn format_captures(&self, capture_id: &str, captures: &[CapturedRequest]) -> String {
        if captures.is_empty() {
            let line = format!("No captures for '{}'", capture_id);
            return if self.color {
                line.yellow().to_string()
            } else {
                line
            };
        }

        let mut table = Table::new();
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["#", "Content-Type", "Body"]);

        for (index, capture) in captures.iter().enumerate() {
            table.add_row(vec![
                (index + 1).to_string(),
                capture.content_type.clone().unwrap_or_default(),
                self.body_preview(capture.body.as_ref()),
            ]);
        }

        table.to_string()
    }

    pub fn format_verification(&self, errors: Option<&str>) -> String {
        match errors {
            None => self.paint("✓ all expectations met", |s| s.green()),
            Some(message) => {
                let mut output = vec![self.paint("✗ verification failed", |s| s.red().bold())];
                for line in message.lines() {
                    output.push(format!("   {}", line));
                }
                output.join("\n")
            }
        }
    }

    pub fn format_dump(&self, dump: &str) -> String {
        // 尝试格式化 JSON，失败则显示原始内容
        self.try_format_json(dump)
            .unwrap_or_else(|| dump.to_string())
    }

    fn body_preview(&self, body: Option<&Value>) -> String {
        let text = match body {
            None => return String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        if text.chars().count() > self.max_body_len {
            let truncated: String = text.chars().take(self.max_body_len).collect();
            format!("{}…", truncated)
        } else {
            text
        }
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn try_format_json(&self, body: &str) -> Option<String> {
        let value: Value = serde_json::from_str(body).ok()?;
        serde_json::to_string_pretty(&value).ok()
    }
}
