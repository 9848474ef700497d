use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::http::DEFAULT_PORT;

/// 启动 vanilli 进程所需的配置
///
/// 对应 `vanilli.toml` 中的 `[server]` 段，所有字段都有默认值。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 可执行文件名或路径
    pub binary: String,
    /// 放在 vanilli 参数之前的参数，例如 `binary = "node"` 时的脚本路径
    pub launcher_args: Vec<String>,
    pub port: u16,
    pub log_level: String,
    /// 静态文件根目录，未设置时不传 `--staticRoot`
    pub static_root: Option<PathBuf>,
    pub static_default: String,
    pub static_include: Vec<String>,
    pub static_exclude: Vec<String>,
    /// 等待 ping 成功的总时长
    pub startup_timeout_ms: u64,
    /// 两次 ping 之间的间隔
    pub probe_interval_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            binary: Self::DEFAULT_BINARY.to_string(),
            launcher_args: Vec::new(),
            port: DEFAULT_PORT,
            log_level: "warn".to_string(),
            static_root: None,
            static_default: "index.html".to_string(),
            static_include: Vec::new(),
            static_exclude: Vec::new(),
            startup_timeout_ms: 5_000,
            probe_interval_ms: 50,
        }
    }
}

impl ServerConfig {
    const DEFAULT_BINARY: &'static str = "vanilli";

    pub fn new(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    pub fn binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn launcher_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.launcher_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn static_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.static_root = Some(root.into());
        self
    }

    pub fn static_default(mut self, document: impl Into<String>) -> Self {
        self.static_default = document.into();
        self
    }

    pub fn static_include<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.static_include = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn static_exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.static_exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn startup_timeout(mut self, timeout: Duration) -> Self {
        self.startup_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn probe_interval(mut self, interval: Duration) -> Self {
        self.probe_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn startup_timeout_duration(&self) -> Duration {
        Duration::from_millis(self.startup_timeout_ms)
    }

    pub fn probe_interval_duration(&self) -> Duration {
        Duration::from_millis(self.probe_interval_ms)
    }

    /// 生成传给 vanilli 的命令行参数
    ///
    /// 示例: `--port 9000 --logLevel=warn --staticRoot=www --staticDefault=index.html --staticInclude=**/*.html,**/*.js`
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "--port".to_string(),
            self.port.to_string(),
            format!("--logLevel={}", self.log_level),
        ];

        if let Some(root) = &self.static_root {
            args.push(format!("--staticRoot={}", root.display()));
        }
        args.push(format!("--staticDefault={}", self.static_default));

        // 列表参数用逗号拼接，空列表不传
        if !self.static_include.is_empty() {
            args.push(format!("--staticInclude={}", self.static_include.join(",")));
        }
        if !self.static_exclude.is_empty() {
            args.push(format!("--staticExclude={}", self.static_exclude.join(",")));
        }

        args
    }
}
