use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::http::{DEFAULT_HOST, DEFAULT_PORT};
use crate::server::ServerConfig;
use crate::{Result, VanilliError};

/// 客户端连接配置（`[client]` 段）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// 完整的配置文件
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VanilliConfig {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "vanilli.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<VanilliConfig> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            VanilliError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<VanilliConfig> {
        toml::from_str(content)
            .map_err(|e| VanilliError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录
    /// 2. 父目录递归查找
    /// 3. 用户配置目录 ~/.config/vanilli/
    pub fn find_and_load() -> Option<VanilliConfig> {
        Self::try_load_from_current_dir().or_else(Self::try_load_from_user_dir)
    }

    /// 从给定目录开始向上查找
    pub fn find_from<P: AsRef<Path>>(start: P) -> Option<VanilliConfig> {
        let mut current = start.as_ref().to_path_buf();

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return match Self::load_from_path(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), error = %e, "ignoring config file");
                        None
                    }
                };
            }

            // 尝试父目录
            if !current.pop() {
                break;
            }
        }

        None
    }

    fn try_load_from_current_dir() -> Option<VanilliConfig> {
        let current = std::env::current_dir().ok()?;
        Self::find_from(current)
    }

    fn try_load_from_user_dir() -> Option<VanilliConfig> {
        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("vanilli").join(Self::CONFIG_FILE);

        if config_path.exists() {
            Self::load_from_path(&config_path).ok()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_from_path() {
        let config_content = r#"
[client]
host = "127.0.0.1"
port = 9100

[server]
port = 9100
log_level = "info"
static_root = "www"
static_exclude = ["*.map"]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = ConfigLoader::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.client.host, "127.0.0.1");
        assert_eq!(config.client.port, 9100);
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.server.static_exclude, vec!["*.map"]);
        assert_eq!(config.server.static_default, "index.html");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ConfigLoader::parse("").unwrap();
        assert_eq!(config, VanilliConfig::default());
        assert_eq!(config.client.port, 9000);
        assert_eq!(config.client.host, "localhost");
    }

    #[test]
    fn test_invalid_config() {
        let err = ConfigLoader::parse("[client]\nport = \"abc\"").unwrap_err();
        assert!(matches!(err, VanilliError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::load_from_path("/definitely/not/here/vanilli.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_find_from_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("vanilli.toml"),
            "[client]\nport = 9200\n",
        )
        .unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = ConfigLoader::find_from(&nested).unwrap();
        assert_eq!(config.client.port, 9200);
    }
}
