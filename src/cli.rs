use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use vanilli::utils::OutputFormatter;
use vanilli::{ConfigLoader, VanilliClient, VanilliConfig, VanilliError, VanilliServer};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about = "Drive a vanilli stub server", long_about = None)]
pub struct Cli {
    /// 配置文件路径（默认查找 vanilli.toml）
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 覆盖 vanilli 所在主机
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// 覆盖 vanilli 端口（客户端与服务端同时生效）
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// 启动 vanilli，Ctrl-C 后停止
    Start {
        /// 工作目录
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// 静态文件根目录
        #[arg(long)]
        static_root: Option<PathBuf>,
    },
    /// 检查 vanilli 是否存活
    Ping,
    /// 清除所有 stub 和 expectation
    Clear,
    /// 校验 expectation
    Verify,
    /// 查看某个 capture id 下记录的请求
    Captures {
        id: String,
        /// 只显示最后一条
        #[arg(long)]
        last: bool,
        /// 输出原始 JSON
        #[arg(long)]
        json: bool,
    },
    /// 输出服务端诊断信息
    Dump,
}

impl Cli {
    /// 加载配置并应用命令行覆盖
    fn resolve_config(&self) -> Result<VanilliConfig> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from_path(path)?,
            None => ConfigLoader::find_and_load().unwrap_or_default(),
        };

        if let Some(host) = &self.host {
            config.client.host = host.clone();
        }
        if let Some(port) = self.port {
            config.client.port = port;
            config.server.port = port;
        }

        Ok(config)
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    let client = VanilliClient::from_config(&config.client);
    let formatter = OutputFormatter::new();

    match cli.command {
        Commands::Start { dir, static_root } => {
            let mut server_config = config.server;
            if let Some(root) = static_root {
                server_config = server_config.static_root(root);
            }
            let mut server = VanilliServer::new(server_config);
            server.start(&dir).await?;
            println!(
                "{} vanilli listening on port {} (Ctrl-C to stop)",
                "✓".green(),
                server.port()
            );
            tokio::signal::ctrl_c().await?;
            server.stop().await?;
        }
        Commands::Ping => {
            client.ping().await?;
            println!("{} vanilli is live at {}", "✓".green(), client.base_url()?);
        }
        Commands::Clear => {
            client.clear().await?;
            println!("{} stubs cleared", "✓".green());
        }
        Commands::Verify => match client.verify().await {
            Ok(()) => println!("{}", formatter.format_verification(None)),
            Err(VanilliError::Verification(message)) => {
                println!("{}", formatter.format_verification(Some(&message)));
                return Err(anyhow::anyhow!("verification failed"));
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Captures { id, last, json } => {
            let mut captures = client.get_captures(&id).await?;
            if last {
                captures = captures.pop().into_iter().collect();
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&captures)?);
            } else {
                println!("{}", formatter.format_captures(&id, &captures));
            }
        }
        Commands::Dump => {
            let dump = client.dump().await?;
            println!("{}", formatter.format_dump(&dump));
        }
    }

    Ok(())
}
