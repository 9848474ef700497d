use std::path::Path;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tokio::time::{self, Instant};
use tracing::{debug, info, trace, warn};

use crate::http::VanilliClient;
use crate::server::config::ServerConfig;
use crate::{Result, VanilliError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Stopped,
    /// 进程已启动，ping 还没有成功
    Starting,
    Running,
}

/// 在测试期间持有 vanilli 子进程
///
/// supervisor 被 drop 时子进程随之被 kill，测试 panic 也不会遗留进程。
#[derive(Debug)]
pub struct VanilliServer {
    config: ServerConfig,
    child: Option<Child>,
    state: ServerState,
}

impl VanilliServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            child: None,
            state: ServerState::Stopped,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    pub fn port(&self) -> u16 {
        self.config.port
    }

    /// 指向本 server 端口的客户端
    pub fn client(&self) -> VanilliClient {
        VanilliClient::new(self.config.port)
    }

    /// 在 `working_dir` 中启动 vanilli，`ping` 成功后返回
    ///
    /// 超时或进程提前退出时，kill 子进程并返回错误。
    pub async fn start(&mut self, working_dir: impl AsRef<Path>) -> Result<()> {
        if self.child.is_some() {
            warn!(port = self.config.port, "vanilli already started");
            return Ok(());
        }

        let args = self.config.to_args();
        info!(
            binary = %self.config.binary,
            launcher_args = ?self.config.launcher_args,
            ?args,
            "starting vanilli"
        );

        let child = Command::new(&self.config.binary)
            .args(&self.config.launcher_args)
            .args(&args)
            .current_dir(working_dir.as_ref())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;
        self.child = Some(child);
        self.state = ServerState::Starting;

        match self.wait_until_live().await {
            Ok(()) => {
                self.state = ServerState::Running;
                info!(port = self.config.port, "vanilli is live");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "vanilli failed to start");
                self.stop().await?;
                Err(e)
            }
        }
    }

    async fn wait_until_live(&mut self) -> Result<()> {
        let client = self.client();
        let timeout = self.config.startup_timeout_duration();
        let interval = self.config.probe_interval_duration();
        let deadline = Instant::now() + timeout;

        loop {
            if let Some(child) = self.child.as_mut()
                && let Some(status) = child.try_wait()?
            {
                return Err(VanilliError::ServerExited(status.to_string()));
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            match time::timeout(remaining, client.ping()).await {
                Ok(Ok(())) => return Ok(()),
                Ok(Err(e)) => trace!(error = %e, "ping failed"),
                Err(_) => trace!("ping timed out"),
            }

            if Instant::now() >= deadline {
                return Err(VanilliError::StartupTimeout {
                    port: self.config.port,
                    waited: timeout,
                });
            }
            time::sleep(interval).await;
        }
    }

    /// kill 子进程并等待其退出，没有运行中的进程时什么也不做
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(mut child) = self.child.take() {
            // 已经退出的进程不能再 kill
            if child.try_wait()?.is_none() {
                child.kill().await?;
            }
            info!(port = self.config.port, "vanilli stopped");
        } else {
            debug!("stop called with no running vanilli");
        }
        self.state = ServerState::Stopped;
        Ok(())
    }
}
