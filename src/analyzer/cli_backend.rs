//! AI CLI呼び出し
//!
//! プロンプトは引数で渡し、標準出力をそのまま応答とする。
//! 1回だけ実行し、リトライはしない。

use super::ClassificationService;
use crate::ai_provider::AiProvider;
use crate::config::Config;
use crate::error::ServiceError;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CliBackend {
    pub provider: AiProvider,
    pub model: Option<String>,
    pub timeout_seconds: u64,
    pub verbose: bool,
}

impl CliBackend {
    pub fn new(provider: AiProvider, config: &Config, verbose: bool) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            timeout_seconds: config.timeout_seconds,
            verbose,
        }
    }

    fn command(&self, prompt: &str) -> Command {
        let args = self.provider.prompt_args(prompt, self.model.as_deref());

        // Windowsではcmd /c経由
        #[cfg(windows)]
        let mut command = {
            let mut c = Command::new("cmd");
            c.arg("/c").arg(self.provider.command_name());
            c
        };

        #[cfg(not(windows))]
        let mut command = Command::new(self.provider.command_name());

        command.args(args).kill_on_drop(true);
        command
    }

    async fn run(&self, prompt: &str) -> Result<String, ServiceError> {
        let name = self.provider.command_name();
        if self.verbose {
            debug!(provider = name, prompt_chars = prompt.chars().count(), "AI CLI呼び出し");
        }

        let output = tokio::time::timeout(
            Duration::from_secs(self.timeout_seconds),
            self.command(prompt).output(),
        )
        .await
        .map_err(|_| ServiceError::Timeout(self.timeout_seconds))?
        .map_err(|e| ServiceError::Transport(format!("{} CLI実行エラー: {}", name, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ServiceError::Transport(format!(
                "{} CLI failed (code {:?}): {}",
                name,
                output.status.code(),
                stderr.trim()
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).to_string();
        if response.trim().is_empty() {
            return Err(ServiceError::Parse(format!("{} CLIの応答が空です", name)));
        }

        if self.verbose {
            let preview: String = response.chars().take(500).collect();
            debug!(provider = name, "レスポンス: {}", preview);
        }

        Ok(response)
    }
}

impl ClassificationService for CliBackend {
    async fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        self.run(prompt).await
    }
}
