//! 外部ツール（pdftoppm / tesseract / soffice / antiword）の実行

use crate::error::{ResumeSorterError, Result};
use std::io::ErrorKind;
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// 1回実行して出力を返す。`timeout_seconds` を超えたらプロセスを止めてエラー
pub(super) async fn run_tool(mut command: Command, label: &str, timeout_seconds: u64) -> Result<Output> {
    command.kill_on_drop(true);

    let output = tokio::time::timeout(Duration::from_secs(timeout_seconds), command.output())
        .await
        .map_err(|_| {
            ResumeSorterError::CliExecution(format!("{}が{}秒以内に終了しませんでした", label, timeout_seconds))
        })?
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ResumeSorterError::CliExecution(format!("{}が見つかりません", label)),
            _ => ResumeSorterError::CliExecution(format!("{}の実行に失敗: {}", label, e)),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ResumeSorterError::CliExecution(format!(
            "{} failed (code {:?}): {}",
            label,
            output.status.code(),
            stderr.trim()
        )));
    }
    Ok(output)
}
