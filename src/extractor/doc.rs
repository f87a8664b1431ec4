//! 旧形式Word（.doc）抽出。antiwordに委譲する

use super::tool::run_tool;
use crate::error::{ResumeSorterError, Result};
use std::path::Path;
use tokio::process::Command;

pub(super) async fn extract_text(path: &Path, timeout_seconds: u64) -> Result<String> {
    if !cfg!(any(target_os = "linux", target_os = "macos")) {
        return Err(ResumeSorterError::Extraction(
            ".docの抽出はLinux/macOSのみ対応".into(),
        ));
    }

    let mut antiword = Command::new("antiword");
    antiword.arg(path);
    let output = run_tool(antiword, "antiword", timeout_seconds).await?;

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
