//! AI解析モジュール
//!
//! - `cli_backend`: AI CLI（claude / codex / gemini）を非対話モードで呼び出す
//! - `attributes`: 履歴書テキストから候補者属性を抽出する
//!
//! 外部サービスとの境界は `ClassificationService` トレイト。テストでは
//! 固定レスポンスを返すスタブに差し替える。

mod attributes;
mod cli_backend;

pub use attributes::extract_attributes;
pub use cli_backend::CliBackend;

use crate::error::ServiceError;
use std::future::Future;

/// プロンプトを1回送ってテキスト応答を受け取るサービス
pub trait ClassificationService: Send + Sync {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, ServiceError>> + Send;
}
