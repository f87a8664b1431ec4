//! 履歴書一括解析・分類リネームツール
//!
//! 純粋なロジックは `resume_sorter_common`、外部プロセス（AI CLI・OCR）と
//! ファイル操作はこのクレートが担当する。

pub mod ai_provider;
pub mod analyzer;
pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod matcher;
pub mod scanner;
