//! 文書テキスト抽出モジュール
//!
//! 形式ごとに段階的なフォールバックでプレーンテキストを得る:
//! - PDF: pdf-extract → ページ画像化＋OCR
//! - DOCX: 段落抽出 → 全テキストノード抽出 → PDF変換＋OCR
//! - DOC: antiword（Linux/macOSのみ）
//!
//! 各段のエラーはその場でログに残して次の段へ進む。全段で失敗した場合のみ
//! 空文字列を返し、エラーは呼び出し元へ伝播しない。
//! 外部ツールは1回ごとに `OcrOptions::timeout_seconds` で打ち切る。

mod doc;
mod docx;
mod ocr;
mod pdf;
mod tool;

pub use ocr::OcrOptions;

use crate::error::Result;
use std::future::Future;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Doc,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "doc" => Some(DocumentFormat::Doc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextExtractor {
    ocr: OcrOptions,
}

impl TextExtractor {
    pub fn new(ocr: OcrOptions) -> Self {
        Self { ocr }
    }

    /// テキストを抽出する。取得できなければ空文字列
    pub async fn extract(&self, path: &Path) -> String {
        let Some(format) = DocumentFormat::from_path(path) else {
            debug!(file = %path.display(), "未対応の拡張子");
            return String::new();
        };

        let text = match format {
            DocumentFormat::Pdf => {
                if let Some(text) = attempt("pdf-extract", path, async { pdf::extract_text(path) }).await {
                    return text;
                }
                attempt("pdf-ocr", path, ocr::ocr_pdf(path, &self.ocr)).await
            }
            DocumentFormat::Docx => {
                if let Some(text) =
                    attempt("docx-paragraphs", path, async { docx::extract_paragraphs(path) }).await
                {
                    return text;
                }
                if let Some(text) = attempt("docx-plain", path, async { docx::extract_plain(path) }).await {
                    return text;
                }
                attempt("docx-ocr", path, ocr::ocr_office_document(path, &self.ocr)).await
            }
            DocumentFormat::Doc => {
                attempt("antiword", path, doc::extract_text(path, self.ocr.timeout_seconds)).await
            }
        };

        text.unwrap_or_default()
    }
}

/// 1段分の抽出を試す。空またはエラーならNone
async fn attempt<F>(tier: &str, path: &Path, extract: F) -> Option<String>
where
    F: Future<Output = Result<String>>,
{
    match extract.await {
        Ok(text) if !text.trim().is_empty() => {
            debug!(tier, file = %path.display(), chars = text.chars().count(), "テキスト抽出成功");
            Some(text)
        }
        Ok(_) => {
            warn!(tier, file = %path.display(), "テキストが空のため次の方法を試します");
            None
        }
        Err(e) => {
            warn!(tier, file = %path.display(), error = %e, "テキスト抽出に失敗");
            None
        }
    }
}
