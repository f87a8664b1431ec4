//! ページ画像化＋OCR
//!
//! `pdftoppm`（poppler-utils）でページをPNGにし、`tesseract` でページ順にOCRする。
//! DOCXは `soffice --headless` で一度PDFに変換してから同じ処理を行う。

use super::tool::run_tool;
use crate::error::{ResumeSorterError, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct OcrOptions {
    /// tesseractの言語（例: "chi_sim+eng"）
    pub languages: String,
    pub dpi: u32,
    /// 外部ツール1回あたりの上限
    pub timeout_seconds: u64,
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self {
            languages: "chi_sim+eng".into(),
            dpi: 300,
            timeout_seconds: 120,
        }
    }
}

/// PDFの全ページをOCRし、ページ順に連結する
pub(super) async fn ocr_pdf(path: &Path, options: &OcrOptions) -> Result<String> {
    let temp_dir = tempfile::tempdir()?;
    let prefix = temp_dir.path().join("page");

    let mut pdftoppm = Command::new("pdftoppm");
    pdftoppm
        .arg("-png")
        .arg("-r")
        .arg(options.dpi.to_string())
        .arg(path)
        .arg(&prefix);
    run_tool(pdftoppm, "pdftoppm", options.timeout_seconds).await?;

    // page-01.png, page-02.png ... はゼロ埋めなので名前順＝ページ順
    let mut pages: Vec<PathBuf> = std::fs::read_dir(temp_dir.path())?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().map(|ext| ext == "png").unwrap_or(false))
        .collect();
    pages.sort();

    if pages.is_empty() {
        return Err(ResumeSorterError::Extraction("pdftoppmが画像を出力しませんでした".into()));
    }

    info!(file = %path.display(), pages = pages.len(), "OCR開始");

    let mut text = String::new();
    for (i, page) in pages.iter().enumerate() {
        let mut tesseract = Command::new("tesseract");
        tesseract.arg(page).arg("stdout").arg("-l").arg(&options.languages);

        match run_tool(tesseract, "tesseract", options.timeout_seconds).await {
            Ok(output) => {
                text.push_str(&String::from_utf8_lossy(&output.stdout));
                text.push('\n');
            }
            Err(e) => warn!(page = i + 1, error = %e, "ページのOCRに失敗"),
        }
    }

    Ok(text)
}

/// Office文書をPDFに変換してからOCRする
pub(super) async fn ocr_office_document(path: &Path, options: &OcrOptions) -> Result<String> {
    let temp_dir = tempfile::tempdir()?;

    let mut soffice = Command::new("soffice");
    soffice
        .arg("--headless")
        .arg("--convert-to")
        .arg("pdf")
        .arg("--outdir")
        .arg(temp_dir.path())
        .arg(path);
    run_tool(soffice, "soffice", options.timeout_seconds).await?;

    let stem = path
        .file_stem()
        .ok_or_else(|| ResumeSorterError::Extraction(format!("ファイル名が不正: {}", path.display())))?;
    let pdf_path = temp_dir.path().join(stem).with_extension("pdf");
    if !pdf_path.exists() {
        return Err(ResumeSorterError::Extraction("PDF変換結果が見つかりません".into()));
    }

    ocr_pdf(&pdf_path, options).await
}
