//! PDFの構造化テキスト抽出

use crate::error::{ResumeSorterError, Result};
use std::path::Path;

pub(super) fn extract_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;

    // pdf-extractは壊れたPDFでパニックすることがある
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(&bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ResumeSorterError::Extraction(format!(
            "pdf-extract失敗 '{}': {}",
            path.display(),
            e
        ))),
        Err(_) => Err(ResumeSorterError::Extraction(format!(
            "pdf-extractが異常終了 '{}'",
            path.display()
        ))),
    }
}
