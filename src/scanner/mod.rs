use crate::error::{ResumeSorterError, Result};
use crate::extractor::DocumentFormat;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub path: PathBuf,
    pub file_name: String,
    pub format: DocumentFormat,
}

pub fn scan_folder(folder: &Path) -> Result<Vec<ResumeFile>> {
    if !folder.is_dir() {
        return Err(ResumeSorterError::FolderNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(format) = DocumentFormat::from_path(path) {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();

            files.push(ResumeFile {
                path: path.to_path_buf(),
                file_name,
                format,
            });
        }
    }

    // ファイル名でソート
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}
