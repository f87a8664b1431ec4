//! 一括処理モジュール
//!
//! 1ファイルずつ順番に処理する:
//! テキスト抽出 → 属性抽出 → 学校・受賞照合 → 分類 → ファイル名生成 → コピー
//!
//! ファイル単位の失敗は `ERROR - <元のファイル名>` としてコピーし、次のファイルへ進む。

use crate::analyzer::{extract_attributes, ClassificationService};
use crate::config::Config;
use crate::error::{ResumeSorterError, Result};
use crate::extractor::{OcrOptions, TextExtractor};
use crate::matcher::{resolve_awards, resolve_schools, ListSources, ReferenceLists};
use crate::scanner::{scan_folder, ResumeFile};
use indicatif::{ProgressBar, ProgressStyle};
use resume_sorter_common::{
    CandidateRecord, ClassificationEngine, ClassificationResult, FilenameBuilder, MatchResult,
    RunSummary, SchoolMatches,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub const ERROR_PREFIX: &str = "ERROR - ";
pub const SUMMARY_FILE: &str = "summary.txt";

/// 1ファイル分の解析結果
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub record: CandidateRecord,
    pub school_matches: SchoolMatches,
    pub award_matches: Vec<MatchResult>,
    pub classification: ClassificationResult,
    pub file_stem: String,
}

/// 1ファイル分の処理結果
#[derive(Debug)]
pub enum FileOutcome {
    Renamed {
        source: PathBuf,
        destination: PathBuf,
        analysis: Box<Analysis>,
    },
    Failed {
        source: PathBuf,
        destination: Option<PathBuf>,
        error: ResumeSorterError,
    },
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Renamed { .. })
    }
}

/// 参照リストの読み込み失敗（全ファイルに同じ失敗を記録する）
#[derive(Debug, Clone)]
struct ListLoadFailure {
    path: String,
    message: String,
}

impl ListLoadFailure {
    fn to_error(&self) -> ResumeSorterError {
        ResumeSorterError::ListLoad {
            path: self.path.clone(),
            message: self.message.clone(),
        }
    }
}

pub struct Pipeline<S> {
    service: S,
    extractor: TextExtractor,
    config: Config,
}

impl<S: ClassificationService> Pipeline<S> {
    pub fn new(service: S, config: Config) -> Self {
        let extractor = TextExtractor::new(OcrOptions {
            languages: config.ocr_languages.clone(),
            timeout_seconds: config.timeout_seconds,
            ..OcrOptions::default()
        });
        Self {
            service,
            extractor,
            config,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// 1ファイルを解析する（コピーはしない）
    pub async fn analyze_file(&self, path: &Path, lists: &ReferenceLists) -> Result<Analysis> {
        let text = self.extractor.extract(path).await;
        self.analyze_text(path, &text, lists).await
    }

    /// 抽出済みテキストを解析する
    pub async fn analyze_text(&self, path: &Path, text: &str, lists: &ReferenceLists) -> Result<Analysis> {
        if text.trim().is_empty() {
            return Err(ResumeSorterError::Extraction(path.display().to_string()));
        }

        let threshold = self.config.fuzzy_threshold;
        let mut record = extract_attributes(&self.service, text).await?;
        let school_matches = resolve_schools(&self.service, &record, lists, threshold).await;
        let award_matches = resolve_awards(&self.service, &record, lists, threshold).await;

        let engine = ClassificationEngine::new(
            self.config.intern_cutoff_year,
            threshold,
            lists.qs50.clone(),
        );
        let classification = engine.classify(&record, &school_matches, &award_matches);
        record.qs50_flag = classification.qs50;
        if record.qs50_asserted != record.qs50_flag {
            info!(
                name = %record.name,
                asserted = record.qs50_asserted,
                derived = record.qs50_flag,
                "QS50判定がモデルの回答と異なります"
            );
        }

        let file_stem = FilenameBuilder::new(&self.config.labels)
            .build(&record, &classification)
            .map_err(|e| ResumeSorterError::FilenameBuild(e.to_string()))?;

        Ok(Analysis {
            record,
            school_matches,
            award_matches,
            classification,
            file_stem,
        })
    }

    /// 1ファイルを処理し、結果に応じてコピーする
    async fn process_file(
        &self,
        file: &ResumeFile,
        lists: std::result::Result<&ReferenceLists, &ListLoadFailure>,
        output_dir: &Path,
    ) -> FileOutcome {
        let analyzed = match lists {
            Ok(lists) => self.analyze_file(&file.path, lists).await,
            Err(failure) => Err(failure.to_error()),
        };

        let copied = analyzed.and_then(|analysis| {
            let destination = renamed_destination(output_dir, &analysis.file_stem, &file.path);
            std::fs::copy(&file.path, &destination)?;
            Ok((destination, analysis))
        });

        match copied {
            Ok((destination, analysis)) => {
                info!(file = %file.file_name, to = %destination.display(), "コピー完了");
                FileOutcome::Renamed {
                    source: file.path.clone(),
                    destination,
                    analysis: Box::new(analysis),
                }
            }
            Err(e) => {
                warn!(file = %file.file_name, error = %e, "処理に失敗");
                let destination = copy_as_error(&file.path, &file.file_name, output_dir);
                FileOutcome::Failed {
                    source: file.path.clone(),
                    destination,
                    error: e,
                }
            }
        }
    }

    /// フォルダ内の履歴書を一括処理する
    ///
    /// 入力・出力フォルダが存在しない場合のみエラーで中断する。
    pub async fn run_batch(
        &self,
        source_dir: &Path,
        output_dir: &Path,
        sources: &ListSources,
    ) -> Result<(RunSummary, Vec<FileOutcome>)> {
        let files = scan_folder(source_dir)?;
        if !output_dir.is_dir() {
            return Err(ResumeSorterError::FolderNotFound(output_dir.display().to_string()));
        }

        let lists = ReferenceLists::load(sources).map_err(|e| {
            error!(error = %e, "参照リストを読み込めません。全ファイルをエラーとして扱います");
            match e {
                ResumeSorterError::ListLoad { path, message } => ListLoadFailure { path, message },
                other => ListLoadFailure {
                    path: String::new(),
                    message: other.to_string(),
                },
            }
        });

        println!("対象ファイル: {}件", files.len());
        let progress = progress_bar(files.len() as u64);

        let mut summary = RunSummary::default();
        let mut outcomes = Vec::with_capacity(files.len());

        for file in &files {
            progress.set_message(file.file_name.clone());
            let outcome = self.process_file(file, lists.as_ref(), output_dir).await;

            let mut file_summary = RunSummary::default();
            match &outcome {
                FileOutcome::Renamed { analysis, .. } => {
                    file_summary.record_success(&analysis.record, &analysis.classification)
                }
                FileOutcome::Failed { .. } => file_summary.record_failure(),
            }
            summary.merge(&file_summary);

            outcomes.push(outcome);
            progress.inc(1);
        }
        progress.finish_and_clear();
        info!(
            succeeded = outcomes.iter().filter(|o| o.is_success()).count(),
            total = outcomes.len(),
            "一括処理完了"
        );

        let report = summary.render(&self.config.labels);
        println!("{}", report);
        write_summary(output_dir, &report)?;

        Ok((summary, outcomes))
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    let progress = ProgressBar::new(len);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    progress
}

/// リネーム先パス（元の拡張子を維持。同名があれば " (2)" 等を付ける）
fn renamed_destination(output_dir: &Path, stem: &str, source: &Path) -> PathBuf {
    let extension = source
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();
    let with_extension = |name: String| {
        if extension.is_empty() {
            name
        } else {
            format!("{}.{}", name, extension)
        }
    };

    let mut destination = output_dir.join(with_extension(stem.to_string()));
    let mut n = 2;
    while destination.exists() {
        destination = output_dir.join(with_extension(format!("{} ({})", stem, n)));
        n += 1;
    }
    destination
}

/// 失敗したファイルを `ERROR - <名前>` でコピーする
fn copy_as_error(source: &Path, file_name: &str, output_dir: &Path) -> Option<PathBuf> {
    let destination = output_dir.join(format!("{}{}", ERROR_PREFIX, file_name));
    match std::fs::copy(source, &destination) {
        Ok(_) => Some(destination),
        Err(e) => {
            error!(file = %file_name, error = %e, "エラーコピーにも失敗");
            None
        }
    }
}

fn write_summary(output_dir: &Path, report: &str) -> Result<()> {
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let content = format!("Generated: {}\n{}", generated, report);
    std::fs::write(output_dir.join(SUMMARY_FILE), content)?;
    Ok(())
}
