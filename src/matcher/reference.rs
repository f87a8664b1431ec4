//! 参照リスト（対象校・受賞リスト1/2・QS50）の読み込み
//!
//! 1行1件のテキストファイル。前後空白は除去し、空行は無視する。

use crate::error::{ResumeSorterError, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// 参照リストのファイルパス（未指定のリストは空として扱う）
#[derive(Debug, Clone, Default)]
pub struct ListSources {
    pub target_schools: Option<PathBuf>,
    pub award_list1: Option<PathBuf>,
    pub award_list2: Option<PathBuf>,
    pub qs50: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceLists {
    pub target_schools: Vec<String>,
    pub award_list1: Vec<String>,
    pub award_list2: Vec<String>,
    pub qs50: Vec<String>,
}

impl ReferenceLists {
    pub fn load(sources: &ListSources) -> Result<Self> {
        let lists = Self {
            target_schools: read_list(sources.target_schools.as_deref())?,
            award_list1: read_list(sources.award_list1.as_deref())?,
            award_list2: read_list(sources.award_list2.as_deref())?,
            qs50: read_list(sources.qs50.as_deref())?,
        };

        info!(
            target_schools = lists.target_schools.len(),
            award_list1 = lists.award_list1.len(),
            award_list2 = lists.award_list2.len(),
            qs50 = lists.qs50.len(),
            "参照リスト読み込み完了"
        );

        Ok(lists)
    }
}

/// リスト本文を要素に分解する
pub fn parse_list(content: &str) -> Vec<String> {
    content
        .trim_start_matches('\u{feff}')
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_list(path: Option<&Path>) -> Result<Vec<String>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    std::fs::read_to_string(path)
        .map(|content| parse_list(&content))
        .map_err(|e| ResumeSorterError::ListLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_and_skips_blank_lines() {
        let content = "\u{feff}清华大学\n\n  北京大学  \r\n\t\nMIT\n";
        assert_eq!(parse_list(content), vec!["清华大学", "北京大学", "MIT"]);
    }

    #[test]
    fn test_load_with_no_sources_is_empty() {
        let lists = ReferenceLists::load(&ListSources::default()).unwrap();
        assert_eq!(lists, ReferenceLists::default());
    }

    #[test]
    fn test_load_reads_each_file() {
        let dir = tempfile::tempdir().unwrap();
        let schools = dir.path().join("schools.txt");
        let awards = dir.path().join("awards.txt");
        std::fs::write(&schools, "清华大学\n浙江大学\n").unwrap();
        std::fs::write(&awards, "ICPC World Finals\n").unwrap();

        let lists = ReferenceLists::load(&ListSources {
            target_schools: Some(schools),
            award_list1: Some(awards),
            ..ListSources::default()
        })
        .unwrap();

        assert_eq!(lists.target_schools, vec!["清华大学", "浙江大学"]);
        assert_eq!(lists.award_list1, vec!["ICPC World Finals"]);
        assert!(lists.award_list2.is_empty());
    }

    #[test]
    fn test_missing_file_is_list_load_error() {
        let result = ReferenceLists::load(&ListSources {
            qs50: Some(PathBuf::from("/nonexistent/qs50.txt")),
            ..ListSources::default()
        });
        match result {
            Err(ResumeSorterError::ListLoad { path, .. }) => assert!(path.ends_with("qs50.txt")),
            other => panic!("ListLoadエラーを期待: {:?}", other),
        }
    }
}
