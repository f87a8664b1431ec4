//! 出力ファイル名の生成
//!
//! 必須要素（一致判定-雇用形態-学歴-氏名-学校-専攻-卒業年）の後に、
//! 該当する場合のみ受賞区分・所在地・QS50を付加する。

use crate::error::{Error, Result};
use crate::labels::LabelSet;
use crate::types::{CandidateRecord, ClassificationResult};

/// 要素の区切り文字
pub const DELIMITER: &str = "-";

/// ファイル名（拡張子除く）の最大バイト数
pub const MAX_STEM_BYTES: usize = 200;

/// パス区切り等を `_` に置換し、空なら既定値を使う
pub fn sanitize_component(value: Option<&str>, placeholder: &str) -> String {
    let raw = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => placeholder,
    };
    raw.replace(['/', '\\', ':'], "_").trim().to_string()
}

fn is_unknown_location(location: &str) -> bool {
    let location = location.trim();
    location.is_empty() || location.eq_ignore_ascii_case("unknown")
}

pub struct FilenameBuilder<'a> {
    labels: &'a LabelSet,
}

impl<'a> FilenameBuilder<'a> {
    pub fn new(labels: &'a LabelSet) -> Self {
        Self { labels }
    }

    /// ファイル名の各要素（空要素は含まない）
    pub fn components(
        &self,
        record: &CandidateRecord,
        classification: &ClassificationResult,
    ) -> Vec<String> {
        let labels = self.labels;
        let grad_year = record.grad_year.map(|y| y.to_string());

        let mut components = vec![
            sanitize_component(Some(labels.match_status(classification.final_match_status)), ""),
            sanitize_component(Some(labels.job_type(classification.job_type)), ""),
            sanitize_component(Some(labels.education_level(record.education_level)), ""),
            sanitize_component(Some(record.name.as_str()), "Unknown Name"),
            sanitize_component(record.highest_school(), "Unknown School"),
            sanitize_component(Some(record.major.as_str()), "Unknown Major"),
            sanitize_component(grad_year.as_deref(), "Unknown Year"),
        ];

        if let Some(award) = labels.award_status(classification.award_status) {
            components.push(sanitize_component(Some(award), ""));
        }
        if !is_unknown_location(&record.candidate_location) {
            components.push(sanitize_component(Some(record.candidate_location.as_str()), ""));
        }
        if classification.qs50 {
            components.push(sanitize_component(Some(labels.qs50.as_str()), ""));
        }

        components.retain(|c| !c.is_empty());
        components
    }

    pub fn build(
        &self,
        record: &CandidateRecord,
        classification: &ClassificationResult,
    ) -> Result<String> {
        let stem = self.components(record, classification).join(DELIMITER);
        if stem.len() > MAX_STEM_BYTES {
            return Err(Error::Filename(format!(
                "ファイル名が長すぎます ({} bytes): {}",
                stem.len(),
                stem
            )));
        }
        Ok(stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AwardStatus, EducationLevel, JobType, MatchStatus, Schools};

    fn record() -> CandidateRecord {
        CandidateRecord {
            name: "李雷".into(),
            education_level: EducationLevel::PhD,
            major: "计算机科学/人工智能".into(),
            grad_year: Some(2026),
            schools: Schools {
                phd: Some("清华大学".into()),
                master: None,
                bachelor: Some("浙江大学".into()),
            },
            candidate_location: String::new(),
            ..Default::default()
        }
    }

    fn classification() -> ClassificationResult {
        ClassificationResult {
            final_match_status: MatchStatus::Match,
            job_type: JobType::Intern,
            award_status: AwardStatus::None,
            qs50: false,
        }
    }

    #[test]
    fn test_required_components_only() {
        let labels = LabelSet::default();
        let stem = FilenameBuilder::new(&labels).build(&record(), &classification()).unwrap();
        assert_eq!(stem, "Match-实习-博士-李雷-清华大学-计算机科学_人工智能-2026");
        assert_eq!(stem.split(DELIMITER).count(), 7);
        assert!(!stem.ends_with(DELIMITER));
    }

    #[test]
    fn test_optional_components_in_order() {
        let labels = LabelSet::default();
        let mut record = record();
        record.candidate_location = "China".into();
        let classification = ClassificationResult {
            award_status: AwardStatus::BothTalent,
            qs50: true,
            ..classification()
        };
        let stem = FilenameBuilder::new(&labels).build(&record, &classification).unwrap();
        assert!(stem.ends_with("-2026-天才-China-QS50"));
    }

    #[test]
    fn test_unknown_location_is_omitted() {
        let labels = LabelSet::default();
        let mut record = record();
        record.candidate_location = "Unknown".into();
        let components = FilenameBuilder::new(&labels).components(&record, &classification());
        assert_eq!(components.len(), 7);
    }

    #[test]
    fn test_placeholders_for_missing_fields() {
        let labels = LabelSet::default();
        let record = CandidateRecord::default();
        let classification = ClassificationResult {
            final_match_status: MatchStatus::NotMatch,
            job_type: JobType::FullTime,
            ..classification()
        };
        let stem = FilenameBuilder::new(&labels).build(&record, &classification).unwrap();
        assert_eq!(
            stem,
            "Not Match-全职-未知-Unknown Name-Unknown School-Unknown Major-Unknown Year"
        );
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component(Some(" a/b\\c:d "), "x"), "a_b_c_d");
        assert_eq!(sanitize_component(Some("   "), "Unknown"), "Unknown");
        assert_eq!(sanitize_component(None, "Unknown"), "Unknown");
    }

    #[test]
    fn test_too_long_stem_fails() {
        let labels = LabelSet::default();
        let mut record = record();
        record.major = "很长的专业名称".repeat(20);
        let result = FilenameBuilder::new(&labels).build(&record, &classification());
        assert!(result.is_err());
    }
}
