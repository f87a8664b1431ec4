//! 分類エンジン
//!
//! 候補者レコードと照合結果から最終ラベルを導出する。外部呼び出しはなく、
//! 同じ入力に対して常に同じ結果を返す。

use crate::local_match;
use crate::types::{
    AwardStatus, CandidateRecord, ClassificationResult, DegreeLevel, EducationLevel, JobType,
    MatchResult, MatchStatus, SchoolMatches,
};

/// 分類設定
#[derive(Debug, Clone)]
pub struct ClassificationEngine {
    /// この年より後に卒業する候補者はインターン扱い
    pub cutoff_year: i32,
    /// QS50照合のあいまい一致閾値
    pub threshold: f64,
    /// QS50リスト
    pub qs50_list: Vec<String>,
}

impl ClassificationEngine {
    pub fn new(cutoff_year: i32, threshold: f64, qs50_list: Vec<String>) -> Self {
        Self {
            cutoff_year,
            threshold,
            qs50_list,
        }
    }

    pub fn classify(
        &self,
        record: &CandidateRecord,
        school_matches: &SchoolMatches,
        award_matches: &[MatchResult],
    ) -> ClassificationResult {
        ClassificationResult {
            final_match_status: final_match_status(record.education_level, school_matches),
            job_type: job_type(record.grad_year, self.cutoff_year),
            award_status: award_status(award_matches),
            qs50: self.is_qs50(record),
        }
    }

    /// 最終学歴の学校をQS50リストとローカル照合する（モデルの主張は使わない）
    pub fn is_qs50(&self, record: &CandidateRecord) -> bool {
        record
            .highest_school()
            .map(|school| local_match::match_one(school, &self.qs50_list, self.threshold).is_match())
            .unwrap_or(false)
    }
}

/// 最終一致判定
///
/// 修士は修士校と学部校の両方が一致して初めて一致とする
pub fn final_match_status(level: EducationLevel, matches: &SchoolMatches) -> MatchStatus {
    let matched = match level {
        EducationLevel::PhD => matches.is_matched(DegreeLevel::PhD),
        EducationLevel::Master => {
            matches.is_matched(DegreeLevel::Master) && matches.is_matched(DegreeLevel::Bachelor)
        }
        EducationLevel::Bachelor | EducationLevel::Unknown => matches.is_matched(DegreeLevel::Bachelor),
    };

    if matched {
        MatchStatus::Match
    } else {
        MatchStatus::NotMatch
    }
}

pub fn job_type(grad_year: Option<i32>, cutoff_year: i32) -> JobType {
    match grad_year {
        Some(year) if year > cutoff_year => JobType::Intern,
        _ => JobType::FullTime,
    }
}

pub fn award_status(award_matches: &[MatchResult]) -> AwardStatus {
    let list1 = award_matches.iter().any(|m| m.tier.hits_list1());
    let list2 = award_matches.iter().any(|m| m.tier.hits_list2());

    match (list1, list2) {
        (true, true) => AwardStatus::BothTalent,
        (true, false) => AwardStatus::CompetitionTalent,
        (false, true) => AwardStatus::ConferenceTalent,
        (false, false) => AwardStatus::None,
    }
}
