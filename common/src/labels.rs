//! 出力ラベル定義
//!
//! ファイル名とサマリーに出力する文字列。受賞区分のラベルは
//! 運用によって「天才」「高潜」など表記が異なるため設定で切り替える。

use crate::types::{AwardStatus, EducationLevel, JobType, MatchStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSet {
    pub matched: String,
    pub not_matched: String,
    pub intern: String,
    pub full_time: String,
    pub phd: String,
    pub master: String,
    pub bachelor: String,
    pub unknown_level: String,
    pub competition_talent: String,
    pub conference_talent: String,
    pub both_talent: String,
    pub qs50: String,
}

impl Default for LabelSet {
    fn default() -> Self {
        Self {
            matched: "Match".into(),
            not_matched: "Not Match".into(),
            intern: "实习".into(),
            full_time: "全职".into(),
            phd: "博士".into(),
            master: "硕士".into(),
            bachelor: "本科".into(),
            unknown_level: "未知".into(),
            competition_talent: "竞赛人才".into(),
            conference_talent: "顶会人才".into(),
            both_talent: "天才".into(),
            qs50: "QS50".into(),
        }
    }
}

impl LabelSet {
    pub fn match_status(&self, status: MatchStatus) -> &str {
        match status {
            MatchStatus::Match => &self.matched,
            MatchStatus::NotMatch => &self.not_matched,
        }
    }

    pub fn job_type(&self, job_type: JobType) -> &str {
        match job_type {
            JobType::Intern => &self.intern,
            JobType::FullTime => &self.full_time,
        }
    }

    pub fn education_level(&self, level: EducationLevel) -> &str {
        match level {
            EducationLevel::PhD => &self.phd,
            EducationLevel::Master => &self.master,
            EducationLevel::Bachelor => &self.bachelor,
            EducationLevel::Unknown => &self.unknown_level,
        }
    }

    /// 受賞区分ラベル（該当なしはNone）
    pub fn award_status(&self, status: AwardStatus) -> Option<&str> {
        match status {
            AwardStatus::None => None,
            AwardStatus::CompetitionTalent => Some(&self.competition_talent),
            AwardStatus::ConferenceTalent => Some(&self.conference_talent),
            AwardStatus::BothTalent => Some(&self.both_talent),
        }
    }
}
