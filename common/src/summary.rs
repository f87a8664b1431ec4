//! 実行サマリー集計
//!
//! ファイルごとの結果を値として積み上げる。グローバルな状態は持たない。

use crate::labels::LabelSet;
use crate::types::{AwardStatus, CandidateRecord, ClassificationResult, EducationLevel, JobType, MatchStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub processed: usize,
    pub errors: usize,
    pub competition_talent: usize,
    pub conference_talent: usize,
    pub both_talent: usize,
    pub matched: usize,
    pub not_matched: usize,
    pub phd: usize,
    pub master: usize,
    /// 学歴不明は学部に含める
    pub bachelor: usize,
    pub intern: usize,
    pub full_time: usize,
    pub chinese_name: usize,
    pub non_chinese_name: usize,
    pub qs50: usize,
}

impl RunSummary {
    /// 成功した1件を集計
    pub fn record_success(&mut self, record: &CandidateRecord, classification: &ClassificationResult) {
        self.processed += 1;

        match classification.award_status {
            AwardStatus::CompetitionTalent => self.competition_talent += 1,
            AwardStatus::ConferenceTalent => self.conference_talent += 1,
            AwardStatus::BothTalent => self.both_talent += 1,
            AwardStatus::None => {}
        }

        match classification.final_match_status {
            MatchStatus::Match => self.matched += 1,
            MatchStatus::NotMatch => self.not_matched += 1,
        }

        match record.education_level {
            EducationLevel::PhD => self.phd += 1,
            EducationLevel::Master => self.master += 1,
            EducationLevel::Bachelor | EducationLevel::Unknown => self.bachelor += 1,
        }

        match classification.job_type {
            JobType::Intern => self.intern += 1,
            JobType::FullTime => self.full_time += 1,
        }

        if record.is_chinese_name {
            self.chinese_name += 1;
        } else {
            self.non_chinese_name += 1;
        }

        if classification.qs50 {
            self.qs50 += 1;
        }
    }

    /// 失敗した1件を集計
    pub fn record_failure(&mut self) {
        self.errors += 1;
    }

    /// 別のサマリーを合算
    pub fn merge(&mut self, other: &RunSummary) {
        self.processed += other.processed;
        self.errors += other.errors;
        self.competition_talent += other.competition_talent;
        self.conference_talent += other.conference_talent;
        self.both_talent += other.both_talent;
        self.matched += other.matched;
        self.not_matched += other.not_matched;
        self.phd += other.phd;
        self.master += other.master;
        self.bachelor += other.bachelor;
        self.intern += other.intern;
        self.full_time += other.full_time;
        self.chinese_name += other.chinese_name;
        self.non_chinese_name += other.non_chinese_name;
        self.qs50 += other.qs50;
    }

    pub fn total(&self) -> usize {
        self.processed + self.errors
    }

    /// summary.txt 用のテキスト
    pub fn render(&self, labels: &LabelSet) -> String {
        let rule = "----------------------------------------";
        let border = "========================================";
        let lines = [
            "[SUMMARY]".to_string(),
            border.to_string(),
            format!(" Processed: {}", self.processed),
            format!(" Errors: {}", self.errors),
            rule.to_string(),
            format!(" {}: {}", labels.competition_talent, self.competition_talent),
            format!(" {}: {}", labels.conference_talent, self.conference_talent),
            format!(" {}: {}", labels.both_talent, self.both_talent),
            rule.to_string(),
            format!(" Matched: {}", self.matched),
            format!(" Not Matched: {}", self.not_matched),
            rule.to_string(),
            format!(" PhD: {}", self.phd),
            format!(" Master's: {}", self.master),
            format!(" Bachelor's: {}", self.bachelor),
            rule.to_string(),
            format!(" Intern ({}): {}", labels.intern, self.intern),
            format!(" FullTime ({}): {}", labels.full_time, self.full_time),
            rule.to_string(),
            format!(" Chinese Name: {}", self.chinese_name),
            format!(" Non-Chinese Name: {}", self.non_chinese_name),
            rule.to_string(),
            format!(" {}: {}", labels.qs50, self.qs50),
            border.to_string(),
        ];
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}
