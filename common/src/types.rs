//! パイプラインの型定義
//!
//! CLI本体とテストで共有される型:
//! - CandidateRecord: 履歴書から抽出した候補者属性
//! - MatchResult: 学校・受賞の照合結果
//! - ClassificationResult: 最終ラベル

use serde::{Deserialize, Serialize};

/// 最終学歴
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EducationLevel {
    Bachelor,
    Master,
    PhD,
    #[default]
    Unknown,
}

impl EducationLevel {
    /// モデル出力のラベル（英語・中国語）を解釈する
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "phd" | "ph.d" | "ph.d." | "博士" | "博士研究生" => EducationLevel::PhD,
            "master's" | "master" | "masters" | "硕士" | "硕士研究生" | "研究生" => {
                EducationLevel::Master
            }
            "bachelor's" | "bachelor" | "bachelors" | "本科" | "学士" => EducationLevel::Bachelor,
            s if s.starts_with("doctor") => EducationLevel::PhD,
            s if s.starts_with("master") => EducationLevel::Master,
            s if s.starts_with("bachelor") => EducationLevel::Bachelor,
            _ => EducationLevel::Unknown,
        }
    }

    /// 在学中の場合の修業年数（卒業年の推定に使用）
    pub fn program_years(&self) -> i32 {
        match self {
            EducationLevel::PhD => 4,
            EducationLevel::Master => 2,
            EducationLevel::Bachelor | EducationLevel::Unknown => 4,
        }
    }

    /// 学校照合に使う学位区分（不明は学部扱い）
    pub fn degree(&self) -> DegreeLevel {
        match self {
            EducationLevel::PhD => DegreeLevel::PhD,
            EducationLevel::Master => DegreeLevel::Master,
            EducationLevel::Bachelor | EducationLevel::Unknown => DegreeLevel::Bachelor,
        }
    }
}

impl std::fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EducationLevel::Bachelor => write!(f, "Bachelor's"),
            EducationLevel::Master => write!(f, "Master's"),
            EducationLevel::PhD => write!(f, "PhD"),
            EducationLevel::Unknown => write!(f, "Unknown"),
        }
    }
}

/// 学位区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DegreeLevel {
    Bachelor,
    Master,
    PhD,
}

impl DegreeLevel {
    pub const ALL: [DegreeLevel; 3] = [DegreeLevel::PhD, DegreeLevel::Master, DegreeLevel::Bachelor];
}

/// 学位ごとの学校名（該当なしはNone）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schools {
    pub phd: Option<String>,
    pub master: Option<String>,
    pub bachelor: Option<String>,
}

impl Schools {
    pub fn get(&self, degree: DegreeLevel) -> Option<&str> {
        match degree {
            DegreeLevel::PhD => self.phd.as_deref(),
            DegreeLevel::Master => self.master.as_deref(),
            DegreeLevel::Bachelor => self.bachelor.as_deref(),
        }
    }

    /// 学校名が存在する学位を (学位, 学校名) で列挙
    pub fn present(&self) -> impl Iterator<Item = (DegreeLevel, &str)> {
        DegreeLevel::ALL
            .into_iter()
            .filter_map(move |degree| self.get(degree).map(|school| (degree, school)))
    }
}

/// 候補者レコード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub is_chinese_name: bool,
    pub education_level: EducationLevel,
    pub major: String,
    pub grad_year: Option<i32>,
    pub schools: Schools,
    pub awards: Vec<String>,
    /// 所在国（不明時は "Unknown"）
    pub candidate_location: String,
    /// ローカル照合で導出したQS50フラグ
    pub qs50_flag: bool,
    /// 抽出モデルが主張したQS50フラグ（監査用、ラベルには使わない）
    pub qs50_asserted: bool,
}

impl CandidateRecord {
    /// 最終学歴の学校名
    pub fn highest_school(&self) -> Option<&str> {
        self.schools.get(self.education_level.degree())
    }
}

/// どの参照リストに一致したか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tier {
    #[default]
    None,
    List1,
    List2,
    Both,
}

impl Tier {
    pub fn from_flags(list1: bool, list2: bool) -> Self {
        match (list1, list2) {
            (true, true) => Tier::Both,
            (true, false) => Tier::List1,
            (false, true) => Tier::List2,
            (false, false) => Tier::None,
        }
    }

    pub fn is_match(&self) -> bool {
        !matches!(self, Tier::None)
    }

    pub fn hits_list1(&self) -> bool {
        matches!(self, Tier::List1 | Tier::Both)
    }

    pub fn hits_list2(&self) -> bool {
        matches!(self, Tier::List2 | Tier::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Confidence {
    #[default]
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" => Confidence::High,
            "medium" => Confidence::Medium,
            _ => Confidence::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchSource {
    Local,
    Semantic,
}

/// 照合結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub subject: String,
    pub matched_reference: Option<String>,
    pub tier: Tier,
    pub confidence: Confidence,
    pub source: MatchSource,
}

impl MatchResult {
    /// 未解決（どのリストにも一致しない）結果
    pub fn unresolved(subject: impl Into<String>, source: MatchSource) -> Self {
        Self {
            subject: subject.into(),
            matched_reference: None,
            tier: Tier::None,
            confidence: Confidence::Low,
            source,
        }
    }

    pub fn is_match(&self) -> bool {
        self.tier.is_match()
    }
}

/// 学位ごとの学校照合結果（学校名がない学位はNone）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchoolMatches {
    pub phd: Option<MatchResult>,
    pub master: Option<MatchResult>,
    pub bachelor: Option<MatchResult>,
}

impl SchoolMatches {
    pub fn get(&self, degree: DegreeLevel) -> Option<&MatchResult> {
        match degree {
            DegreeLevel::PhD => self.phd.as_ref(),
            DegreeLevel::Master => self.master.as_ref(),
            DegreeLevel::Bachelor => self.bachelor.as_ref(),
        }
    }

    pub fn set(&mut self, degree: DegreeLevel, result: MatchResult) {
        match degree {
            DegreeLevel::PhD => self.phd = Some(result),
            DegreeLevel::Master => self.master = Some(result),
            DegreeLevel::Bachelor => self.bachelor = Some(result),
        }
    }

    pub fn is_matched(&self, degree: DegreeLevel) -> bool {
        self.get(degree).map(MatchResult::is_match).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    Match,
    NotMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    Intern,
    FullTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AwardStatus {
    #[default]
    None,
    CompetitionTalent,
    ConferenceTalent,
    BothTalent,
}

/// 分類結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub final_match_status: MatchStatus,
    pub job_type: JobType,
    pub award_status: AwardStatus,
    pub qs50: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_education_level_from_label() {
        assert_eq!(EducationLevel::from_label("PhD"), EducationLevel::PhD);
        assert_eq!(EducationLevel::from_label("博士"), EducationLevel::PhD);
        assert_eq!(EducationLevel::from_label(" Master's "), EducationLevel::Master);
        assert_eq!(EducationLevel::from_label("硕士"), EducationLevel::Master);
        assert_eq!(EducationLevel::from_label("Bachelor of Science"), EducationLevel::Bachelor);
        assert_eq!(EducationLevel::from_label("本科"), EducationLevel::Bachelor);
        assert_eq!(EducationLevel::from_label("NA"), EducationLevel::Unknown);
    }

    #[test]
    fn test_unknown_level_uses_bachelor_school() {
        let record = CandidateRecord {
            schools: Schools {
                phd: None,
                master: Some("北京大学".into()),
                bachelor: Some("浙江大学".into()),
            },
            ..Default::default()
        };
        assert_eq!(record.highest_school(), Some("浙江大学"));
    }

    #[test]
    fn test_tier_from_flags() {
        assert_eq!(Tier::from_flags(true, true), Tier::Both);
        assert_eq!(Tier::from_flags(true, false), Tier::List1);
        assert_eq!(Tier::from_flags(false, true), Tier::List2);
        assert_eq!(Tier::from_flags(false, false), Tier::None);
        assert!(Tier::Both.hits_list1() && Tier::Both.hits_list2());
        assert!(!Tier::None.is_match());
    }

    #[test]
    fn test_schools_present_order() {
        let schools = Schools {
            phd: Some("MIT".into()),
            master: None,
            bachelor: Some("清华大学".into()),
        };
        let present: Vec<_> = schools.present().collect();
        assert_eq!(present, vec![(DegreeLevel::PhD, "MIT"), (DegreeLevel::Bachelor, "清华大学")]);
    }
}
