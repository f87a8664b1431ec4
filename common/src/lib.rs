//! Resume Sorter Common Library
//!
//! 外部呼び出しを含まない純粋なロジック（型・パーサー・照合・分類・ファイル名・集計）

pub mod types;
pub mod error;
pub mod labels;
pub mod parser;
pub mod prompts;
pub mod local_match;
pub mod classify;
pub mod filename;
pub mod summary;

pub use types::{
    AwardStatus, CandidateRecord, ClassificationResult, Confidence, DegreeLevel, EducationLevel,
    JobType, MatchResult, MatchSource, MatchStatus, SchoolMatches, Schools, Tier,
};
pub use error::{Error, Result};
pub use labels::LabelSet;
pub use parser::{clean_response, parse_candidate_response, parse_json_response, parse_semantic_response, SemanticEntry};
pub use prompts::{build_award_match_prompt, build_extraction_prompt, build_school_match_prompt};
pub use local_match::{match_lists, match_one, DEFAULT_THRESHOLD};
pub use classify::ClassificationEngine;
pub use filename::FilenameBuilder;
pub use summary::RunSummary;
