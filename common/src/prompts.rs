//! プロンプト生成モジュール
//!
//! - build_extraction_prompt: 履歴書テキストからの属性抽出用
//! - build_school_match_prompt: 学校名のセマンティック照合用
//! - build_award_match_prompt: 受賞歴のセマンティック照合用

/// 学校名の同一視ルール（ローカルでは別名表を持たず、モデル側に渡す）
pub const SCHOOL_EQUIVALENCE_RULES: &[&str] = &[
    "A campus-, branch- or graduate-school-qualified name is the same institution as its parent (e.g. 清华大学深圳国际研究生院 = 清华大学, 北京大学深圳研究生院 = 北京大学).",
    "The Chinese name and the English name of the same institution are equivalent (e.g. Zhejiang University = 浙江大学).",
    "Common abbreviations are equivalent to the full name (e.g. 中科大 = 中国科学技术大学, HKUST = 香港科技大学).",
    "Different institutions that merely share a city or a word are NOT equivalent (e.g. 北京理工大学 != 北京大学).",
];

fn numbered(items: &[String]) -> String {
    if items.is_empty() {
        return "(empty)".to_string();
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 属性抽出プロンプト
pub fn build_extraction_prompt(resume_text: &str) -> String {
    format!(
        r#"You are a professional-grade resume parser. You will be given the plain text extracted from a resume file.
Return ONLY one JSON object with exactly these keys:

- "education_level": highest degree only, one of "Bachelor's", "Master's", "PhD"
- "name": full name of the candidate
- "major": major of the highest degree, in Simplified Chinese
- "grad_year": graduation year of the highest degree as a number
- "phd_school": in Simplified Chinese only
- "master_school": in Simplified Chinese only
- "bachelor_school": in Simplified Chinese only
- "awards": JSON array of awards or achievements, in the order they appear, normalized if possible
- "candidate_location": country where the candidate is located
- "is_qs50": "QS50" if the highest-degree institution is in the QS World University Rankings top 50, otherwise "No"
- "is_chinese_name": "Yes" if the name is a Chinese name, otherwise "No"

Rules:
- Graduation year: a date range means the candidate is still studying; estimate the completion year as start year + program length (PhD: +4, Master's: +2, Bachelor's: +4). A single year without a range is the graduation year unless it is explicitly marked otherwise.
- Schools: fill one school per degree level. If the resume mentions a school for a level, never omit it. If a level does not apply, use "NA".
- Location priority: an explicit location in the resume header, then the country of the highest-degree institution, then the country of the most recent employment if it is more recent than graduation, otherwise "Unknown".
- If any other field is not applicable, use "NA".
- Output JSON only. No explanations, no markdown.

Resume text:
{resume_text}"#
    )
}

/// 学校名照合プロンプト
pub fn build_school_match_prompt(subjects: &[String], targets: &[String]) -> String {
    let rules = SCHOOL_EQUIVALENCE_RULES
        .iter()
        .map(|r| format!("- {}", r))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a school-name matching assistant. For each school in "Candidate Schools", decide whether it is the same institution as an entry in "Target Schools".

Equivalence rules:
{rules}

Return ONLY a JSON array. One entry per candidate school:
- "subject": the candidate school exactly as given
- "matched": the matching entry copied exactly from "Target Schools", or null
- "list": 1 if matched, otherwise "None"
- "confidence": "High" if the match is certain, "Medium" if likely, "Low" otherwise

Candidate Schools:
{subjects}

Target Schools:
{targets}"#,
        rules = rules,
        subjects = numbered(subjects),
        targets = numbered(targets),
    )
}

/// 受賞歴照合プロンプト
pub fn build_award_match_prompt(subjects: &[String], list1: &[String], list2: &[String]) -> String {
    format!(
        r#"You are an award classification assistant. Compare each award in "Resume Awards" against two reference lists:
1. List 1: awards from competitions and challenges.
2. List 2: awards from top-tier conferences and research achievements.

Tasks:
1. For each resume award, decide whether it matches (exactly or semantically) an award in List 1 or List 2.
2. Matches List 1 only: "list": 1. Matches List 2 only: "list": 2. Matches both: "list": "Both". No match: "list": "None".

Return ONLY a JSON array. One entry per resume award:
- "subject": the resume award exactly as given
- "matched": the closest matching award copied exactly from List 1 or List 2, or null
- "list": 1, 2, "Both" or "None"
- "confidence": "High" if the match is exact or very close, "Medium" if likely, "Low" otherwise

Resume Awards:
{subjects}

List 1:
{list1}

List 2:
{list2}"#,
        subjects = numbered(subjects),
        list1 = numbered(list1),
        list2 = numbered(list2),
    )
}
