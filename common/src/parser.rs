//! APIレスポンスパーサー
//!
//! AI CLIのレスポンスからJSONを取り出し、候補者レコードと
//! 照合結果に変換する。クリーンアップは1回だけ行い、反復的な修復はしない。

use crate::error::{Error, Result};
use crate::types::{CandidateRecord, Confidence, EducationLevel, Schools, Tier};
use regex::Regex;
use serde_json::{Map, Value};

lazy_static::lazy_static! {
    static ref CODE_FENCE_RE: Regex = Regex::new(r"```(?:json|JSON)?").unwrap();
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",\s*([}\]])").unwrap();
    static ref PAREN_RE: Regex = Regex::new(r"\s*[\(（][^\)）]*[\)）]").unwrap();
    static ref YEAR_RE: Regex = Regex::new(r"(?:19|20)\d{2}").unwrap();
    static ref OPEN_END_RE: Regex =
        Regex::new(r"(?i)(至今|今|present|now|current|ongoing|expected|预计|在读)").unwrap();
}

/// コードフェンスと末尾カンマを除去する
///
/// # Examples
/// ```
/// use resume_sorter_common::clean_response;
///
/// let cleaned = clean_response("```json\n{\"a\": [1, 2,],}\n```");
/// assert_eq!(cleaned, "{\"a\": [1, 2]}");
/// ```
pub fn clean_response(response: &str) -> String {
    let without_fences = CODE_FENCE_RE.replace_all(response, "");
    TRAILING_COMMA_RE
        .replace_all(without_fences.trim(), "$1")
        .into_owned()
}

/// 取り出すJSONの形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
    /// 先に現れた方
    Any,
}

/// `[` の直後（空白を除く）が `{` か `]` である位置。"[info]" のようなログ行は飛ばす
fn array_start(cleaned: &str) -> Option<usize> {
    cleaned.match_indices('[').map(|(i, _)| i).find(|&i| {
        matches!(cleaned[i + 1..].trim_start().chars().next(), Some('{') | Some(']'))
    })
}

/// クリーンアップ済み文字列から指定した形の最外側JSONを切り出す
fn locate_json(cleaned: &str, shape: JsonShape) -> Result<&str> {
    let start = match shape {
        JsonShape::Object => cleaned.find('{'),
        JsonShape::Array => array_start(cleaned),
        JsonShape::Any => match (cleaned.find('{'), array_start(cleaned)) {
            (Some(o), Some(a)) => Some(o.min(a)),
            (o, a) => o.or(a),
        },
    }
    .ok_or_else(|| Error::Parse("JSONが見つかりません".into()))?;

    let close = if cleaned[start..].starts_with('[') { ']' } else { '}' };
    match cleaned.rfind(close) {
        Some(end) if end > start => Ok(&cleaned[start..=end]),
        _ => Err(Error::Parse("JSONが閉じていません".into())),
    }
}

/// 指定した形のJSON値としてパースする
pub fn parse_json_shape(response: &str, shape: JsonShape) -> Result<Value> {
    let cleaned = clean_response(response);
    let json_str = locate_json(&cleaned, shape)?;
    serde_json::from_str(json_str).map_err(|e| Error::Parse(format!("JSONパースエラー: {}", e)))
}

/// レスポンス文字列をJSON値にパースする
pub fn parse_json_response(response: &str) -> Result<Value> {
    parse_json_shape(response, JsonShape::Any)
}

/// "NA" 等の該当なし表記か
pub fn is_not_applicable(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "" | "na" | "n/a" | "none" | "null" | "not applicable" | "无" | "-"
    )
}

/// 学校名の括弧書き（キャンパス名など）を除去する。該当なしはNone
pub fn clean_school_name(raw: &str) -> Option<String> {
    if is_not_applicable(raw) {
        return None;
    }
    let cleaned = PAREN_RE.replace_all(raw, "").trim().to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// 卒業年の推定
///
/// - 終端のない期間（"2023-至今"）は在学中とみなし、開始年＋修業年数
/// - 閉じた期間（"2019-2023"）は終了年
/// - 単独の年はその年
pub fn infer_grad_year(raw: &str, level: EducationLevel) -> Option<i32> {
    let years: Vec<i32> = YEAR_RE
        .find_iter(raw)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    let is_range = raw.contains('-') || raw.contains('~') || raw.contains('–') || raw.contains('至');
    let open_ended = OPEN_END_RE.is_match(raw) || raw.trim_end().ends_with('-');

    match years.as_slice() {
        [] => None,
        [start] if is_range && open_ended => Some(start + level.program_years()),
        [single] => Some(*single),
        [.., last] => Some(*last),
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !is_not_applicable(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn flag_field(obj: &Map<String, Value>, key: &str, truthy: &[&str]) -> bool {
    match obj.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            let s = s.trim().to_lowercase();
            truthy.iter().any(|t| s == *t)
        }
        _ => false,
    }
}

fn grad_year_field(obj: &Map<String, Value>, level: EducationLevel) -> Option<i32> {
    match obj.get("grad_year")? {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => infer_grad_year(s, level),
        _ => None,
    }
}

fn awards_field(obj: &Map<String, Value>) -> Vec<String> {
    let to_award = |v: &Value| match v {
        Value::String(s) if !is_not_applicable(s) => Some(s.trim().to_string()),
        _ => None,
    };

    match obj.get("awards") {
        Some(Value::Array(items)) => items.iter().filter_map(to_award).collect(),
        Some(v @ Value::String(_)) => to_award(v).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// これらのキーが1つもない応答は候補者レコードとして扱わない
const RECORD_KEYS: &[&str] = &[
    "name",
    "education_level",
    "phd_school",
    "master_school",
    "bachelor_school",
];

/// 属性抽出レスポンスを候補者レコードに変換
///
/// `qs50_flag` はここでは設定しない（分類時にローカル照合で導出する）
pub fn parse_candidate_response(response: &str) -> Result<CandidateRecord> {
    let value = parse_json_shape(response, JsonShape::Object)?;
    let obj = value
        .as_object()
        .ok_or_else(|| Error::Parse("JSONオブジェクトではありません".into()))?;

    if !RECORD_KEYS.iter().any(|key| obj.contains_key(*key)) {
        return Err(Error::Parse("候補者属性が含まれていません".into()));
    }

    let education_level = string_field(obj, "education_level")
        .map(|s| EducationLevel::from_label(&s))
        .unwrap_or_default();

    let school = |key: &str| string_field(obj, key).and_then(|s| clean_school_name(&s));

    Ok(CandidateRecord {
        name: string_field(obj, "name").unwrap_or_default(),
        is_chinese_name: flag_field(obj, "is_chinese_name", &["yes", "true", "是"]),
        education_level,
        major: string_field(obj, "major").unwrap_or_default(),
        grad_year: grad_year_field(obj, education_level),
        schools: Schools {
            phd: school("phd_school"),
            master: school("master_school"),
            bachelor: school("bachelor_school"),
        },
        awards: awards_field(obj),
        candidate_location: string_field(obj, "candidate_location")
            .unwrap_or_else(|| "Unknown".to_string()),
        qs50_flag: false,
        qs50_asserted: flag_field(obj, "is_qs50", &["qs50", "yes", "true"]),
    })
}

/// セマンティック照合レスポンスの1件
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticEntry {
    pub subject: String,
    pub matched: Option<String>,
    pub tier: Tier,
    pub confidence: Confidence,
}

fn parse_tier(value: Option<&Value>) -> Tier {
    match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(1) => Tier::List1,
            Some(2) => Tier::List2,
            _ => Tier::None,
        },
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "1" | "list1" | "list 1" => Tier::List1,
            "2" | "list2" | "list 2" => Tier::List2,
            "both" => Tier::Both,
            _ => Tier::None,
        },
        _ => Tier::None,
    }
}

fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| string_field(obj, key))
}

/// セマンティック照合レスポンスをパース
///
/// 配列、または `{"matches": [...]}` 形式を受け付ける（配列を優先）
pub fn parse_semantic_response(response: &str) -> Result<Vec<SemanticEntry>> {
    let value = parse_json_shape(response, JsonShape::Array)
        .or_else(|_| parse_json_shape(response, JsonShape::Object))?;
    let items = match &value {
        Value::Array(items) => items,
        Value::Object(obj) => obj
            .get("matches")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::Parse("matches配列がありません".into()))?,
        _ => return Err(Error::Parse("JSON配列ではありません".into())),
    };

    let entries = items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|obj| {
            let subject = first_string(obj, &["subject", "resume_award", "school"])?;
            Some(SemanticEntry {
                subject,
                matched: first_string(obj, &["matched", "matched_award", "matched_school"]),
                tier: parse_tier(obj.get("list")),
                confidence: obj
                    .get("confidence")
                    .and_then(Value::as_str)
                    .map(Confidence::from_label)
                    .unwrap_or_default(),
            })
        })
        .collect();

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // clean_response / parse_json_response
    // =============================================

    #[test]
    fn test_clean_response_strips_fences_and_trailing_commas() {
        let response = "```json\n{\n  \"name\": \"张三\",\n  \"awards\": [\"ICPC\",],\n}\n```";
        let cleaned = clean_response(response);
        assert!(!cleaned.contains("```"));
        let value: Value = serde_json::from_str(&cleaned).unwrap();
        assert_eq!(value["awards"][0], "ICPC");
    }

    #[test]
    fn test_parse_json_response_with_surrounding_text() {
        let response = "Here is the result: {\"name\": \"Li Lei\"} Hope this helps.";
        let value = parse_json_response(response).unwrap();
        assert_eq!(value["name"], "Li Lei");
    }

    #[test]
    fn test_parse_json_response_array_first() {
        let value = parse_json_response(r#"[{"subject": "A"}, {"subject": "B"}]"#).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_parse_json_response_no_json() {
        let result = parse_json_response("Sorry, I cannot help with that.");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_json_response_single_cleanup_pass() {
        // 閉じ括弧の欠落は修復しない
        let result = parse_json_response("{\"name\": \"x\", \"awards\": [\"a\"");
        assert!(result.is_err());
    }

    // =============================================
    // infer_grad_year
    // =============================================

    #[test]
    fn test_infer_grad_year_single_year() {
        assert_eq!(infer_grad_year("2024", EducationLevel::Bachelor), Some(2024));
        assert_eq!(infer_grad_year("2024年6月", EducationLevel::Master), Some(2024));
    }

    #[test]
    fn test_infer_grad_year_closed_range() {
        assert_eq!(infer_grad_year("2019.09 - 2023.06", EducationLevel::Bachelor), Some(2023));
    }

    #[test]
    fn test_infer_grad_year_open_range_by_degree() {
        assert_eq!(infer_grad_year("2023-至今", EducationLevel::PhD), Some(2027));
        assert_eq!(infer_grad_year("2023 - present", EducationLevel::Master), Some(2025));
        assert_eq!(infer_grad_year("2022-", EducationLevel::Bachelor), Some(2026));
    }

    #[test]
    fn test_infer_grad_year_not_a_year() {
        assert_eq!(infer_grad_year("N/A", EducationLevel::Bachelor), None);
        assert_eq!(infer_grad_year("", EducationLevel::PhD), None);
    }

    // =============================================
    // clean_school_name
    // =============================================

    #[test]
    fn test_clean_school_name() {
        assert_eq!(clean_school_name("清华大学（深圳）"), Some("清华大学".to_string()));
        assert_eq!(
            clean_school_name("University of California (Berkeley)"),
            Some("University of California".to_string())
        );
        assert_eq!(clean_school_name("NA"), None);
        assert_eq!(clean_school_name(" n/a "), None);
    }

    // =============================================
    // parse_candidate_response
    // =============================================

    #[test]
    fn test_parse_candidate_response_full() {
        let response = r#"```json
{
  "education_level": "硕士",
  "name": "王小明",
  "major": "计算机科学",
  "grad_year": "2024-至今",
  "phd_school": "NA",
  "master_school": "北京大学（深圳研究生院）",
  "bachelor_school": "浙江大学",
  "awards": ["ACM ICPC Finalist", "NeurIPS 2023 Oral",],
  "candidate_location": "China",
  "is_qs50": "QS50",
  "is_chinese_name": "Yes",
}
```"#;

        let record = parse_candidate_response(response).unwrap();
        assert_eq!(record.name, "王小明");
        assert_eq!(record.education_level, EducationLevel::Master);
        assert_eq!(record.grad_year, Some(2026));
        assert_eq!(record.schools.phd, None);
        assert_eq!(record.schools.master.as_deref(), Some("北京大学"));
        assert_eq!(record.schools.bachelor.as_deref(), Some("浙江大学"));
        assert_eq!(record.awards, vec!["ACM ICPC Finalist", "NeurIPS 2023 Oral"]);
        assert_eq!(record.candidate_location, "China");
        assert!(record.is_chinese_name);
        assert!(record.qs50_asserted);
        assert!(!record.qs50_flag);
    }

    #[test]
    fn test_parse_candidate_response_numeric_year_and_defaults() {
        let response = r#"{"education_level": "Bachelor's", "name": "Alice Smith", "grad_year": 2023}"#;
        let record = parse_candidate_response(response).unwrap();
        assert_eq!(record.grad_year, Some(2023));
        assert!(record.awards.is_empty());
        assert_eq!(record.candidate_location, "Unknown");
        assert!(!record.is_chinese_name);
    }

    #[test]
    fn test_parse_candidate_response_rejects_array() {
        let result = parse_candidate_response(r#"["x", "y"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_candidate_response_rejects_object_without_record_keys() {
        assert!(matches!(parse_candidate_response("{}"), Err(Error::Parse(_))));
        assert!(matches!(
            parse_candidate_response(r#"{"status": "ok", "message": "done"}"#),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_parse_candidate_response_skips_bracketed_log_line() {
        let response = "[info] done\n{\"name\": \"张三\", \"education_level\": \"本科\", \"awards\": [\"ICPC\"]}";
        let record = parse_candidate_response(response).unwrap();
        assert_eq!(record.name, "张三");
        assert_eq!(record.education_level, EducationLevel::Bachelor);
        assert_eq!(record.awards, vec!["ICPC"]);
    }

    // =============================================
    // parse_semantic_response
    // =============================================

    #[test]
    fn test_parse_semantic_response_award_schema() {
        let response = r#"[
  {"resume_award": "ACM ICPC Finalist", "matched_award": "ICPC World Finals", "list": 1, "confidence": "High"},
  {"resume_award": "CVPR Best Paper", "matched_award": "CVPR", "list": "2", "confidence": "Medium"},
  {"resume_award": "Both thing", "matched_award": "X", "list": "Both", "confidence": "High"},
  {"resume_award": "Dean's list", "matched_award": null, "list": "No Awards", "confidence": "Low"}
]"#;
        let entries = parse_semantic_response(response).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].tier, Tier::List1);
        assert_eq!(entries[0].matched.as_deref(), Some("ICPC World Finals"));
        assert_eq!(entries[1].tier, Tier::List2);
        assert_eq!(entries[1].confidence, Confidence::Medium);
        assert_eq!(entries[2].tier, Tier::Both);
        assert_eq!(entries[3].tier, Tier::None);
        assert_eq!(entries[3].matched, None);
    }

    #[test]
    fn test_parse_semantic_response_skips_bracketed_log_line() {
        let response = "[2026-01-01 10:00:00] [info] ok\n[{\"subject\": \"A\", \"matched\": \"B\", \"list\": 2, \"confidence\": \"High\"}]";
        let entries = parse_semantic_response(response).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].tier, Tier::List2);
    }

    #[test]
    fn test_parse_semantic_response_empty_array() {
        assert!(parse_semantic_response("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_semantic_response_wrapped_object() {
        let response = r#"{"matches": [{"subject": "清华", "matched": "清华大学", "list": 1, "confidence": "High"}]}"#;
        let entries = parse_semantic_response(response).unwrap();
        assert_eq!(entries[0].subject, "清华");
        assert_eq!(entries[0].tier, Tier::List1);
    }
}
