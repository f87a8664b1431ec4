//! ローカル照合モジュール
//!
//! 外部呼び出しなしの完全一致・あいまい一致。
//! 1. 前後空白を除いた完全一致 → 信頼度High
//! 2. 正規化後の類似度の最大値が閾値以上 → 一致（0.98以上High、それ以外Medium）

use crate::types::{Confidence, MatchResult, MatchSource, Tier};
use regex::Regex;

/// あいまい一致の既定閾値
pub const DEFAULT_THRESHOLD: f64 = 0.90;

/// この類似度以上なら信頼度High
const HIGH_CONFIDENCE_RATIO: f64 = 0.98;

lazy_static::lazy_static! {
    static ref QUALIFIER_RE: Regex = Regex::new(r"[\(（][^\)）]*[\)）]").unwrap();
}

/// 比較用に正規化（括弧書き除去・全角空白・大小文字・連続空白）
pub fn normalize(value: &str) -> String {
    let without_qualifier = QUALIFIER_RE.replace_all(value, " ");
    without_qualifier
        .replace('\u{3000}', " ")
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn token_sorted(value: &str) -> String {
    let mut tokens: Vec<&str> = value.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// 類似度 [0, 1]（文字単位と語順ソート後の編集距離比の大きい方）
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let char_ratio = strsim::normalized_levenshtein(&a, &b);
    let token_ratio = strsim::normalized_levenshtein(&token_sorted(&a), &token_sorted(&b));
    char_ratio.max(token_ratio)
}

/// 1つの参照リスト内での最良一致
#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    pub reference: String,
    pub ratio: f64,
}

/// 参照リストから最も類似する要素を探す（同率は先頭優先）
pub fn best_match(subject: &str, references: &[String]) -> Option<BestMatch> {
    let trimmed = subject.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(exact) = references.iter().find(|r| r.trim() == trimmed) {
        return Some(BestMatch {
            reference: exact.clone(),
            ratio: 1.0,
        });
    }

    let mut best: Option<BestMatch> = None;
    for reference in references {
        let ratio = similarity(trimmed, reference);
        if best.as_ref().map_or(true, |b| ratio > b.ratio) {
            best = Some(BestMatch {
                reference: reference.clone(),
                ratio,
            });
        }
    }
    best
}

/// 1つ以上の参照リストに対してローカル照合する
///
/// `lists[0]` がリスト1、`lists[1]` がリスト2。各リストで独立に閾値判定し、
/// 両方を超えた場合は `Tier::Both`。
pub fn match_lists(subject: &str, lists: &[&[String]], threshold: f64) -> MatchResult {
    let hits: Vec<Option<BestMatch>> = lists
        .iter()
        .map(|references| best_match(subject, references).filter(|b| b.ratio >= threshold))
        .collect();

    let hit = |index: usize| hits.get(index).map_or(false, Option::is_some);
    let tier = Tier::from_flags(hit(0), hit(1));

    let best = hits
        .into_iter()
        .flatten()
        .fold(None::<BestMatch>, |acc, b| match acc {
            Some(a) if a.ratio >= b.ratio => Some(a),
            _ => Some(b),
        });

    match best {
        Some(b) => MatchResult {
            subject: subject.to_string(),
            matched_reference: Some(b.reference),
            tier,
            confidence: if b.ratio >= HIGH_CONFIDENCE_RATIO {
                Confidence::High
            } else {
                Confidence::Medium
            },
            source: MatchSource::Local,
        },
        None => MatchResult::unresolved(subject, MatchSource::Local),
    }
}

/// 単一リストに対するローカル照合
pub fn match_one(subject: &str, references: &[String], threshold: f64) -> MatchResult {
    match_lists(subject, &[references], threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_match_after_trim() {
        let references = refs(&["清华大学", "北京大学"]);
        let result = match_one("  北京大学 ", &references, DEFAULT_THRESHOLD);
        assert_eq!(result.tier, Tier::List1);
        assert_eq!(result.confidence, Confidence::High);
        assert_eq!(result.matched_reference.as_deref(), Some("北京大学"));
        assert_eq!(result.source, MatchSource::Local);
    }

    #[test]
    fn test_fuzzy_match_medium_confidence() {
        let references = refs(&["ICPC World Finals", "Kaggle Grandmaster"]);
        let result = match_one("ICPC World Final", &references, DEFAULT_THRESHOLD);
        assert_eq!(result.tier, Tier::List1);
        assert_eq!(result.confidence, Confidence::Medium);
        assert_eq!(result.matched_reference.as_deref(), Some("ICPC World Finals"));
    }

    #[test]
    fn test_normalized_equal_is_high() {
        let references = refs(&["Tsinghua University"]);
        let result = match_one("tsinghua  university", &references, DEFAULT_THRESHOLD);
        assert_eq!(result.confidence, Confidence::High);
    }

    #[test]
    fn test_similar_but_different_school_is_not_matched() {
        let references = refs(&["浙江大学", "北京大学"]);
        assert!(!match_one("浙江工业大学", &references, DEFAULT_THRESHOLD).is_match());
        assert!(!match_one("北京理工大学", &references, DEFAULT_THRESHOLD).is_match());
    }

    #[test]
    fn test_below_threshold_is_unresolved() {
        let references = refs(&["ICPC World Finals"]);
        let result = match_one("ACM ICPC Finalist", &references, DEFAULT_THRESHOLD);
        assert_eq!(result.tier, Tier::None);
        assert_eq!(result.confidence, Confidence::Low);
        assert_eq!(result.matched_reference, None);
    }

    #[test]
    fn test_two_lists_both() {
        let list1 = refs(&["Kaggle Grandmaster"]);
        let list2 = refs(&["Kaggle Grandmaster", "NeurIPS Best Paper"]);
        let result = match_lists("Kaggle Grandmaster", &[&list1, &list2], DEFAULT_THRESHOLD);
        assert_eq!(result.tier, Tier::Both);

        let result = match_lists("NeurIPS Best Paper", &[&list1, &list2], DEFAULT_THRESHOLD);
        assert_eq!(result.tier, Tier::List2);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(!match_one("", &refs(&["清华大学"]), DEFAULT_THRESHOLD).is_match());
        assert!(!match_one("清华大学", &[], DEFAULT_THRESHOLD).is_match());
    }

    #[test]
    fn test_similarity_token_order() {
        assert!((similarity("World Finals ICPC", "ICPC World Finals") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_tie_prefers_first_reference() {
        let references = refs(&["abcd", "abce"]);
        let best = best_match("abcx", &references).unwrap();
        assert_eq!(best.reference, "abcd");
    }
}
