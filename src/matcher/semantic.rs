//! セマンティック照合
//!
//! ローカル照合で解決できなかった対象だけをまとめて1回サービスに問い合わせる。
//! 呼び出し失敗・パース失敗時は全件を未解決（tier None / 信頼度Low）に落とす。

use crate::analyzer::ClassificationService;
use resume_sorter_common::local_match::normalize;
use resume_sorter_common::{
    build_award_match_prompt, build_school_match_prompt, parse_semantic_response, Confidence,
    MatchResult, MatchSource, SemanticEntry, Tier,
};
use std::collections::HashMap;
use tracing::{debug, warn};

/// 照合対象の種類（プロンプトの選択に使う）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    School,
    Award,
}

/// 未解決の対象をまとめて照合する
///
/// 戻り値は対象ごとの結果。応答に含まれなかった対象も未解決として必ず含まれる。
pub async fn match_batch<S: ClassificationService>(
    service: &S,
    kind: MatchKind,
    subjects: &[String],
    lists: &[&[String]],
) -> HashMap<String, MatchResult> {
    let mut results: HashMap<String, MatchResult> = subjects
        .iter()
        .map(|s| (s.clone(), MatchResult::unresolved(s.as_str(), MatchSource::Semantic)))
        .collect();

    let empty: &[String] = &[];
    let list1 = lists.first().copied().unwrap_or(empty);
    let list2 = lists.get(1).copied().unwrap_or(empty);

    let prompt = match kind {
        MatchKind::School => build_school_match_prompt(subjects, list1),
        MatchKind::Award => build_award_match_prompt(subjects, list1, list2),
    };

    debug!(?kind, subjects = subjects.len(), "セマンティック照合");

    let response = match service.complete(&prompt).await {
        Ok(response) => response,
        Err(e) => {
            warn!(?kind, error = %e, "セマンティック照合に失敗（未解決として扱います）");
            return results;
        }
    };

    let entries = match parse_semantic_response(&response) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(?kind, error = %e, "セマンティック照合の応答を解析できません");
            return results;
        }
    };

    for entry in entries {
        let Some(subject) = find_subject(subjects, &entry.subject) else {
            debug!(subject = %entry.subject, "照合対象にない項目を無視");
            continue;
        };
        if let Some(result) = accept(subject, &entry, lists) {
            results.insert(subject.clone(), result);
        }
    }

    results
}

/// 応答中の対象名を入力の対象に対応付ける
fn find_subject<'a>(subjects: &'a [String], answered: &str) -> Option<&'a String> {
    let answered = answered.trim();
    subjects
        .iter()
        .find(|s| s.trim() == answered)
        .or_else(|| {
            let key = normalize(answered);
            subjects.iter().find(|s| normalize(s) == key)
        })
}

/// 参照リスト中の表記を探す（完全一致優先、次に正規化一致）
fn find_reference(lists: &[&[String]], answered: &str) -> Option<String> {
    let answered = answered.trim();
    let all = || lists.iter().flat_map(|list| list.iter());

    all()
        .find(|r| r.trim() == answered)
        .or_else(|| {
            let key = normalize(answered);
            all().find(|r| normalize(r) == key)
        })
        .cloned()
}

/// リストに参照名が含まれるか（正規化一致）
fn list_contains(list: &[String], reference: &str) -> bool {
    let key = normalize(reference);
    list.iter().any(|r| r.trim() == reference || normalize(r) == key)
}

/// 1件の応答を採用できるか判定する
///
/// 信頼度Low、tier None、参照リストにない参照名はいずれも未解決。
/// tierは応答の申告ではなく参照名が実際に載っているリストから決める。
/// 申告したリストに参照名がなければ未解決。
fn accept(subject: &str, entry: &SemanticEntry, lists: &[&[String]]) -> Option<MatchResult> {
    if !entry.tier.is_match() || entry.confidence == Confidence::Low {
        return None;
    }

    let reference = match entry.matched.as_deref().and_then(|m| find_reference(lists, m)) {
        Some(reference) => reference,
        None => {
            debug!(subject, matched = ?entry.matched, "参照リストにない一致先のため未解決");
            return None;
        }
    };

    let in_list = |index: usize| {
        lists
            .get(index)
            .map(|list| list_contains(list, &reference))
            .unwrap_or(false)
    };
    let tier = Tier::from_flags(in_list(0), in_list(1));

    if (entry.tier.hits_list1() && !tier.hits_list1())
        || (entry.tier.hits_list2() && !tier.hits_list2())
    {
        debug!(subject, reference = %reference, claimed = ?entry.tier, actual = ?tier, "申告リストと一致先が食い違うため未解決");
        return None;
    }

    Some(MatchResult {
        subject: subject.to_string(),
        matched_reference: Some(reference),
        tier,
        confidence: entry.confidence,
        source: MatchSource::Semantic,
    })
}
