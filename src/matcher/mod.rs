//! 学校・受賞の照合モジュール
//!
//! 2段階照合:
//! 1. ローカル照合（完全一致・あいまい一致、外部呼び出しなし）
//! 2. 未解決分だけをまとめてセマンティック照合（1回のみ）

mod reference;
mod semantic;

pub use reference::{parse_list, ListSources, ReferenceLists};
pub use semantic::{match_batch, MatchKind};

use crate::analyzer::ClassificationService;
use resume_sorter_common::{match_lists, CandidateRecord, MatchResult, SchoolMatches};
use tracing::debug;

/// 対象リストを2段階で照合する
///
/// 結果は `subjects` と同じ順序・同じ件数。重複する対象は1回だけ問い合わせる。
/// 未解決が0件、または参照リストがすべて空ならサービスは呼ばない。
pub async fn resolve<S: ClassificationService>(
    service: &S,
    kind: MatchKind,
    subjects: &[String],
    lists: &[&[String]],
    threshold: f64,
) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = subjects
        .iter()
        .map(|subject| match_lists(subject, lists, threshold))
        .collect();

    let mut residual: Vec<String> = Vec::new();
    for result in results.iter().filter(|r| !r.is_match()) {
        if !residual.contains(&result.subject) {
            residual.push(result.subject.clone());
        }
    }

    let has_references = lists.iter().any(|list| !list.is_empty());
    if residual.is_empty() || !has_references {
        debug!(?kind, subjects = subjects.len(), "ローカル照合のみで完了");
        return results;
    }

    debug!(?kind, local = subjects.len() - residual.len(), residual = residual.len(), "未解決分をセマンティック照合へ");
    let semantic = match_batch(service, kind, &residual, lists).await;

    for result in results.iter_mut().filter(|r| !r.is_match()) {
        if let Some(resolved) = semantic.get(&result.subject) {
            *result = resolved.clone();
        }
    }

    results
}

/// 学位ごとの学校を対象校リストと照合する
pub async fn resolve_schools<S: ClassificationService>(
    service: &S,
    record: &CandidateRecord,
    lists: &ReferenceLists,
    threshold: f64,
) -> SchoolMatches {
    let present: Vec<_> = record.schools.present().collect();
    let subjects: Vec<String> = present.iter().map(|(_, school)| school.to_string()).collect();

    let results = resolve(
        service,
        MatchKind::School,
        &subjects,
        &[lists.target_schools.as_slice()],
        threshold,
    )
    .await;

    let mut matches = SchoolMatches::default();
    for ((degree, _), result) in present.into_iter().zip(results) {
        matches.set(degree, result);
    }
    matches
}

/// 受賞歴を受賞リスト1・2と照合する
pub async fn resolve_awards<S: ClassificationService>(
    service: &S,
    record: &CandidateRecord,
    lists: &ReferenceLists,
    threshold: f64,
) -> Vec<MatchResult> {
    resolve(
        service,
        MatchKind::Award,
        &record.awards,
        &[lists.award_list1.as_slice(), lists.award_list2.as_slice()],
        threshold,
    )
    .await
}
