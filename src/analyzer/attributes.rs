//! 候補者属性抽出

use super::ClassificationService;
use crate::error::{ResumeSorterError, Result};
use resume_sorter_common::{build_extraction_prompt, parse_candidate_response, CandidateRecord};
use tracing::{debug, info};

/// 履歴書テキストから候補者レコードを抽出する
///
/// サービス呼び出しの失敗はそのまま `Service` エラー、応答がパースできなければ
/// `AttributeParse` エラー。`qs50_flag` は未設定のまま返す。
pub async fn extract_attributes<S: ClassificationService>(
    service: &S,
    resume_text: &str,
) -> Result<CandidateRecord> {
    let prompt = build_extraction_prompt(resume_text);
    debug!(prompt_chars = prompt.chars().count(), "属性抽出プロンプト");

    let response = service.complete(&prompt).await?;

    let record = parse_candidate_response(&response)
        .map_err(|e| ResumeSorterError::AttributeParse(e.to_string()))?;

    info!(
        name = %record.name,
        level = %record.education_level,
        grad_year = ?record.grad_year,
        awards = record.awards.len(),
        "属性抽出完了"
    );
    if record.qs50_asserted {
        debug!(name = %record.name, "モデルがQS50と回答（ローカル照合で再判定）");
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use resume_sorter_common::EducationLevel;

    struct Canned(std::result::Result<&'static str, u64>);

    impl ClassificationService for Canned {
        async fn complete(&self, _prompt: &str) -> std::result::Result<String, ServiceError> {
            match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(secs) => Err(ServiceError::Timeout(secs)),
            }
        }
    }

    #[tokio::test]
    async fn test_extract_attributes_from_fenced_json() {
        let service = Canned(Ok(r#"```json
{
  "education_level": "Master's",
  "name": "王芳",
  "major": "统计学",
  "grad_year": "2024-至今",
  "phd_school": "NA",
  "master_school": "北京大学（医学部）",
  "bachelor_school": "武汉大学",
  "awards": ["数学建模国赛一等奖",],
  "candidate_location": "China",
  "is_qs50": "QS50",
  "is_chinese_name": "Yes",
}
```"#));
        let record = extract_attributes(&service, "resume").await.unwrap();
        assert_eq!(record.name, "王芳");
        assert_eq!(record.education_level, EducationLevel::Master);
        assert_eq!(record.grad_year, Some(2026));
        assert_eq!(record.schools.phd, None);
        assert_eq!(record.schools.master.as_deref(), Some("北京大学"));
        assert_eq!(record.awards, vec!["数学建模国赛一等奖"]);
        assert!(record.qs50_asserted);
        assert!(!record.qs50_flag);
    }

    #[tokio::test]
    async fn test_unparseable_response_is_attribute_parse_error() {
        let service = Canned(Ok("I could not read this resume."));
        let result = extract_attributes(&service, "resume").await;
        assert!(matches!(result, Err(ResumeSorterError::AttributeParse(_))));
    }

    #[tokio::test]
    async fn test_service_failure_propagates() {
        let service = Canned(Err(120));
        let result = extract_attributes(&service, "resume").await;
        assert!(matches!(result, Err(ResumeSorterError::Service(ServiceError::Timeout(120)))));
    }
}
