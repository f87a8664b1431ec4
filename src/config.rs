use crate::error::{ResumeSorterError, Result};
use resume_sorter_common::{LabelSet, DEFAULT_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// AI CLIに渡すモデル名（未指定ならCLIの既定）
    pub model: Option<String>,
    pub timeout_seconds: u64,
    /// この年より後の卒業予定者をインターン扱いにする
    pub intern_cutoff_year: i32,
    pub fuzzy_threshold: f64,
    /// tesseractの言語指定
    pub ocr_languages: String,
    pub labels: LabelSet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: None,
            timeout_seconds: 120,
            intern_cutoff_year: 2025,
            fuzzy_threshold: DEFAULT_THRESHOLD,
            ocr_languages: "chi_sim+eng".into(),
            labels: LabelSet::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ResumeSorterError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("resume-sorter").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(ResumeSorterError::Config(format!(
                "fuzzy_threshold は0.0〜1.0で指定してください: {}",
                self.fuzzy_threshold
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(ResumeSorterError::Config("timeout_seconds は1以上にしてください".into()));
        }
        Ok(())
    }

    /// CLI引数で上書き
    pub fn with_overrides(mut self, cutoff_year: Option<i32>, threshold: Option<f64>) -> Result<Self> {
        if let Some(year) = cutoff_year {
            self.intern_cutoff_year = year;
        }
        if let Some(threshold) = threshold {
            self.fuzzy_threshold = threshold;
        }
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.intern_cutoff_year, 2025);
        assert!((config.fuzzy_threshold - 0.90).abs() < 1e-9);
        assert_eq!(config.labels.both_talent, "天才");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"intern_cutoff_year": 2026, "labels": {"both_talent": "高潜"}}"#).unwrap();
        assert_eq!(config.intern_cutoff_year, 2026);
        assert_eq!(config.timeout_seconds, 120);
        assert_eq!(config.labels.both_talent, "高潜");
        assert_eq!(config.labels.competition_talent, "竞赛人才");
    }

    #[test]
    fn test_overrides_validate_threshold() {
        assert!(Config::default().with_overrides(None, Some(1.5)).is_err());
        let config = Config::default().with_overrides(Some(2024), Some(0.85)).unwrap();
        assert_eq!(config.intern_cutoff_year, 2024);
        assert!((config.fuzzy_threshold - 0.85).abs() < 1e-9);
    }
}
