use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeSorterError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("テキストを抽出できませんでした: {0}")]
    Extraction(String),

    #[error("参照リストの読み込みに失敗: {path}: {message}")]
    ListLoad { path: String, message: String },

    #[error("属性抽出レスポンスのパースに失敗: {0}")]
    AttributeParse(String),

    #[error("AI呼び出しエラー: {0}")]
    Service(#[from] ServiceError),

    #[error("ファイル名生成エラー: {0}")]
    FilenameBuild(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),

    #[error(transparent)]
    Common(#[from] resume_sorter_common::Error),
}

/// 分類サービス（AI CLI）境界のエラー
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("呼び出し失敗: {0}")]
    Transport(String),

    #[error("{0}秒でタイムアウト")]
    Timeout(u64),

    #[error("レスポンスが不正: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, ResumeSorterError>;
