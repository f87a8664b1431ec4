use clap::{Args, Parser, Subcommand};
use crate::ai_provider::AiProvider;
use crate::matcher::ListSources;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-sorter")]
#[command(about = "履歴書一括解析・分類リネームツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// AIプロバイダ (claude/codex/gemini)
    #[arg(long, default_value = "claude", global = true)]
    pub ai_provider: AiProvider,
}

/// 参照リストファイル
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// 対象校リスト（1行1校）
    #[arg(long)]
    pub target_list: Option<PathBuf>,

    /// 受賞リスト1（競技系）
    #[arg(long)]
    pub award_list: Option<PathBuf>,

    /// 受賞リスト2（トップ会議系）
    #[arg(long)]
    pub award_list2: Option<PathBuf>,

    /// QS50校リスト
    #[arg(long)]
    pub qs50_list: Option<PathBuf>,
}

impl From<ListArgs> for ListSources {
    fn from(args: ListArgs) -> Self {
        ListSources {
            target_schools: args.target_list,
            award_list1: args.award_list,
            award_list2: args.award_list2,
            qs50: args.qs50_list,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// フォルダ内の履歴書を解析し、分類名でコピー
    Run {
        /// 履歴書フォルダ
        #[arg(required = true)]
        source: PathBuf,

        /// 出力フォルダ
        #[arg(required = true)]
        output: PathBuf,

        #[command(flatten)]
        lists: ListArgs,

        /// この年より後の卒業予定者をインターン扱い
        #[arg(long)]
        cutoff_year: Option<i32>,

        /// あいまい一致の閾値 (0.0〜1.0)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// 1ファイルを解析して結果をJSONで表示（コピーしない）
    Inspect {
        /// 履歴書ファイル
        #[arg(required = true)]
        file: PathBuf,

        #[command(flatten)]
        lists: ListArgs,

        /// この年より後の卒業予定者をインターン扱い
        #[arg(long)]
        cutoff_year: Option<i32>,

        /// あいまい一致の閾値 (0.0〜1.0)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// インターン判定の基準年を設定
        #[arg(long)]
        set_cutoff_year: Option<i32>,

        /// 両リスト受賞者のラベルを設定（例: 高潜）
        #[arg(long)]
        set_both_label: Option<String>,

        /// AI CLIに渡すモデル名を設定
        #[arg(long)]
        set_model: Option<String>,
    },
}
