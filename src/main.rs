use clap::Parser;
use resume_sorter::{analyzer, batch, cli, config, error, matcher};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::Run { source, output, lists, cutoff_year, threshold } => {
            println!("📄 resume-sorter - 履歴書一括処理\n");

            let config = config.with_overrides(cutoff_year, threshold)?;
            let backend = analyzer::CliBackend::new(cli.ai_provider, &config, cli.verbose);
            let pipeline = batch::Pipeline::new(backend, config);

            let sources = matcher::ListSources::from(lists);
            let (summary, _) = pipeline.run_batch(&source, &output, &sources).await?;

            println!("✔ 出力先: {}", output.display());
            if summary.errors > 0 {
                println!("⚠ {}件を \"{}\" としてコピーしました", summary.errors, batch::ERROR_PREFIX.trim());
            }
        }

        Commands::Inspect { file, lists, cutoff_year, threshold } => {
            if !file.is_file() {
                return Err(error::ResumeSorterError::FileNotFound(file.display().to_string()));
            }

            let config = config.with_overrides(cutoff_year, threshold)?;
            let backend = analyzer::CliBackend::new(cli.ai_provider, &config, cli.verbose);
            let pipeline = batch::Pipeline::new(backend, config);

            let lists = matcher::ReferenceLists::load(&matcher::ListSources::from(lists))?;
            let analysis = pipeline.analyze_file(&file, &lists).await?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }

        Commands::Config { show, set_cutoff_year, set_both_label, set_model } => {
            let mut config = config;
            let changed = set_cutoff_year.is_some() || set_both_label.is_some() || set_model.is_some();

            if let Some(year) = set_cutoff_year {
                config.intern_cutoff_year = year;
            }
            if let Some(label) = set_both_label {
                config.labels.both_talent = label;
            }
            if let Some(model) = set_model {
                config.model = Some(model);
            }
            if changed {
                config.validate()?;
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  モデル: {}", config.model.as_deref().unwrap_or("(CLIの既定)"));
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  インターン基準年: {}", config.intern_cutoff_year);
                println!("  あいまい一致閾値: {}", config.fuzzy_threshold);
                println!("  OCR言語: {}", config.ocr_languages);
                println!("  両リスト受賞ラベル: {}", config.labels.both_talent);
            }
        }
    }

    Ok(())
}

/// RUST_LOG優先。未指定なら --verbose で debug、それ以外は warn
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
