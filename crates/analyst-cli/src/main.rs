//! 기술적 분석 보고서 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 애플 분석 보고서 (텍스트)
//! analyst analyze -s AAPL
//!
//! # 삼성전자 분석 보고서 (JSON, 내러티브 생략)
//! analyst analyze -s 005930.KS --json --no-narrative
//!
//! # 최신 시세 조회
//! analyst quote -s AAPL
//!
//! # 60초마다 재분석 (Ctrl-C로 종료)
//! analyst watch -s AAPL --interval 60
//! ```

use std::path::PathBuf;
use std::time::Duration;

use analyst_cli::commands::analyze::run_analysis;
use analyst_cli::commands::quote::run_quote;
use analyst_cli::commands::watch::{run_watch, WatchConfig};
use analyst_cli::commands::AppContext;
use analyst_cli::output::OutputFormat;
use analyst_core::{init_logging, AppConfig, LogConfig};
use clap::{Parser, Subcommand};
use tracing::{debug, error};

#[derive(Parser)]
#[command(name = "analyst")]
#[command(about = "Stock analyst CLI - 기술적 지표 기반 종목 분석 보고서", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로 (TOML)
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 종목 분석 보고서 생성
    Analyze {
        /// 종목 심볼 (예: AAPL, 005930.KS)
        #[arg(short, long)]
        symbol: String,

        /// JSON으로 출력
        #[arg(long)]
        json: bool,

        /// 내러티브 요약 생략
        #[arg(long)]
        no_narrative: bool,
    },

    /// 최신 시세 조회
    Quote {
        /// 종목 심볼
        #[arg(short, long)]
        symbol: String,

        /// JSON으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 주기적으로 종목 재분석
    Watch {
        /// 종목 심볼
        #[arg(short, long)]
        symbol: String,

        /// 분석 간격(초), 기본값은 설정의 update_interval_secs
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,

        /// JSON으로 출력
        #[arg(long)]
        json: bool,

        /// 내러티브 요약 생략
        #[arg(long)]
        no_narrative: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env는 선택 사항
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = AppConfig::load(Some(&cli.config))?;

    let log_config = LogConfig::from(&config.logging).with_env_overrides();
    init_logging(log_config).map_err(|e| anyhow::anyhow!(e))?;
    debug!(path = %cli.config.display(), "Configuration loaded");

    if let Err(e) = run(cli.command, config).await {
        error!("Command failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}

async fn run(command: Commands, config: AppConfig) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            symbol,
            json,
            no_narrative,
        } => {
            let ctx = AppContext::new(config, !no_narrative)?;
            let report = run_analysis(&ctx, &symbol).await?;
            println!("{}", OutputFormat::from_json_flag(json).render_report(&report)?);
        }

        Commands::Quote { symbol, json } => {
            let ctx = AppContext::new(config, false)?;
            let bar = run_quote(&ctx, &symbol).await?;
            println!("{}", OutputFormat::from_json_flag(json).render_quote(&symbol, &bar)?);
        }

        Commands::Watch {
            symbol,
            interval,
            json,
            no_narrative,
        } => {
            let every = interval.unwrap_or(config.market_data.update_interval_secs).max(1);
            let ctx = AppContext::new(config, !no_narrative)?;
            run_watch(
                &ctx,
                WatchConfig {
                    symbol,
                    every: Duration::from_secs(every),
                    format: OutputFormat::from_json_flag(json),
                },
            )
            .await?;
        }
    }

    Ok(())
}
