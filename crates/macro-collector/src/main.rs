//! MacroPulse 수집기 CLI.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use macro_collector::{commands, CollectorConfig};
use macro_core::{init_logging, LogConfig, LogFormat};

#[derive(Parser)]
#[command(name = "macro-collector")]
#[command(about = "MacroPulse data collector and offline forecaster", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 로그 레벨 (trace, debug, info, warn, error). 없으면 설정의 logging.level
    #[arg(long)]
    log_level: Option<String>,

    /// 설정 파일 경로 (기본: MACROPULSE_CONFIG 또는 config/default.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// FRED에서 CPI, 실업률, 장단기 금리차를 받아 CSV로 저장
    Fetch,

    /// 저장된 데이터로 다음 달 인플레이션 예측 (Random Forest)
    Forecast,

    /// 필립스 곡선으로 주어진 실업률의 인플레이션 추정
    Phillips {
        /// 실업률 (%)
        #[arg(long)]
        unemployment: f64,
    },
}

/// 결과를 pretty JSON으로 stdout에 출력.
fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CollectorConfig::load(cli.config.as_deref()).context("설정 로드 실패")?;

    let filter = config.log_filter(cli.log_level.as_deref());
    let format = config.app.logging.format.parse().unwrap_or(LogFormat::Compact);
    init_logging(LogConfig::new(filter).with_format(format))
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {}", e))?;

    tracing::info!(config = ?config.source, "MacroPulse Collector 시작");

    match cli.command {
        Commands::Fetch => {
            let client = config.fred_client()?;
            let summary = commands::fetch_data(&config, client).await?;
            print_json(&summary)?;
        }
        Commands::Forecast => {
            let forecast = commands::run_forecast(&config)?;
            print_json(&forecast)?;
        }
        Commands::Phillips { unemployment } => {
            let prediction = commands::run_phillips(&config, unemployment)?;
            print_json(&prediction)?;
        }
    }

    tracing::info!("MacroPulse Collector 종료");

    Ok(())
}
