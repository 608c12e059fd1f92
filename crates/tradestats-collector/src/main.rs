//! 터미널 내보내기 수집기 CLI.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tradestats_collector::{modules, CollectorConfig};
use tradestats_core::{init_logging, LogConfig};
use tradestats_data::{Database, PgTradeStore};

#[derive(Parser)]
#[command(name = "tradestats-collector")]
#[command(about = "Trading terminal export collector", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 설정 파일 경로
    #[arg(long, default_value = "config/default.toml")]
    config: PathBuf,

    /// 로그 레벨 (trace, debug, info, warn, error). 설정 파일 값보다 우선
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// 내보내기 파일을 한 번 가져오기
    Import {
        /// 터미널 내보내기 JSON 파일
        #[arg(long)]
        file: PathBuf,
    },

    /// 데몬 모드: 주기적으로 같은 파일을 다시 가져오기
    Daemon {
        /// 터미널 내보내기 JSON 파일
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // 설정 로드
    let config = CollectorConfig::load(&cli.config)?;

    // 로깅 초기화
    let mut log_config = LogConfig::from(&config.logging);
    if let Some(level) = cli.log_level {
        log_config.level = level;
    }
    init_logging(log_config)?;

    tracing::info!("Tradestats Collector 시작");

    // DB 연결
    let db = Database::connect(&config.database).await?;
    db.migrate().await?;
    let store = PgTradeStore::new(db.clone());

    // 명령 실행
    match cli.command {
        Commands::Import { file } => {
            let stats = modules::ingest_file(&store, &file).await?;
            stats.log_summary("내보내기 가져오기");
        }
        Commands::Daemon { file } => {
            tracing::info!(
                "=== 데몬 모드 시작 (주기: {}초) ===",
                config.daemon.interval_secs
            );

            let mut interval = tokio::time::interval(config.daemon.interval());
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("종료 신호 수신, 데몬 종료 중...");
                        break;
                    }
                    _ = interval.tick() => {
                        // 실패한 주기는 기록만 하고 다음 주기로 넘어감 (이전 데이터 유지)
                        match modules::ingest_file(&store, &file).await {
                            Ok(stats) => stats.log_summary("내보내기 가져오기"),
                            Err(e) => tracing::error!("가져오기 실패: {}", e),
                        }

                        tracing::info!(
                            "=== 다음 실행: {}초 후 ===",
                            config.daemon.interval_secs
                        );
                    }
                }
            }
        }
    }

    db.pool().close().await;
    tracing::info!("Tradestats Collector 종료");

    Ok(())
}
