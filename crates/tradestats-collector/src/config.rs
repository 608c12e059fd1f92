//! 수집기 설정 모듈.
//!
//! 공용 `AppConfig`에서 수집기가 사용하는 섹션만 꺼내옵니다.

use crate::Result;
use std::path::Path;
use std::time::Duration;
use tradestats_core::{AppConfig, DatabaseConfig, LoggingConfig};

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
    /// 데몬 모드 설정
    pub daemon: DaemonConfig,
}

/// 데몬 모드 설정
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    /// 가져오기 주기 (초 단위)
    pub interval_secs: u64,
}

impl DaemonConfig {
    /// 주기를 Duration으로 반환
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl From<AppConfig> for CollectorConfig {
    fn from(app: AppConfig) -> Self {
        Self {
            database: app.database,
            logging: app.logging,
            daemon: DaemonConfig {
                interval_secs: app.collector.interval_secs,
            },
        }
    }
}

impl CollectorConfig {
    /// `.env`, 설정 파일, 환경 변수 순서로 설정 로드
    pub fn load(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut app = AppConfig::load(path)?;

        // 관례적인 DATABASE_URL도 허용
        if let Ok(url) = std::env::var("DATABASE_URL") {
            app.database.url = url;
        }

        Ok(Self::from(app))
    }
}
