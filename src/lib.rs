pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod resolver;
pub mod storage;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

use config::Config;
use resolver::ContentResolver;

/// 初始化日志，解析配置并启动 HTTP 服务
pub async fn run() -> error::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S%.3f".to_string()))
        .with_env_filter(EnvFilter::from_env("FOLIO_LOG"))
        .init();

    let config = Config::from_env()?;

    let store = match &config.store {
        Some(store_config) => Some(storage::new_db_pool(store_config)?),
        None => {
            tracing::warn!("DATABASE_URL or DATABASE_PASSWORD not set, serving sample posts only");
            None
        }
    };

    api::run_server(ContentResolver::new(store), config.addr).await
}
