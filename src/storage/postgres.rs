use std::{str::FromStr, time::Duration};

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::config::StoreConfig;

/// 数据库连接池类型
pub type DBPool = sqlx::PgPool;

/// 根据 [`StoreConfig`] 创建数据库连接池
///
/// 连接池是惰性的：创建时不建立连接，数据库不可达不会阻塞启动，
/// 而是在查询时返回错误。
///
/// 连接池配置：
///
/// - 最大空闲时间 60 秒
/// - 最大生存时间 1500 秒（约 25 分钟）
/// - 最大连接数 10
/// - 获取连接超时 2 秒
/// - 获取前测试连接
/// - 最小连接数 0
pub fn new_db_pool(config: &StoreConfig) -> Result<DBPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(&config.url)?.password(&config.key);

    Ok(PgPoolOptions::new()
        .idle_timeout(Duration::from_secs(60))
        .max_lifetime(Duration::from_secs(1500))
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(2))
        .test_before_acquire(true)
        .min_connections(0)
        .connect_lazy_with(options))
}

/// 执行 SQL 文件中的迁移语句
///
/// 将文件内容按 `;` 分割，每条 SQL 单独执行
pub async fn migrate(db: &DBPool, file: &str) -> Result<(), sqlx::Error> {
    let content = std::fs::read_to_string(file)?;

    for sql in content.split(';') {
        if sql.trim().is_empty() {
            continue;
        }
        sqlx::query(sql).execute(db).await?;
    }
    Ok(())
}
