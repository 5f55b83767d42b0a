use std::{env, net::SocketAddr};

use crate::error::Result;

/// 默认监听地址
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// 远程存储的连接信息
///
/// 只有连接 URL 和访问密钥都非空时才会存在。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub url: String,
    pub key: String,
}

impl StoreConfig {
    /// 判断是否配置了远程存储，任一项为空都视为未配置
    pub fn new(url: Option<String>, key: Option<String>) -> Option<Self> {
        let url = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())?;
        let key = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())?;
        Some(Self { url, key })
    }
}

/// 应用配置
///
/// 启动时从环境变量解析一次：
///
/// - `DATABASE_URL`：Postgres 连接 URL
/// - `DATABASE_PASSWORD`：访问密钥
/// - `FOLIO_ADDR`：监听地址，默认 `0.0.0.0:3000`
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub store: Option<StoreConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let addr = env::var("FOLIO_ADDR")
            .ok()
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .trim()
            .parse()?;

        let store = StoreConfig::new(
            env::var("DATABASE_URL").ok(),
            env::var("DATABASE_PASSWORD").ok(),
        );

        Ok(Self { addr, store })
    }
}
