use std::io;

use axum::{http::StatusCode, response::IntoResponse};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not Found")]
    NotFound,

    /// 提交的数据不合法，内容直接返回给调用方
    #[error("{0}")]
    Invalid(&'static str),

    /// 未配置远程存储，写操作不可用
    #[error("post store is not configured")]
    StoreUnavailable,

    /// 写操作失败，具体原因已记录日志
    #[error("{0}")]
    WriteFailed(&'static str),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    AddrParse(#[from] std::net::AddrParseError),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::NotFound => (StatusCode::NOT_FOUND, "NOT FOUND").into_response(),
            Error::Invalid(s) => (StatusCode::BAD_REQUEST, s).into_response(),
            Error::StoreUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Connect a database to save posts",
            )
                .into_response(),
            Error::WriteFailed(s) => (StatusCode::INTERNAL_SERVER_ERROR, s).into_response(),
            Error::Sqlx(e) => {
                tracing::error!(%e, "sqlx error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            .into_response(),
            Error::Io(e) => {
                tracing::error!(%e, "file io error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            .into_response(),
            Error::AddrParse(e) => {
                tracing::error!(%e, "invalid listen address");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            .into_response(),
        }
    }
}
