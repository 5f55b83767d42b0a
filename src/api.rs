mod admin;
mod query;

use std::net::SocketAddr;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::{
    error::{Error, Result},
    resolver::ContentResolver,
    storage::PostStore,
};

/// 设置应用的路由。
///
/// `/api` 下挂载公开查询接口，`/api/admin` 下挂载管理接口，并绑定 [`ContentResolver`]。
pub fn setup_route<S>(resolver: ContentResolver<S>) -> Router
where
    S: PostStore + Clone + 'static,
{
    Router::new()
        .nest(
            "/api",
            query::setup_route::<S>().nest("/admin", admin::setup_route::<S>()),
        )
        .with_state(resolver)
}

/// 启动 HTTP 服务，并使用给定的路由处理请求。
#[instrument(name = "http server", skip(router))]
pub async fn run_server_with_router(router: Router, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("listening on {addr}");

    axum::serve(listener, router).await?;
    Ok(())
}

/// 启动 HTTP 服务，自动设置路由和中间件。
///
/// 1. 生成路由
/// 2. 添加日志和追踪中间件
/// 3. 启动服务器
pub async fn run_server<S>(resolver: ContentResolver<S>, addr: SocketAddr) -> Result<()>
where
    S: PostStore + Clone + 'static,
{
    let router = setup_route(resolver);
    let router = add_middlewares(router);
    run_server_with_router(router, addr).await
}

/// 为路由添加中间件，包括请求追踪和失败日志记录。
///
/// 日志记录会在请求失败时输出错误信息。
fn add_middlewares(router: Router) -> Router {
    fn log_failure(
        err: tower_http::classify::ServerErrorsFailureClass,
        _latency: std::time::Duration,
        _span: &tracing::Span,
    ) {
        tracing::error!(error = %err, "request failed");
    }

    router.layer(
        TraceLayer::new_for_http()
            .on_failure(log_failure)
            .on_request(|_req: &_, _span: &tracing::Span| {
                // 空实现，关闭请求日志
            }),
    )
}
