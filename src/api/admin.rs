use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::{Error, Result};
use crate::{
    content::{Post, PostDraft, PostPatch},
    resolver::ContentResolver,
    storage::PostStore,
};

/// 配置管理路由。
///
/// 路由包括：
/// - `GET /posts`：全部文章，包括未发布的
/// - `POST /posts`：创建文章
/// - `PATCH /posts/{id}`：部分更新文章
/// - `DELETE /posts/{id}`：删除文章
///
/// 这里不做鉴权，访问控制由外层负责。
pub fn setup_route<S>() -> Router<ContentResolver<S>>
where
    S: PostStore + Clone + 'static,
{
    Router::new()
        .route("/posts", get(posts_list::<S>).post(post_create::<S>))
        .route(
            "/posts/{id}",
            axum::routing::patch(post_update::<S>).delete(post_delete::<S>),
        )
}

/// 获取管理端文章列表。
async fn posts_list<S>(State(resolver): State<ContentResolver<S>>) -> Json<Vec<Post>>
where
    S: PostStore + Clone + 'static,
{
    Json(resolver.get_all_posts_admin().await)
}

/// 创建文章。
///
/// 先校验草稿，再写入存储；未配置存储时返回 [`Error::StoreUnavailable`]。
async fn post_create<S>(
    State(resolver): State<ContentResolver<S>>,
    Json(draft): Json<PostDraft>,
) -> Result<(StatusCode, Json<Post>)>
where
    S: PostStore + Clone + 'static,
{
    let post = draft.normalize()?;
    let created = resolver.try_create_post(&post).await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// 部分更新文章。
///
/// 文章不存在返回 [`Error::NotFound`]，写入失败返回 [`Error::WriteFailed`]。
async fn post_update<S>(
    Path(id): Path<String>,
    State(resolver): State<ContentResolver<S>>,
    Json(patch): Json<PostPatch>,
) -> Result<Json<Post>>
where
    S: PostStore + Clone + 'static,
{
    resolver
        .try_update_post(&id, patch)
        .await?
        .map(Json)
        .ok_or(Error::NotFound)
}

/// 删除文章，文章不存在时同样返回 204。
async fn post_delete<S>(
    Path(id): Path<String>,
    State(resolver): State<ContentResolver<S>>,
) -> Result<StatusCode>
where
    S: PostStore + Clone + 'static,
{
    resolver.try_delete_post(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
