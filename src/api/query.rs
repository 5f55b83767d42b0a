use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use axum_extra::extract::Query;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Error, Result};
use crate::{
    content::{CATEGORIES, Category, CategoryInfo, Post, category_info},
    resolver::ContentResolver,
    storage::PostStore,
};

/// 文章页展示的相关文章数量
const RELATED_LIMIT: usize = 3;

/// 配置公开查询路由。
///
/// 路由包括：
/// - `GET /posts`：已发布文章列表，可用 `limit` 只取最新的几篇
/// - `GET /posts/{slug}`：获取单篇文章及相关文章
/// - `GET /categories`：所有分类
/// - `GET /categories/{category}`：单个分类的展示信息
/// - `GET /categories/{category}/posts`：分类下的文章
pub fn setup_route<S>() -> Router<ContentResolver<S>>
where
    S: PostStore + Clone + 'static,
{
    Router::new()
        .route("/posts", get(posts_list::<S>))
        .route("/posts/{slug}", get(post_detail::<S>))
        .route("/categories", get(category_list))
        .route("/categories/{category}", get(category))
        .route("/categories/{category}/posts", get(category_posts::<S>))
}

/// 文章元信息，用于列表展示。
#[derive(Debug, Serialize)]
pub struct PostMeta {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub category: &'static CategoryInfo,
    pub cover_image: Option<String>,
    /// 预计阅读时间（分钟）
    pub read_time: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostMeta {
    fn from(post: Post) -> Self {
        Self {
            read_time: post.read_time(),
            category: post.category.info(),
            id: post.id,
            slug: post.slug,
            title: post.title,
            excerpt: post.excerpt,
            cover_image: post.cover_image,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// 完整文章，包括元信息、正文和同分类的相关文章。
#[derive(Debug, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    meta: PostMeta,

    content: String,
    related: Vec<PostMeta>,
}

/// 查询参数，用于文章列表。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    limit: Option<usize>,
}

/// 获取已发布文章列表。
///
/// 指定 `limit` 时只返回最新的 `limit` 篇。
async fn posts_list<S>(
    Query(params): Query<QueryParams>,
    State(resolver): State<ContentResolver<S>>,
) -> Json<Vec<PostMeta>>
where
    S: PostStore + Clone + 'static,
{
    let posts = match params.limit {
        Some(limit) => resolver.get_latest_posts(limit).await,
        None => resolver.get_all_posts().await,
    };
    Json(posts.into_iter().map(PostMeta::from).collect())
}

/// 根据 slug 获取单篇文章。
///
/// 返回 [`PostDetail`]，如果文章不存在返回 [`Error::NotFound`]。
async fn post_detail<S>(
    Path(slug): Path<String>,
    State(resolver): State<ContentResolver<S>>,
) -> Result<Json<PostDetail>>
where
    S: PostStore + Clone + 'static,
{
    let post = resolver
        .get_post_by_slug(&slug)
        .await
        .ok_or(Error::NotFound)?;

    let related = resolver
        .related_posts(&post, RELATED_LIMIT)
        .await
        .into_iter()
        .map(PostMeta::from)
        .collect();

    let content = post.content.clone();
    Ok(Json(PostDetail {
        meta: post.into(),
        content,
        related,
    }))
}

/// 获取所有分类。
async fn category_list() -> Json<&'static [CategoryInfo]> {
    Json(CATEGORIES.as_slice())
}

/// 获取单个分类的展示信息，未知分类返回第一个分类。
async fn category(Path(key): Path<String>) -> Json<&'static CategoryInfo> {
    Json(category_info(&key))
}

/// 获取分类下的已发布文章。
///
/// 分类不存在时返回 [`Error::NotFound`]。
async fn category_posts<S>(
    Path(key): Path<String>,
    State(resolver): State<ContentResolver<S>>,
) -> Result<Json<Vec<PostMeta>>>
where
    S: PostStore + Clone + 'static,
{
    let category: Category = key.parse().map_err(|_| Error::NotFound)?;
    let posts = resolver.get_posts_by_category(category).await;
    Ok(Json(posts.into_iter().map(PostMeta::from).collect()))
}
