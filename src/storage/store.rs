use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::QueryBuilder;

use super::{
    DBPool,
    models::{POST_COLUMNS, PostRow, into_posts},
};
use crate::content::{Category, NewPost, Post, PostChanges};

/// 远程文章存储
///
/// 只提供最基本的查询能力，合并与兜底逻辑由
/// [`ContentResolver`](crate::resolver::ContentResolver) 负责。
/// 时间戳由调用方传入，存储本身不生成。
pub trait PostStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// 查询已发布文章，可按分类过滤，按创建时间倒序
    fn published(
        &self,
        category: Option<Category>,
    ) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send;

    /// 按 slug 查询已发布文章
    fn published_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<Option<Post>, Self::Error>> + Send;

    /// 查询全部文章（包括未发布），按创建时间倒序
    fn all(&self) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send;

    /// 插入文章并返回写入后的结果
    fn insert(
        &self,
        post: &NewPost,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Post, Self::Error>> + Send;

    /// 按 id 更新文章，文章不存在时返回 `None`
    fn update(
        &self,
        id: &str,
        changes: &PostChanges,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Option<Post>, Self::Error>> + Send;

    /// 按 id 删除文章，返回是否删除了记录
    fn delete(&self, id: &str) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}

impl PostStore for DBPool {
    type Error = sqlx::Error;

    async fn published(&self, category: Option<Category>) -> Result<Vec<Post>, Self::Error> {
        let mut builder = QueryBuilder::new("SELECT ");
        builder.push(POST_COLUMNS);
        builder.push(" FROM posts WHERE published = TRUE");
        if let Some(c) = category {
            builder.push(" AND category = ").push_bind(c.as_str());
        }
        builder.push(" ORDER BY created_at DESC");

        let rows = builder.build_query_as::<PostRow>().fetch_all(self).await?;
        into_posts(rows)
    }

    async fn published_by_slug(&self, slug: &str) -> Result<Option<Post>, Self::Error> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE slug = $1 AND published = TRUE LIMIT 1"
        ))
        .bind(slug)
        .fetch_optional(self)
        .await?;

        row.map(Post::try_from).transpose()
    }

    async fn all(&self) -> Result<Vec<Post>, Self::Error> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC"
        ))
        .fetch_all(self)
        .await?;

        into_posts(rows)
    }

    async fn insert(&self, post: &NewPost, now: DateTime<Utc>) -> Result<Post, Self::Error> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            INSERT INTO posts
                (slug, title, excerpt, content, category, cover_image, published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(&post.slug)
        .bind(&post.title)
        .bind(&post.excerpt)
        .bind(&post.content)
        .bind(post.category.as_str())
        .bind(&post.cover_image)
        .bind(post.published)
        .bind(now)
        .fetch_one(self)
        .await?;

        Post::try_from(row)
    }

    async fn update(
        &self,
        id: &str,
        changes: &PostChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Post>, Self::Error> {
        let mut builder = QueryBuilder::new("UPDATE posts SET updated_at = ");
        builder.push_bind(now);

        if let Some(slug) = &changes.slug {
            builder.push(", slug = ").push_bind(slug.clone());
        }
        if let Some(title) = &changes.title {
            builder.push(", title = ").push_bind(title.clone());
        }
        if let Some(excerpt) = &changes.excerpt {
            builder.push(", excerpt = ").push_bind(excerpt.clone());
        }
        if let Some(content) = &changes.content {
            builder.push(", content = ").push_bind(content.clone());
        }
        if let Some(category) = changes.category {
            builder.push(", category = ").push_bind(category.as_str());
        }
        if let Some(cover) = &changes.cover_image {
            builder.push(", cover_image = ").push_bind(cover.clone());
        }
        if let Some(published) = changes.published {
            builder.push(", published = ").push_bind(published);
        }

        builder.push(" WHERE id = ").push_bind(id.to_string());
        builder.push(" RETURNING ").push(POST_COLUMNS);

        let row = builder
            .build_query_as::<PostRow>()
            .fetch_optional(self)
            .await?;

        row.map(Post::try_from).transpose()
    }

    async fn delete(&self, id: &str) -> Result<bool, Self::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
