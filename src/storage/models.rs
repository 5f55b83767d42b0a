use chrono::{DateTime, Utc};

use crate::content::{Category, Post};

/// `posts` 表的列，SELECT 和 RETURNING 共用
pub(super) const POST_COLUMNS: &str =
    "id, slug, title, excerpt, content, category, cover_image, published, created_at, updated_at";

/// `posts` 表中的一行
///
/// 分类以文本存储，转换为 [`Post`] 时再解析。
#[derive(Debug, sqlx::FromRow)]
pub struct PostRow {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub cover_image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = sqlx::Error;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse::<Category>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Post {
            id: row.id,
            slug: row.slug,
            title: row.title,
            excerpt: row.excerpt,
            content: row.content,
            category,
            cover_image: row.cover_image,
            published: row.published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// 批量转换，任意一行分类非法则整体失败
pub(super) fn into_posts(rows: Vec<PostRow>) -> Result<Vec<Post>, sqlx::Error> {
    rows.into_iter().map(Post::try_from).collect()
}
