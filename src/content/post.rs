use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;
use crate::error::{Error, Result};

/// 阅读速度，单位：词/分钟
const WORDS_PER_MINUTE: usize = 200;

/// 博客文章
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// 存储分配的唯一标识
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Markdown 正文
    pub content: String,
    pub category: Category,
    pub cover_image: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// 预计阅读时间，见 [`read_time`]
    pub fn read_time(&self) -> usize {
        read_time(&self.content)
    }
}

/// 管理端提交的文章草稿
///
/// 需要经过 [`PostDraft::normalize`] 校验后才能写入存储。
#[derive(Debug, Clone, Deserialize)]
pub struct PostDraft {
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    pub category: Category,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

/// 校验后的新文章，时间戳由 resolver 在写入时填充
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: Category,
    pub cover_image: Option<String>,
    pub published: bool,
}

impl PostDraft {
    /// 校验草稿并补齐默认值
    ///
    /// - 标题和正文不能为空
    /// - 未提供 slug 时由标题生成
    /// - 未提供摘要时使用标题
    pub fn normalize(self) -> Result<NewPost> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::Invalid("Title is required"));
        }
        if self.content.trim().is_empty() {
            return Err(Error::Invalid("Content is required"));
        }

        let slug = match self.slug.as_deref().map(slugify) {
            Some(s) if !s.is_empty() => s,
            _ => slugify(&title),
        };
        if slug.is_empty() {
            return Err(Error::Invalid("Slug is required"));
        }

        let excerpt = self
            .excerpt
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| title.clone());

        Ok(NewPost {
            slug,
            title,
            excerpt,
            content: self.content,
            category: self.category,
            cover_image: self.cover_image.filter(|c| !c.trim().is_empty()),
            published: self.published,
        })
    }
}

/// 文章的部分更新
///
/// 只有 `Some` 的字段会被写入；`cover_image` 为空字符串时清除封面。
/// 写入前经 [`PostPatch::normalize`] 整理。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostPatch {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<Category>,
    pub cover_image: Option<String>,
    pub published: Option<bool>,
}

/// 整理后的部分更新，存储按字段原样写入
///
/// `cover_image` 为 `Some(None)` 时清除封面。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<Category>,
    pub cover_image: Option<Option<String>>,
    pub published: Option<bool>,
}

impl PostPatch {
    /// slug 重新生成，生成结果为空时不修改；空白封面视为清除
    pub fn normalize(self) -> PostChanges {
        PostChanges {
            slug: self.slug.map(|s| slugify(&s)).filter(|s| !s.is_empty()),
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            category: self.category,
            cover_image: self
                .cover_image
                .map(|c| Some(c.trim().to_string()).filter(|c| !c.is_empty())),
            published: self.published,
        }
    }
}

/// 估算阅读时间（分钟）
///
/// 按空白切分计数，除以 [`WORDS_PER_MINUTE`] 后向上取整，最少 1 分钟。
pub fn read_time(content: &str) -> usize {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

/// 由标题生成 URL 安全的 slug
///
/// ```ignore
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() || ch == '-' {
            pending_dash = true;
        } else if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        }
    }

    slug
}
