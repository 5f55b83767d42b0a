use std::collections::HashSet;

use chrono::Utc;
use tracing::instrument;

use crate::{
    content::{Category, NewPost, Post, PostDraft, PostPatch, sample_posts},
    error::{Error, Result},
    storage::PostStore,
};

/// 文章来源解析器
///
/// 持有一个可选的远程存储 `S`：
///
/// - 未配置存储时，公开查询返回示例文章，写操作一律失败
/// - 已配置存储时，公开查询以远程结果为准，并与示例文章按 slug 去重合并；
///   查询失败时退回示例文章
///
/// 所有读操作都不会返回错误，页面渲染总能拿到可用的结果。
#[derive(Clone)]
pub struct ContentResolver<S> {
    store: Option<S>,
}

impl<S: PostStore> ContentResolver<S> {
    pub fn new(store: Option<S>) -> Self {
        Self { store }
    }

    /// 是否配置了远程存储
    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    /// 获取所有已发布文章，按创建时间倒序
    #[instrument(skip_all)]
    pub async fn get_all_posts(&self) -> Vec<Post> {
        self.published(None).await
    }

    /// 获取指定分类下的已发布文章，按创建时间倒序
    #[instrument(skip(self))]
    pub async fn get_posts_by_category(&self, category: Category) -> Vec<Post> {
        self.published(Some(category)).await
    }

    /// 根据 slug 获取单篇已发布文章
    ///
    /// 远程查询失败或不存在时，退回示例文章中查找。
    #[instrument(skip(self))]
    pub async fn get_post_by_slug(&self, slug: &str) -> Option<Post> {
        if let Some(store) = &self.store {
            match store.published_by_slug(slug).await {
                Ok(Some(post)) => return Some(post),
                Ok(None) => {}
                Err(e) => tracing::error!(%e, "failed to fetch post by slug"),
            }
        }

        sample_posts()
            .iter()
            .find(|p| p.published && p.slug == slug)
            .cloned()
    }

    /// 最新的 `limit` 篇文章
    pub async fn get_latest_posts(&self, limit: usize) -> Vec<Post> {
        let mut posts = self.get_all_posts().await;
        posts.truncate(limit);
        posts
    }

    /// 同分类的其他文章，不包含 `post` 本身
    pub async fn related_posts(&self, post: &Post, limit: usize) -> Vec<Post> {
        self.get_posts_by_category(post.category)
            .await
            .into_iter()
            .filter(|p| p.slug != post.slug)
            .take(limit)
            .collect()
    }

    /// 管理端文章列表，包括未发布的文章
    ///
    /// 只读取远程存储，不混入示例文章；查询失败时返回空列表，
    /// 避免用示例文章掩盖存储故障。未配置存储时返回全部示例文章。
    #[instrument(skip_all)]
    pub async fn get_all_posts_admin(&self) -> Vec<Post> {
        let Some(store) = &self.store else {
            return sorted(sample_posts().to_vec());
        };

        match store.all().await {
            Ok(posts) => sorted(posts),
            Err(e) => {
                tracing::error!(%e, "failed to fetch admin posts");
                Vec::new()
            }
        }
    }

    /// 创建文章
    ///
    /// 未配置存储、草稿不合法或写入失败时返回 `None`。
    pub async fn create_post(&self, draft: PostDraft) -> Option<Post> {
        let post = match draft.normalize() {
            Ok(post) => post,
            Err(e) => {
                tracing::warn!(%e, "rejected post draft");
                return None;
            }
        };

        self.try_create_post(&post).await.ok()
    }

    /// 写入校验后的文章
    ///
    /// 未配置存储返回 [`Error::StoreUnavailable`]，写入失败返回 [`Error::WriteFailed`]。
    #[instrument(skip_all, fields(slug = %post.slug))]
    pub async fn try_create_post(&self, post: &NewPost) -> Result<Post> {
        let store = self.store.as_ref().ok_or(Error::StoreUnavailable)?;

        match store.insert(post, Utc::now()).await {
            Ok(created) => {
                tracing::info!(id = %created.id, "post created");
                Ok(created)
            }
            Err(e) => {
                tracing::error!(%e, "failed to create post");
                Err(Error::WriteFailed("Failed to save post. Please try again."))
            }
        }
    }

    /// 部分更新文章，同时刷新 `updated_at`
    ///
    /// 未配置存储、文章不存在或写入失败时返回 `None`。
    pub async fn update_post(&self, id: &str, patch: PostPatch) -> Option<Post> {
        self.try_update_post(id, patch).await.ok().flatten()
    }

    /// 部分更新文章，文章不存在时返回 `Ok(None)`
    #[instrument(skip(self, patch))]
    pub async fn try_update_post(&self, id: &str, patch: PostPatch) -> Result<Option<Post>> {
        let store = self.store.as_ref().ok_or(Error::StoreUnavailable)?;

        match store.update(id, &patch.normalize(), Utc::now()).await {
            Ok(Some(updated)) => {
                tracing::info!(slug = %updated.slug, "post updated");
                Ok(Some(updated))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                tracing::error!(%e, "failed to update post");
                Err(Error::WriteFailed("Failed to update post."))
            }
        }
    }

    /// 删除文章，返回是否成功
    ///
    /// 文章本就不存在时也算成功。
    pub async fn delete_post(&self, id: &str) -> bool {
        self.try_delete_post(id).await.is_ok()
    }

    /// 删除文章，返回是否确实删除了记录
    #[instrument(skip(self))]
    pub async fn try_delete_post(&self, id: &str) -> Result<bool> {
        let store = self.store.as_ref().ok_or(Error::StoreUnavailable)?;

        match store.delete(id).await {
            Ok(deleted) => {
                if deleted {
                    tracing::info!("post deleted");
                }
                Ok(deleted)
            }
            Err(e) => {
                tracing::error!(%e, "failed to delete post");
                Err(Error::WriteFailed("Failed to delete post."))
            }
        }
    }

    /// 公开列表的统一入口
    async fn published(&self, category: Option<Category>) -> Vec<Post> {
        let Some(store) = &self.store else {
            return fallback(category);
        };

        match store.published(category).await {
            Ok(remote) => merge_with_samples(remote, category),
            Err(e) => {
                tracing::error!(%e, "failed to fetch posts, using samples");
                fallback(category)
            }
        }
    }
}

/// 已发布的示例文章，可按分类过滤，按创建时间倒序
fn fallback(category: Option<Category>) -> Vec<Post> {
    sorted(
        sample_posts()
            .iter()
            .filter(|p| p.published && category.is_none_or(|c| p.category == c))
            .cloned()
            .collect(),
    )
}

/// 合并远程文章与示例文章
///
/// 远程文章优先；与远程文章 slug 相同的示例文章被丢弃。
/// 远程结果为空时等价于完整的示例文章列表。
fn merge_with_samples(remote: Vec<Post>, category: Option<Category>) -> Vec<Post> {
    let remote_slugs: HashSet<String> = remote.iter().map(|p| p.slug.clone()).collect();

    let mut merged = remote;
    merged.extend(
        fallback(category)
            .into_iter()
            .filter(|p| !remote_slugs.contains(&p.slug)),
    );

    sorted(merged)
}

/// 按创建时间倒序；稳定排序，时间相同保持原有顺序
fn sorted(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}
