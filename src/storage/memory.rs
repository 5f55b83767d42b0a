use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use chrono::{DateTime, Utc};

use super::PostStore;
use crate::content::{Category, NewPost, Post, PostChanges};

/// 内存中的 [`PostStore`]，仅用于测试
///
/// 可以通过 [`MemoryStore::set_failing`] 模拟存储故障。
#[derive(Clone, Default)]
pub struct MemoryStore {
    posts: Arc<Mutex<Vec<Post>>>,
    failing: Arc<AtomicBool>,
    next_id: Arc<AtomicUsize>,
}

#[derive(Debug, thiserror::Error)]
#[error("memory store unavailable")]
pub struct MemoryStoreError;

impl MemoryStore {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let store = Self::default();
        *store.posts.lock().unwrap() = posts;
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), MemoryStoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(MemoryStoreError)
        } else {
            Ok(())
        }
    }

    /// 与数据库一致：创建时间倒序
    fn sorted(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}

impl PostStore for MemoryStore {
    type Error = MemoryStoreError;

    async fn published(&self, category: Option<Category>) -> Result<Vec<Post>, Self::Error> {
        self.check()?;
        let posts = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.published && category.is_none_or(|c| p.category == c))
            .cloned()
            .collect();
        Ok(Self::sorted(posts))
    }

    async fn published_by_slug(&self, slug: &str) -> Result<Option<Post>, Self::Error> {
        self.check()?;
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.published && p.slug == slug)
            .cloned())
    }

    async fn all(&self) -> Result<Vec<Post>, Self::Error> {
        self.check()?;
        Ok(Self::sorted(self.snapshot()))
    }

    async fn insert(&self, post: &NewPost, now: DateTime<Utc>) -> Result<Post, Self::Error> {
        self.check()?;
        let mut posts = self.posts.lock().unwrap();
        if posts.iter().any(|p| p.slug == post.slug) {
            return Err(MemoryStoreError);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let created = Post {
            id: format!("mem-{id}"),
            slug: post.slug.clone(),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            content: post.content.clone(),
            category: post.category,
            cover_image: post.cover_image.clone(),
            published: post.published,
            created_at: now,
            updated_at: now,
        };
        posts.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: &str,
        changes: &PostChanges,
        now: DateTime<Utc>,
    ) -> Result<Option<Post>, Self::Error> {
        self.check()?;
        let mut posts = self.posts.lock().unwrap();
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if let Some(slug) = &changes.slug {
            post.slug = slug.clone();
        }
        if let Some(title) = &changes.title {
            post.title = title.clone();
        }
        if let Some(excerpt) = &changes.excerpt {
            post.excerpt = excerpt.clone();
        }
        if let Some(content) = &changes.content {
            post.content = content.clone();
        }
        if let Some(category) = changes.category {
            post.category = category;
        }
        if let Some(cover) = &changes.cover_image {
            post.cover_image = cover.clone();
        }
        if let Some(published) = changes.published {
            post.published = published;
        }
        post.updated_at = now;

        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool, Self::Error> {
        self.check()?;
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }
}
