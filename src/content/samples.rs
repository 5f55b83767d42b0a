use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{Category, Post};

/// 示例文章解析错误，只在启动时记录日志
#[derive(Debug, thiserror::Error)]
enum SampleError {
    #[error("{0}")]
    Format(&'static str),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

type Result<T> = core::result::Result<T, SampleError>;

/// 打包进二进制的示例文章原文 (文件名, 内容)
const SAMPLE_SOURCES: &[(&str, &str)] = &[
    (
        "iphone-16-vs-google-pixel-9.md",
        include_str!("../../samples/iphone-16-vs-google-pixel-9.md"),
    ),
    (
        "shifting-power-dynamics-indo-pacific.md",
        include_str!("../../samples/shifting-power-dynamics-indo-pacific.md"),
    ),
    (
        "africa-next-economic-frontier.md",
        include_str!("../../samples/africa-next-economic-frontier.md"),
    ),
    (
        "full-stack-web-app-with-postgres.md",
        include_str!("../../samples/full-stack-web-app-with-postgres.md"),
    ),
    (
        "why-static-types-are-worth-it.md",
        include_str!("../../samples/why-static-types-are-worth-it.md"),
    ),
    (
        "index-funds-boring-is-beautiful.md",
        include_str!("../../samples/index-funds-boring-is-beautiful.md"),
    ),
    (
        "emergency-fund-first.md",
        include_str!("../../samples/emergency-fund-first.md"),
    ),
];

/// 示例文章集合
///
/// 进程内只解析一次，运行期只读。没有配置远程存储或远程存储出错时，
/// 公开页面使用这里的文章兜底。
static SAMPLE_POSTS: LazyLock<Vec<Post>> = LazyLock::new(|| {
    SAMPLE_SOURCES
        .iter()
        .filter_map(|(name, source)| match parse_sample(source) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::error!(%e, sample = name, "invalid sample post");
                None
            }
        })
        .collect()
});

/// 获取全部示例文章
pub fn sample_posts() -> &'static [Post] {
    &SAMPLE_POSTS
}

#[derive(Debug, Deserialize)]
struct SampleFrontMatter {
    id: String,
    title: String,
    slug: String,
    excerpt: String,
    category: Category,
    #[serde(default)]
    cover_image: Option<String>,
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// 解析带 YAML Front Matter 的 Markdown 示例文章
fn parse_sample(source: &str) -> Result<Post> {
    let (yaml_str, body) = extract_front_matter_and_body(source)?;
    let meta: SampleFrontMatter = serde_yaml::from_str(yaml_str)?;

    Ok(Post {
        id: meta.id,
        slug: meta.slug,
        title: meta.title,
        excerpt: meta.excerpt,
        content: body.to_string(),
        category: meta.category,
        cover_image: meta.cover_image,
        published: meta.published,
        created_at: meta.created_at,
        updated_at: meta.updated_at,
    })
}

/// 从原始 Markdown 内容中提取 Front Matter 字符串和正文。
fn extract_front_matter_and_body(content: &str) -> Result<(&str, &str)> {
    const DELIM: &str = "---";

    let content = content.trim_start();

    let rest = content
        .strip_prefix(DELIM)
        .ok_or(SampleError::Format("Missing required YAML front matter"))?;

    let (yaml_str, body_str) = rest.split_once(DELIM).ok_or(SampleError::Format(
        "Front matter does not terminate with expected delimiter ---",
    ))?;

    Ok((yaml_str.trim(), body_str.trim()))
}
