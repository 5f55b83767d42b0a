use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// 文章分类
///
/// 分类集合是封闭的，构建时确定，不会持久化额外的元信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Reviews,
    Geopolitics,
    Finance,
    Coding,
}

/// 分类的展示信息
#[derive(Debug, Serialize)]
pub struct CategoryInfo {
    pub value: Category,
    pub label: &'static str,
    pub color: &'static str,
    pub bg_color: &'static str,
    pub gradient: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// 所有分类，顺序即展示顺序
pub static CATEGORIES: [CategoryInfo; 4] = [
    CategoryInfo {
        value: Category::Reviews,
        label: "Reviews",
        color: "text-blue-600",
        bg_color: "bg-blue-50 dark:bg-blue-950",
        gradient: "from-blue-500 to-cyan-500",
        description: "Product reviews & comparisons",
        icon: "⚡",
    },
    CategoryInfo {
        value: Category::Geopolitics,
        label: "Geopolitics",
        color: "text-rose-600",
        bg_color: "bg-rose-50 dark:bg-rose-950",
        gradient: "from-rose-500 to-orange-500",
        description: "My takes on global affairs",
        icon: "🌍",
    },
    CategoryInfo {
        value: Category::Finance,
        label: "Finance",
        color: "text-emerald-600",
        bg_color: "bg-emerald-50 dark:bg-emerald-950",
        gradient: "from-emerald-500 to-teal-500",
        description: "Investing & financial insights",
        icon: "📈",
    },
    CategoryInfo {
        value: Category::Coding,
        label: "Coding",
        color: "text-violet-600",
        bg_color: "bg-violet-50 dark:bg-violet-950",
        gradient: "from-violet-500 to-purple-500",
        description: "Tech tutorials & development",
        icon: "💻",
    },
];

impl Category {
    /// 分类在数据库和 URL 中使用的 key
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Reviews => "reviews",
            Category::Geopolitics => "geopolitics",
            Category::Finance => "finance",
            Category::Coding => "coding",
        }
    }

    /// 获取分类对应的 [`CategoryInfo`]
    pub fn info(&self) -> &'static CategoryInfo {
        CATEGORIES
            .iter()
            .find(|c| c.value == *self)
            .unwrap_or(&CATEGORIES[0])
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知的分类 key
#[derive(Debug, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATEGORIES
            .iter()
            .map(|c| c.value)
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// 根据 key 查找分类展示信息
///
/// 未知的 key 不会报错，而是返回第一个分类。
pub fn category_info(key: &str) -> &'static CategoryInfo {
    key.parse::<Category>()
        .map(|c| c.info())
        .unwrap_or(&CATEGORIES[0])
}
