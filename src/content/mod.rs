mod category;
mod post;
mod samples;

pub use self::{
    category::{CATEGORIES, Category, CategoryInfo, UnknownCategory, category_info},
    post::{NewPost, Post, PostChanges, PostDraft, PostPatch, read_time, slugify},
    samples::sample_posts,
};
