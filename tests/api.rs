use axum::{
    Router,
    body::{Body, to_bytes},
    extract::Request,
    http::{Response, StatusCode},
};

use folio::{
    api,
    config::StoreConfig,
    content::sample_posts,
    resolver::ContentResolver,
    storage::{DBPool, new_db_pool},
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

struct TestApp {
    router: Router,
}

impl TestApp {
    /// 未配置数据库，只有示例文章
    fn without_store() -> Self {
        let resolver = ContentResolver::<DBPool>::new(None);
        Self {
            router: api::setup_route(resolver),
        }
    }

    /// 配置了数据库但无法连接，所有查询都会失败
    fn with_unreachable_store() -> Self {
        let config = StoreConfig::new(
            Some("postgres://folio@127.0.0.1:1/folio".to_string()),
            Some("secret".to_string()),
        )
        .expect("配置应有效");
        let pool = new_db_pool(&config).expect("创建连接池失败");
        Self {
            router: api::setup_route(ContentResolver::new(Some(pool))),
        }
    }

    pub async fn request(&self, req: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(req)
            .await
            .expect("oneshot fail")
    }

    async fn get_json(&self, uri: &str, code: StatusCode, msg: &str) -> Value {
        let req = Request::get(uri).body(Body::empty()).expect("请求失败");
        let resp = self.request(req).await;
        assert_eq!(resp.status(), code, "{}", msg);
        let data = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("读取数据失败");
        serde_json::from_slice(&data).unwrap_or(Value::Null)
    }

    async fn post_list(&self, uri: &str, msg: &str) -> Vec<Value> {
        let value = self.get_json(uri, StatusCode::OK, msg).await;
        value.as_array().cloned().expect("响应应为数组")
    }
}

fn slugs(posts: &[Value]) -> Vec<&str> {
    posts.iter().filter_map(|p| p["slug"].as_str()).collect()
}

fn created_at(posts: &[Value]) -> Vec<&str> {
    posts.iter().filter_map(|p| p["created_at"].as_str()).collect()
}

#[tokio::test]
async fn test_public_listing_without_store() {
    let app = TestApp::without_store();

    let posts = app.post_list("/api/posts", "示例文章列表").await;
    assert_eq!(posts.len(), sample_posts().len());

    let dates = created_at(&posts);
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted, "应按创建时间倒序");

    let latest = app.post_list("/api/posts?limit=2", "最新文章").await;
    assert_eq!(slugs(&latest), slugs(&posts)[..2].to_vec());
}

#[tokio::test]
async fn test_category_listing_without_store() {
    let app = TestApp::without_store();

    let coding = app.post_list("/api/categories/coding/posts", "coding 分类").await;
    assert_eq!(
        slugs(&coding),
        vec![
            "full-stack-web-app-with-postgres",
            "why-static-types-are-worth-it"
        ]
    );
    assert!(coding.iter().all(|p| p["category"]["value"] == "coding"));

    app.get_json(
        "/api/categories/cooking/posts",
        StatusCode::NOT_FOUND,
        "未知分类",
    )
    .await;
}

#[tokio::test]
async fn test_post_detail_without_store() {
    let app = TestApp::without_store();

    let detail = app
        .get_json(
            "/api/posts/why-static-types-are-worth-it",
            StatusCode::OK,
            "获取示例文章",
        )
        .await;
    assert_eq!(detail["category"]["label"], "Coding");
    assert!(detail["read_time"].as_u64().is_some_and(|t| t >= 1));
    assert!(detail["content"].as_str().is_some_and(|c| !c.is_empty()));

    let related = detail["related"].as_array().expect("缺少相关文章");
    assert_eq!(slugs(related), vec!["full-stack-web-app-with-postgres"]);

    app.get_json("/api/posts/nonexistent", StatusCode::NOT_FOUND, "不存在的文章")
        .await;
}

#[tokio::test]
async fn test_categories() {
    let app = TestApp::without_store();

    let categories = app.post_list("/api/categories", "分类列表").await;
    let values: Vec<_> = categories
        .iter()
        .filter_map(|c| c["value"].as_str())
        .collect();
    assert_eq!(values, vec!["reviews", "geopolitics", "finance", "coding"]);

    let unknown = app
        .get_json("/api/categories/gardening", StatusCode::OK, "未知分类")
        .await;
    assert_eq!(unknown["value"], "reviews");
}

#[tokio::test]
async fn test_admin_without_store() {
    let app = TestApp::without_store();

    let posts = app.post_list("/api/admin/posts", "管理端示例文章").await;
    assert_eq!(posts.len(), sample_posts().len());

    let req = Request::post("/api/admin/posts")
        .header("Content-Type", "application/json")
        .body(Body::new(
            json!({
                "title": "New Post",
                "content": "hello",
                "category": "coding"
            })
            .to_string(),
        ))
        .expect("请求失败");
    let resp = app.request(req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let req = Request::delete("/api/admin/posts/sample-1")
        .body(Body::empty())
        .expect("请求失败");
    let resp = app.request(req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_unreachable_store_degrades() {
    let app = TestApp::with_unreachable_store();

    // 公开接口退回示例文章
    let posts = app.post_list("/api/posts", "存储不可达时的公开列表").await;
    assert_eq!(posts.len(), sample_posts().len());

    let finance = app
        .post_list("/api/categories/finance/posts", "存储不可达时的分类列表")
        .await;
    assert!(!finance.is_empty());
    assert!(finance.iter().all(|p| p["category"]["value"] == "finance"));

    app.get_json(
        "/api/posts/emergency-fund-first",
        StatusCode::OK,
        "存储不可达时按 slug 查找示例文章",
    )
    .await;
    app.get_json(
        "/api/posts/nonexistent",
        StatusCode::NOT_FOUND,
        "两边都不存在",
    )
    .await;

    // 管理端返回空列表，而不是示例文章
    let admin = app.post_list("/api/admin/posts", "存储不可达时的管理端列表").await;
    assert!(admin.is_empty());
}
