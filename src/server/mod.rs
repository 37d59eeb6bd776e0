//! JSON API server

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::query::Blog;
use crate::sitemap;
use crate::Carnet;

/// Server state
pub struct AppState {
    pub blog: Blog,
    pub config: SiteConfig,
}

/// `?page=` on listings
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
}

/// `?q=&page=` on search
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub page: Option<usize>,
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/articles", get(list_articles))
        .route("/api/articles/:slug", get(get_article))
        .route("/api/categories", get(list_categories))
        .route("/api/categories/:slug", get(get_category))
        .route("/api/tags", get(list_tags))
        .route("/api/tags/:slug", get(get_tag))
        .route("/api/search", get(search))
        .route("/api/authors/:id", get(get_author))
        .route("/sitemap.xml", get(get_sitemap))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(carnet: &Carnet, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState {
        blog: carnet.blog(),
        config: carnet.config.clone(),
    });

    // Index before accepting requests so the first one is not slow
    state.blog.warm_up().await;

    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn not_found(message: String) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}

async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> Response {
    let articles = state.blog.get_all().await;
    let page = state.blog.paginate(&articles, params.page.unwrap_or(1), None);
    Json(page).into_response()
}

async fn get_article(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    match state.blog.get_by_slug(&slug).await {
        Some(article) => Json(article).into_response(),
        None => not_found(format!("Article not found: {}", slug)),
    }
}

async fn list_categories(State(state): State<Arc<AppState>>) -> Response {
    Json(state.blog.get_categories().await).into_response()
}

async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    let Some(category) = state.blog.get_category_by_slug(&slug).await else {
        return not_found(format!("Category not found: {}", slug));
    };
    let articles = state.blog.get_by_category(&slug).await;
    let page = state.blog.paginate(&articles, params.page.unwrap_or(1), None);
    Json(json!({ "category": category, "articles": page })).into_response()
}

async fn list_tags(State(state): State<Arc<AppState>>) -> Response {
    Json(state.blog.get_tags().await).into_response()
}

async fn get_tag(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> Response {
    let tags = state.blog.get_tags().await;
    let Some(tag) = tags.into_iter().find(|tag| tag.slug == slug) else {
        return not_found(format!("Tag not found: {}", slug));
    };
    let articles = state.blog.get_by_tag(&slug).await;
    let page = state.blog.paginate(
        &articles,
        params.page.unwrap_or(1),
        Some(state.config.tag_per_page),
    );
    Json(json!({ "tag": tag, "articles": page })).into_response()
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let results = state.blog.search(&params.q).await;
    let page = state.blog.paginate(&results, params.page.unwrap_or(1), None);
    Json(json!({ "query": params.q.trim(), "results": page })).into_response()
}

async fn get_author(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    match state.blog.get_author(&id).await {
        Some(author) => Json(author).into_response(),
        None => not_found(format!("Author not found: {}", id)),
    }
}

async fn get_sitemap(State(state): State<Arc<AppState>>) -> Response {
    let today = chrono::Local::now().date_naive();
    let xml = sitemap::generate(&state.blog, &state.config, today).await;
    ([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml).into_response()
}
