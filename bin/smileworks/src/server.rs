//! HTTP server: shared state, router, and route handlers.
//!
//! Route handlers follow the site's degradation policy: backend failures
//! render empty sections or static fallbacks, a missing page renders the
//! 404 document, and only the form-submit endpoint reports errors as
//! status codes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use smileworks_cms::store::ListingQuery;
use smileworks_cms::{Resolution, Resolver, backend_from_config, collect_auxiliary, health, mutations};
use smileworks_cms::assets::{AssetProxy, is_valid_file_id};
use smileworks_core::Config;
use smileworks_core::block::BlockContent;
use smileworks_core::content::{ContactContent, ServiceDetailContent};
use smileworks_core::page::{Auxiliary, ResolvedPage};
use smileworks_render::blocks::contact::ContactHandler;
use smileworks_render::blocks::listing::{blog_post_cards, promotion_cards};
use smileworks_render::blocks::services::{ServiceDetailHandler, service_cards};
use smileworks_render::document::render_document;
use smileworks_render::registry::{BlockHandler, RenderContext};
use smileworks_render::{PageRenderer, fallback};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared per-request state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resolver: Resolver,
    pub renderer: Arc<PageRenderer>,
    pub assets: Option<Arc<AssetProxy>>,
}

impl AppState {
    /// Wire the full stack from configuration.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let backend = backend_from_config(&config);
        let store = smileworks_cms::ContentStore::new(backend);
        let assets = AssetProxy::from_config(&config).map(Arc::new);
        Self {
            config: Arc::new(config),
            resolver: Resolver::new(store),
            renderer: Arc::new(PageRenderer::new()),
            assets,
        }
    }
}

/// Build the site router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home_page))
        .route("/contact", get(contact_page))
        .route("/promotions", get(promotions_page))
        .route("/services", get(services_page))
        .route("/services/{slug}", get(service_detail_page))
        .route("/blog", get(blog_page))
        .route("/blog/{slug}", get(blog_post_page))
        .route("/health", get(health_check))
        .route("/api/forms/submit", post(submit_form))
        .route("/assets/{id}", get(asset))
        .route("/{*slug}", get(dynamic_page))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Root route. Never 404s: a missing `home` page serves the static
/// fallback homepage instead.
async fn home_page(State(state): State<AppState>) -> Response {
    match state.resolver.resolve_page("home").await {
        Resolution::Found(page) => page_response(&state, page).await,
        Resolution::NotFound => {
            let body = fallback::homepage(&state.config.site);
            document_response(&state, &state.config.site.name, &body)
        }
    }
}

/// Catch-all page route; reserved prefixes resolve to the 404 document.
async fn dynamic_page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let slug = slug.trim_matches('/');
    match state.resolver.resolve_page(slug).await {
        Resolution::Found(page) => page_response(&state, page).await,
        Resolution::NotFound => not_found(&state),
    }
}

/// Dedicated contact route: narrower resolution that extracts only the
/// contact block (plus the shared locations payload) from the page.
async fn contact_page(State(state): State<AppState>) -> Response {
    let resolved = state.resolver.resolve_page("contact").await.into_page();

    let (content, aux) = match resolved {
        Some(page) => {
            let aux = collect_auxiliary(state.resolver.store(), &page.blocks).await;
            let content = page
                .blocks
                .iter()
                .filter(|block| block.collection == "block_contact")
                .find_map(|block| block.content.clone());
            (content, aux)
        }
        None => (None, Auxiliary::default()),
    };

    // The contact section still renders with defaults when the CMS has no
    // contact page.
    let content = content.unwrap_or_else(|| BlockContent::Contact(ContactContent::default()));
    let ctx = RenderContext {
        block_id: 0,
        aux: &aux,
    };
    let body = ContactHandler.render(&content, &ctx).unwrap_or_default();
    let title = format!("ติดต่อ & นัดหมาย | {}", state.config.site.name);
    document_response(&state, &title, &body)
}

/// Dedicated promotions route: one page, one block tag, plus the catalog.
async fn promotions_page(State(state): State<AppState>) -> Response {
    let store = state.resolver.store();
    let Some(page) = store.page_by_slug("promotions").await else {
        return not_found(&state);
    };

    let blocks = store.page_blocks(page.id).await;
    let Some(promo_block) = blocks
        .iter()
        .find(|block| block.collection == "block_promotions")
    else {
        return not_found(&state);
    };

    let aux = Auxiliary::default();
    let shell = match store
        .block_content(smileworks_core::BlockType::Promotions, &promo_block.item)
        .await
    {
        Some(content) => {
            let ctx = RenderContext {
                block_id: promo_block.id,
                aux: &aux,
            };
            smileworks_render::blocks::listing::PromotionsHandler
                .render(&content, &ctx)
                .unwrap_or_default()
        }
        None => r#"<p class="empty-state">No promotions available.</p>"#.to_string(),
    };

    let cards = promotion_cards(&store.promotions(&ListingQuery::default()).await);
    let body = format!("{shell}\n<div class=\"promotions-grid\">{cards}</div>");
    let title = format!("Promotions | {}", state.config.site.name);
    document_response(&state, &title, &body)
}

/// Dedicated services route: category tabs and the published catalog.
async fn services_page(State(state): State<AppState>) -> Response {
    let store = state.resolver.store();
    let categories = store.service_categories().await;
    let services = store.services().await;

    let tabs: String = categories
        .iter()
        .map(|category| {
            format!(
                r##"<a class="category-tab" href="#{}">{}</a>"##,
                html_escape::encode_double_quoted_attribute(&category.slug),
                html_escape::encode_text(&category.name),
            )
        })
        .collect();

    let body = format!(
        "<section class=\"services-index\">\n<h1>บริการของเรา</h1>\n<nav class=\"category-tabs\">{tabs}</nav>\n<div class=\"services-grid\">{}</div>\n</section>",
        service_cards(&services),
    );
    let title = format!("บริการ | {}", state.config.site.name);
    document_response(&state, &title, &body)
}

/// Single service page, reusing the service-detail section markup.
async fn service_detail_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    let Some(service) = state.resolver.store().service_by_slug(&slug).await else {
        return not_found(&state);
    };

    let title = service
        .seo_title
        .clone()
        .unwrap_or_else(|| format!("{} | {}", service.name, state.config.site.name));
    let description = service.seo_description.clone();

    let detail = ServiceDetailContent {
        service: Some(service),
        ..ServiceDetailContent::default()
    };
    let aux = Auxiliary::default();
    let ctx = RenderContext {
        block_id: 0,
        aux: &aux,
    };
    let body = ServiceDetailHandler
        .render(&BlockContent::ServiceDetail(detail), &ctx)
        .unwrap_or_default();

    match render_document(&title, description.as_deref(), &body) {
        Ok(html) => Html(html).into_response(),
        Err(_) => not_found(&state),
    }
}

/// Blog index: featured post and the published listing.
async fn blog_page(State(state): State<AppState>) -> Response {
    let store = state.resolver.store();
    let posts = store.blog_posts(&Default::default()).await;

    let body = format!(
        "<section class=\"blog-index\">\n<h1>บทความ</h1>\n<div class=\"blog-grid\">{}</div>\n</section>",
        blog_post_cards(&posts),
    );
    let title = format!("บทความ | {}", state.config.site.name);
    document_response(&state, &title, &body)
}

/// Single blog post.
async fn blog_post_page(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    let Some(post) = state.resolver.store().blog_post_by_slug(&slug).await else {
        return not_found(&state);
    };

    let title = post
        .seo_title
        .clone()
        .unwrap_or_else(|| format!("{} | {}", post.title, state.config.site.name));
    let content = post.content.as_deref().unwrap_or_default();
    let body = format!(
        "<article class=\"blog-post\">\n<h1>{}</h1>\n<div class=\"post-body\">{content}</div>\n</article>",
        html_escape::encode_text(&post.title),
    );

    match render_document(&title, post.seo_description.as_deref(), &body) {
        Ok(html) => Html(html).into_response(),
        Err(_) => not_found(&state),
    }
}

/// Backend health snapshot.
async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let status = health::health_status(
        state.resolver.store(),
        state.config.cms_base_url(),
    )
    .await;
    Json(json!(status))
}

#[derive(Debug, Deserialize)]
struct SubmitRequest {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "formId")]
    form_id: Option<i64>,
    #[serde(default)]
    data: Value,
}

/// Form submission endpoint.
async fn submit_form(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Response {
    let store = state.resolver.store();

    let created = match (request.kind.as_str(), request.form_id) {
        ("contact", _) => {
            let name = request.data["name"].as_str().unwrap_or_default();
            let email = request.data["email"].as_str().unwrap_or_default();
            let message = request.data["message"].as_str().unwrap_or_default();
            let phone = request.data["phone"].as_str();
            mutations::create_contact_submission(store, name, email, message, phone).await
        }
        ("form", Some(form_id)) => {
            mutations::create_form_submission(store, form_id, request.data).await
        }
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid submission type"})),
            )
                .into_response();
        }
    };

    match created {
        Some(record) => Json(json!({"success": true, "id": record.id})).into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to create submission"})),
        )
            .into_response(),
    }
}

/// Authenticated asset proxy.
async fn asset(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    if !is_valid_file_id(&id) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid file ID format"})),
        )
            .into_response();
    }

    let Some(proxy) = &state.assets else {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Asset proxy not configured"})),
        )
            .into_response();
    };

    match proxy.fetch(&id).await {
        Ok(fetched) => (
            [
                (header::CONTENT_TYPE, fetched.content_type),
                (
                    header::CACHE_CONTROL,
                    "public, max-age=31536000, immutable".to_string(),
                ),
            ],
            fetched.bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, file = %id, "asset proxy fetch failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "Failed to fetch asset"})),
            )
                .into_response()
        }
    }
}

/// Render a resolved page into the full document.
async fn page_response(state: &AppState, page: ResolvedPage) -> Response {
    let aux = collect_auxiliary(state.resolver.store(), &page.blocks).await;
    let body = state.renderer.render_page(&page.blocks, &aux);
    let title = format!("{} | {}", page.page.title, state.config.site.name);
    document_response(state, &title, &body)
}

fn document_response(state: &AppState, title: &str, body: &str) -> Response {
    match render_document(title, None, body) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "document rendering failed");
            not_found(state)
        }
    }
}

/// The 404 document, served for unknown slugs and reserved prefixes.
fn not_found(state: &AppState) -> Response {
    let body = r#"<section class="not-found"><h1>404</h1><p>ขออภัย ไม่พบหน้าที่คุณต้องการ</p><a class="btn btn-primary" href="/">กลับหน้าแรก</a></section>"#;
    let title = format!("ไม่พบหน้า | {}", state.config.site.name);
    match render_document(&title, None, body) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}
