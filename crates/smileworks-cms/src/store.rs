//! Typed read accessors over the content backend.
//!
//! Every accessor catches failures internally, logs them with a fixed
//! context label, and returns an empty result. Backend unavailability is
//! never allowed to surface as an error to callers; missing data renders as
//! empty sections or a static fallback instead.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use smileworks_core::block::{BlockContent, BlockType};
use smileworks_core::catalog::{
    BlogCategory, BlogPost, GlobalSettings, NavigationItem, PortfolioCase, PortfolioCategory,
    Promotion, PromotionCategory, Service, ServiceCategory,
};
use smileworks_core::form::Form;
use smileworks_core::page::{Page, PageBlock};

use crate::backend::ContentBackend;
use crate::query::Query;

/// Filter options for the blog post listing.
#[derive(Debug, Clone, Default)]
pub struct BlogQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
    pub limit: Option<u32>,
}

/// Filter options for promotion and portfolio listings.
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    pub category: Option<String>,
    pub featured: Option<bool>,
    pub limit: Option<u32>,
}

/// Typed data access over a [`ContentBackend`].
#[derive(Clone)]
pub struct ContentStore {
    backend: Arc<dyn ContentBackend>,
}

impl ContentStore {
    #[must_use]
    pub fn new(backend: Arc<dyn ContentBackend>) -> Self {
        Self { backend }
    }

    /// The underlying backend, for collaborators that issue their own calls.
    #[must_use]
    pub fn backend(&self) -> &Arc<dyn ContentBackend> {
        &self.backend
    }

    async fn fetch_rows(&self, context: &str, collection: &str, query: &Query) -> Vec<Value> {
        match self.backend.list(collection, query).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(context, error = %e, "content backend request failed");
                Vec::new()
            }
        }
    }

    async fn fetch_list<T>(&self, context: &str, collection: &str, query: &Query) -> Vec<T>
    where
        T: DeserializeOwned,
    {
        self.fetch_rows(context, collection, query)
            .await
            .into_iter()
            .filter_map(|row| decode_row(context, row))
            .collect()
    }

    async fn fetch_first<T>(&self, context: &str, collection: &str, query: &Query) -> Option<T>
    where
        T: DeserializeOwned,
    {
        self.fetch_rows(context, collection, query)
            .await
            .into_iter()
            .next()
            .and_then(|row| decode_row(context, row))
    }

    /// Fetch a published page by slug.
    pub async fn page_by_slug(&self, slug: &str) -> Option<Page> {
        let query = Query::new()
            .filter(json!({"slug": {"_eq": slug}, "status": {"_eq": "published"}}))
            .fields(["id", "title", "slug", "status"])
            .limit(1);
        self.fetch_first("page_by_slug", "pages", &query).await
    }

    /// Fetch a page's block join rows, sorted by `sort`.
    pub async fn page_blocks(&self, page_id: i64) -> Vec<PageBlock> {
        let query = Query::new()
            .filter(json!({"page": {"_eq": page_id}}))
            .fields(["id", "page", "collection", "item", "sort", "hide_block"])
            .sort(["sort"]);
        self.fetch_list("page_blocks", "page_blocks", &query).await
    }

    /// Fetch a published page together with its block stubs in one round
    /// trip.
    ///
    /// The nested relation query returns block rows without their content
    /// records. `None` means the page was absent or the nested query shape
    /// is unsupported; callers fall back to separate queries.
    pub async fn page_with_nested_blocks(&self, slug: &str) -> Option<(Page, Vec<PageBlock>)> {
        let query = Query::new()
            .filter(json!({"slug": {"_eq": slug}, "status": {"_eq": "published"}}))
            .fields([
                "*",
                "blocks.id",
                "blocks.collection",
                "blocks.item",
                "blocks.sort",
            ])
            .limit(1);
        let row = self
            .fetch_rows("page_with_nested_blocks", "pages", &query)
            .await
            .into_iter()
            .next()?;

        let page: Page = decode_row("page_with_nested_blocks", row.clone())?;

        // The exact partial-support behavior is backend specific: some
        // versions omit the nested field entirely, some return null. Either
        // way the caller must use the separate-query path.
        let stubs = match row.get("blocks") {
            Some(Value::Array(stubs)) => stubs.clone(),
            _ => return None,
        };

        let blocks = stubs
            .into_iter()
            .filter_map(|stub| decode_row::<NestedBlockStub>("page_with_nested_blocks", stub))
            .map(|stub| stub.into_page_block(page.id))
            .collect();
        Some((page, blocks))
    }

    /// Fetch one block's content record by collection tag and item key.
    ///
    /// Two collections widen the field selection: the team roster expands
    /// its dentist relation, and the service detail embeds the full service.
    pub async fn block_content(&self, tag: BlockType, item: &str) -> Option<BlockContent> {
        let fields: &[&str] = match tag {
            BlockType::ServiceDetail => &["*", "service.*", "service.hero_image.*"],
            BlockType::Team => &[
                "id",
                "title",
                "subtitle",
                "note",
                "dentists.dentist_id.id",
                "dentists.dentist_id.name",
                "dentists.dentist_id.nickname",
                "dentists.dentist_id.specialty",
                "dentists.dentist_id.photo",
                "dentists.dentist_id.photo_url",
                "dentists.dentist_id.linkedin_url",
                "dentists.dentist_id.status",
                "dentists.sort",
            ],
            _ => &["*"],
        };

        let query = Query::new()
            .filter(json!({"id": {"_eq": item_key(item)}}))
            .fields(fields.iter().copied())
            .limit(1);
        let row = self
            .fetch_rows("block_content", tag.tag(), &query)
            .await
            .into_iter()
            .next()?;

        match BlockContent::from_value(tag, row) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::error!(context = "block_content", collection = %tag, error = %e,
                    "failed to decode block content");
                None
            }
        }
    }

    /// Fetch a form definition (including its fields) by id.
    pub async fn form_by_id(&self, form_id: i64) -> Option<Form> {
        let query = Query::new()
            .filter(json!({"id": {"_eq": form_id}}))
            .fields(["*", "fields.*"])
            .limit(1);
        self.fetch_first("form_by_id", "forms", &query).await
    }

    /// Fetch a form definition by slug.
    pub async fn form_by_slug(&self, slug: &str) -> Option<Form> {
        let query = Query::new()
            .filter(json!({"slug": {"_eq": slug}}))
            .fields(["*", "fields.*"])
            .limit(1);
        self.fetch_first("form_by_slug", "forms", &query).await
    }

    /// Fetch the global settings singleton.
    pub async fn global_settings(&self) -> Option<GlobalSettings> {
        let query = Query::new().fields(["id", "site_name", "site_description", "logo", "favicon"]);
        match self.backend.singleton("global_settings", &query).await {
            Ok(Value::Null) => None,
            Ok(value) => decode_row("global_settings", value),
            Err(e) => {
                tracing::error!(context = "global_settings", error = %e,
                    "content backend request failed");
                None
            }
        }
    }

    /// Fetch top-level navigation items with their children.
    ///
    /// The backend sorts by `(sort, id)`; a stable client-side re-sort backs
    /// that up because null sort values order inconsistently server-side.
    pub async fn navigation_items(&self) -> Vec<NavigationItem> {
        let query = Query::new()
            .filter(json!({"parent": {"_null": true}}))
            .fields([
                "*",
                "page.slug",
                "page.id",
                "children.*",
                "children.page.slug",
                "children.page.id",
            ])
            .sort(["sort", "id"]);
        let mut items: Vec<NavigationItem> =
            self.fetch_list("navigation_items", "navigation", &query).await;

        warn_on_duplicate_sorts(&items);
        sort_navigation(&mut items);
        items
    }

    /// Fetch all service categories.
    pub async fn service_categories(&self) -> Vec<ServiceCategory> {
        let query = Query::new()
            .fields(["id", "name", "slug", "description", "icon_name", "sort"])
            .sort(["sort", "name"]);
        self.fetch_list("service_categories", "service_categories", &query)
            .await
    }

    /// Fetch all published services.
    pub async fn services(&self) -> Vec<Service> {
        let query = Query::new()
            .filter(json!({"status": {"_eq": "published"}}))
            .fields([
                "id",
                "name",
                "slug",
                "status",
                "short_description",
                "long_description",
                "duration_label",
                "price_from",
                "hero_image",
                "seo_title",
                "seo_description",
                "highlights",
                "category",
            ])
            .sort(["name"]);
        self.fetch_list("services", "services", &query).await
    }

    /// Fetch one published service by slug, with category and hero image
    /// expanded.
    pub async fn service_by_slug(&self, slug: &str) -> Option<Service> {
        let query = Query::new()
            .filter(json!({"slug": {"_eq": slug}, "status": {"_eq": "published"}}))
            .fields(["*", "category.*", "hero_image.*"])
            .limit(1);
        self.fetch_first("service_by_slug", "services", &query).await
    }

    /// Fetch promotion categories.
    pub async fn promotion_categories(&self) -> Vec<PromotionCategory> {
        let query = Query::new().fields(["*"]).sort(["sort", "name"]);
        self.fetch_list("promotion_categories", "promotion_categories", &query)
            .await
    }

    /// Fetch published promotions, optionally filtered.
    pub async fn promotions(&self, options: &ListingQuery) -> Vec<Promotion> {
        let query = Query::new()
            .filter(listing_filter(options))
            .fields(["*", "category.*", "featured_image.*"])
            .sort(["sort"])
            .limit(options.limit.unwrap_or(100));
        self.fetch_list("promotions", "promotions", &query).await
    }

    /// Fetch blog categories.
    pub async fn blog_categories(&self) -> Vec<BlogCategory> {
        let query = Query::new()
            .fields(["id", "name", "slug", "description", "color", "sort"])
            .sort(["sort"]);
        self.fetch_list("blog_categories", "blog_categories", &query)
            .await
    }

    /// Fetch published blog posts, newest first, optionally filtered.
    pub async fn blog_posts(&self, options: &BlogQuery) -> Vec<BlogPost> {
        let mut filter = json!({"status": {"_eq": "published"}});
        if let Some(category) = &options.category {
            filter["category"] = json!({"slug": {"_eq": category}});
        }
        if let Some(featured) = options.featured {
            filter["is_featured"] = json!({"_eq": featured});
        }
        if let Some(search) = &options.search {
            filter["_or"] = json!([
                {"title": {"_icontains": search}},
                {"excerpt": {"_icontains": search}},
                {"content": {"_icontains": search}},
            ]);
        }

        let query = Query::new()
            .filter(filter)
            .fields([
                "id",
                "title",
                "slug",
                "status",
                "excerpt",
                "content",
                "author_name",
                "author_role",
                "author_avatar",
                "published_date",
                "reading_time",
                "views",
                "is_featured",
                "tags",
                "category",
                "featured_image",
            ])
            .sort(["-published_date"])
            .limit(options.limit.unwrap_or(100));
        self.fetch_list("blog_posts", "blog_posts", &query).await
    }

    /// Fetch one published blog post by slug.
    ///
    /// The slug is URI-decoded first so Thai-script slugs resolve.
    pub async fn blog_post_by_slug(&self, slug: &str) -> Option<BlogPost> {
        let decoded = percent_decode(slug);
        let query = Query::new()
            .filter(json!({"slug": {"_eq": decoded}, "status": {"_eq": "published"}}))
            .fields(["*"])
            .limit(1);
        self.fetch_first("blog_post_by_slug", "blog_posts", &query)
            .await
    }

    /// Fetch the most recent featured blog post.
    pub async fn featured_blog_post(&self) -> Option<BlogPost> {
        let query = Query::new()
            .filter(json!({"is_featured": {"_eq": true}, "status": {"_eq": "published"}}))
            .fields(["*"])
            .sort(["-published_date"])
            .limit(1);
        self.fetch_first("featured_blog_post", "blog_posts", &query)
            .await
    }

    /// Fetch portfolio categories.
    pub async fn portfolio_categories(&self) -> Vec<PortfolioCategory> {
        let query = Query::new().fields(["*"]).sort(["sort", "name"]);
        self.fetch_list("portfolio_categories", "portfolio_categories", &query)
            .await
    }

    /// Fetch published portfolio cases, optionally filtered.
    pub async fn portfolio_cases(&self, options: &ListingQuery) -> Vec<PortfolioCase> {
        let query = Query::new()
            .filter(listing_filter(options))
            .fields(["*", "category.*", "image_before.*", "image_after.*"])
            .sort(["sort"])
            .limit(options.limit.unwrap_or(100));
        self.fetch_list("portfolio_cases", "portfolio_cases", &query)
            .await
    }
}

/// Nested block row shape returned by the page-with-blocks query.
#[derive(Debug, serde::Deserialize)]
struct NestedBlockStub {
    id: i64,
    collection: String,
    item: Value,
    #[serde(default)]
    sort: Option<i64>,
}

impl NestedBlockStub {
    fn into_page_block(self, page_id: i64) -> PageBlock {
        let item = match self.item {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        };
        PageBlock {
            id: self.id,
            page: page_id,
            collection: self.collection,
            item,
            sort: self.sort,
            hide_block: false,
        }
    }
}

fn decode_row<T: DeserializeOwned>(context: &str, row: Value) -> Option<T> {
    match serde_json::from_value(row) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(context, error = %e, "failed to decode record");
            None
        }
    }
}

/// Item keys are numeric for most collections but stay opaque strings on
/// the join row; filter with the numeric form when it parses.
fn item_key(item: &str) -> Value {
    match item.parse::<i64>() {
        Ok(n) => n.into(),
        Err(_) => item.into(),
    }
}

fn listing_filter(options: &ListingQuery) -> Value {
    let mut filter = json!({"status": {"_eq": "published"}});
    if let Some(category) = &options.category {
        filter["category"] = json!({"slug": {"_eq": category}});
    }
    if let Some(featured) = options.featured {
        filter["is_featured"] = json!({"_eq": featured});
    }
    filter
}

/// Order items by `(sort, id)` with absent sort values last. Duplicate or
/// null sort values coming back from the backend are not ordered
/// consistently server-side, so this runs on every fetch.
fn sort_navigation(items: &mut [NavigationItem]) {
    items.sort_by_key(|item| (item.sort.unwrap_or(i64::MAX), item.id));
}

fn warn_on_duplicate_sorts(items: &[NavigationItem]) {
    let mut seen = std::collections::HashSet::new();
    let mut duplicates = Vec::new();
    for item in items {
        if let Some(sort) = item.sort {
            if !seen.insert(sort) {
                duplicates.push(sort);
            }
        }
    }
    if !duplicates.is_empty() {
        duplicates.dedup();
        tracing::warn!(
            ?duplicates,
            "navigation has duplicate sort values; ordering may be unpredictable"
        );
    }
}

/// Percent-decode a slug (UTF-8 sequences, e.g. Thai script); invalid
/// encodings fall through unchanged.
fn percent_decode(input: &str) -> String {
    urlencoding::decode(input)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_key_prefers_numeric() {
        assert_eq!(item_key("42"), json!(42));
        assert_eq!(item_key("abc-uuid"), json!("abc-uuid"));
    }

    #[test]
    fn test_listing_filter_composition() {
        let filter = listing_filter(&ListingQuery {
            category: Some("ortho".to_string()),
            featured: Some(true),
            limit: None,
        });
        assert_eq!(filter["status"]["_eq"], "published");
        assert_eq!(filter["category"]["slug"]["_eq"], "ortho");
        assert_eq!(filter["is_featured"]["_eq"], true);
    }

    #[test]
    fn test_sort_navigation_nulls_last_ties_by_id() {
        let mut items: Vec<NavigationItem> = serde_json::from_value(json!([
            {"id": 4, "title": "Dangling"},
            {"id": 3, "title": "Contact", "sort": 2},
            {"id": 2, "title": "Services", "sort": 1},
            {"id": 1, "title": "Home", "sort": 1},
        ]))
        .expect("decode items");

        sort_navigation(&mut items);
        let ids: Vec<i64> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_percent_decode_thai_slug() {
        assert_eq!(percent_decode("%E0%B8%9F%E0%B8%B1%E0%B8%99"), "ฟัน");
        assert_eq!(percent_decode("plain-slug"), "plain-slug");
        assert_eq!(percent_decode("bad%zz"), "bad%zz");
    }
}
