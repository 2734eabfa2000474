//! Resolution and auxiliary-data tests against an instrumented in-memory
//! backend.
//!
//! The fake backend records which collections are listed, tracks concurrent
//! in-flight content fetches, and can delay or fail individual lookups to
//! simulate out-of-order completion and partial outages.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use smileworks_cms::backend::ContentBackend;
use smileworks_cms::error::{CmsError, Result};
use smileworks_cms::mutations;
use smileworks_cms::query::Query;
use smileworks_cms::{ContentStore, Resolution, Resolver, Strategy, collect_auxiliary};

#[derive(Default)]
struct FakeBackend {
    /// Page records keyed by slug.
    pages: HashMap<String, Value>,

    /// Nested block stubs attached to the page when the backend "supports"
    /// nested relation queries.
    nested_blocks: HashMap<String, Vec<Value>>,
    nested_supported: bool,

    /// Block join rows keyed by page id.
    page_blocks: HashMap<i64, Vec<Value>>,

    /// Content records keyed by (collection, id).
    content: HashMap<(String, String), Value>,

    /// Form definitions keyed by id.
    forms: HashMap<i64, Value>,

    /// Collections whose every request fails.
    fail_collections: HashSet<String>,

    /// Form ids whose lookup fails.
    fail_form_ids: HashSet<i64>,

    /// Per-item content fetch delay in milliseconds.
    delays_ms: HashMap<String, u64>,

    /// Instrumentation.
    listed: Mutex<Vec<String>>,
    content_started: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,

    /// Created records.
    created: Mutex<Vec<(String, Value)>>,
}

impl FakeBackend {
    fn listed(&self) -> Vec<String> {
        self.listed.lock().unwrap().clone()
    }

    fn content_started(&self) -> Vec<String> {
        self.content_started.lock().unwrap().clone()
    }

    fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn filter_eq<'a>(query: &'a Query, key: &str) -> Option<&'a Value> {
        query.filter_value()?.get(key)?.get("_eq")
    }

    async fn fetch_content(&self, collection: &str, query: &Query) -> Result<Vec<Value>> {
        let id = Self::filter_eq(query, "id")
            .map(value_key)
            .unwrap_or_default();

        self.content_started.lock().unwrap().push(id.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays_ms.get(&id).copied().unwrap_or(10);
        tokio::time::sleep(Duration::from_millis(delay)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        Ok(self
            .content
            .get(&(collection.to_string(), id))
            .cloned()
            .into_iter()
            .collect())
    }
}

#[async_trait]
impl ContentBackend for FakeBackend {
    async fn list(&self, collection: &str, query: &Query) -> Result<Vec<Value>> {
        self.listed.lock().unwrap().push(collection.to_string());

        if self.fail_collections.contains(collection) {
            return Err(CmsError::Api {
                status: 500,
                message: "backend exploded".to_string(),
            });
        }

        match collection {
            "pages" => {
                let slug = Self::filter_eq(query, "slug")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let Some(page) = self.pages.get(slug) else {
                    return Ok(vec![]);
                };

                let nested_requested = query
                    .field_list()
                    .iter()
                    .any(|field| field.starts_with("blocks."));
                let mut page = page.clone();
                if nested_requested && self.nested_supported {
                    if let Some(stubs) = self.nested_blocks.get(slug) {
                        page["blocks"] = Value::Array(stubs.clone());
                    }
                }
                Ok(vec![page])
            }
            "page_blocks" => {
                let page_id = Self::filter_eq(query, "page")
                    .and_then(Value::as_i64)
                    .unwrap_or_default();
                Ok(self.page_blocks.get(&page_id).cloned().unwrap_or_default())
            }
            "forms" => {
                let form_id = Self::filter_eq(query, "id")
                    .and_then(Value::as_i64)
                    .unwrap_or_default();
                if self.fail_form_ids.contains(&form_id) {
                    return Err(CmsError::Api {
                        status: 500,
                        message: "form lookup failed".to_string(),
                    });
                }
                Ok(self.forms.get(&form_id).cloned().into_iter().collect())
            }
            _ => self.fetch_content(collection, query).await,
        }
    }

    async fn singleton(&self, _collection: &str, _query: &Query) -> Result<Value> {
        Ok(Value::Null)
    }

    async fn create(&self, collection: &str, payload: Value) -> Result<Value> {
        self.created
            .lock()
            .unwrap()
            .push((collection.to_string(), payload));
        Ok(json!({"id": 321}))
    }
}

fn value_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A page with `count` text blocks, ids and items numbered from 1.
fn backend_with_blocks(count: usize, nested_supported: bool) -> FakeBackend {
    let mut backend = FakeBackend {
        nested_supported,
        ..FakeBackend::default()
    };

    backend.pages.insert(
        "about".to_string(),
        json!({"id": 1, "title": "About", "slug": "about", "status": "published"}),
    );

    let mut rows = Vec::new();
    let mut stubs = Vec::new();
    for n in 1..=count as i64 {
        rows.push(json!({
            "id": n, "page": 1, "collection": "block_text",
            "item": n.to_string(), "sort": n,
        }));
        stubs.push(json!({
            "id": n, "collection": "block_text", "item": n.to_string(), "sort": n,
        }));
        backend.content.insert(
            ("block_text".to_string(), n.to_string()),
            json!({"id": n, "title": format!("Section {n}")}),
        );
    }
    backend.page_blocks.insert(1, rows);
    backend.nested_blocks.insert("about".to_string(), stubs);
    backend
}

fn resolver_for(backend: FakeBackend) -> (Arc<FakeBackend>, Resolver) {
    let backend = Arc::new(backend);
    let store = ContentStore::new(backend.clone() as Arc<dyn ContentBackend>);
    (backend, Resolver::new(store))
}

fn block_titles(resolution: &Resolution) -> Vec<String> {
    match resolution {
        Resolution::Found(page) => page
            .blocks
            .iter()
            .filter_map(|block| block.content.as_ref())
            .filter_map(|content| content.as_text())
            .filter_map(|text| text.title.clone())
            .collect(),
        Resolution::NotFound => panic!("expected resolved page"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_nested_strategy_wins_when_supported() {
    let (backend, resolver) = resolver_for(backend_with_blocks(3, true));

    let resolution = resolver.resolve_page("about").await;
    assert_eq!(
        block_titles(&resolution),
        vec!["Section 1", "Section 2", "Section 3"]
    );

    // One page query, no separate block-list query.
    let listed = backend.listed();
    assert_eq!(listed.iter().filter(|c| *c == "pages").count(), 1);
    assert!(!listed.iter().any(|c| c == "page_blocks"));
}

#[tokio::test(start_paused = true)]
async fn test_falls_back_to_batched_when_nested_unsupported() {
    let (backend, resolver) = resolver_for(backend_with_blocks(3, false));

    let resolution = resolver.resolve_page("about").await;
    assert_eq!(
        block_titles(&resolution),
        vec!["Section 1", "Section 2", "Section 3"]
    );

    // Nested attempt plus the batched page fetch, then the block list.
    let listed = backend.listed();
    assert_eq!(listed.iter().filter(|c| *c == "pages").count(), 2);
    assert_eq!(listed.iter().filter(|c| *c == "page_blocks").count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_batched_strategy_groups_of_five_preserve_order() {
    let mut backend = backend_with_blocks(12, false);
    // Invert completion order inside each batch.
    for n in 1..=12_i64 {
        backend
            .delays_ms
            .insert(n.to_string(), 200 - (n as u64) * 10);
    }
    let (backend, resolver) = resolver_for(backend);

    let page = resolver
        .resolve_with(Strategy::Batched, "about")
        .await
        .expect("resolved");

    // Output order matches input order regardless of completion order.
    let ids: Vec<i64> = page.blocks.iter().map(|block| block.id).collect();
    assert_eq!(ids, (1..=12).collect::<Vec<_>>());

    // Never more than one batch in flight.
    assert_eq!(backend.max_in_flight(), 5);

    // ⌈12/5⌉ = 3 sequential groups: every fetch of one batch starts before
    // any fetch of the next.
    let started = backend.content_started();
    assert_eq!(started.len(), 12);
    let position = |key: &str| started.iter().position(|s| s == key).unwrap();
    for earlier in 1..=5 {
        for later in 6..=10 {
            assert!(position(&earlier.to_string()) < position(&later.to_string()));
        }
    }
    for earlier in 6..=10 {
        for later in 11..=12 {
            assert!(position(&earlier.to_string()) < position(&later.to_string()));
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_naive_strategy_fetches_everything_at_once() {
    let mut backend = backend_with_blocks(12, false);
    for n in 1..=12_i64 {
        backend
            .delays_ms
            .insert(n.to_string(), 200 - (n as u64) * 10);
    }
    let (backend, resolver) = resolver_for(backend);

    let page = resolver
        .resolve_with(Strategy::Naive, "about")
        .await
        .expect("resolved");

    let ids: Vec<i64> = page.blocks.iter().map(|block| block.id).collect();
    assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    assert_eq!(backend.max_in_flight(), 12);
}

#[tokio::test(start_paused = true)]
async fn test_partial_content_failure_yields_null_block() {
    let mut backend = backend_with_blocks(3, false);
    backend
        .fail_collections
        .insert("block_team".to_string());
    backend.page_blocks.get_mut(&1).unwrap().insert(
        1,
        json!({"id": 99, "page": 1, "collection": "block_team", "item": "99", "sort": 10}),
    );
    let (_, resolver) = resolver_for(backend);

    let page = resolver
        .resolve_with(Strategy::Batched, "about")
        .await
        .expect("resolved despite one failing block");

    assert_eq!(page.blocks.len(), 4);
    let team = page.blocks.iter().find(|block| block.id == 99).unwrap();
    assert!(team.content.is_none());
    assert!(
        page.blocks
            .iter()
            .filter(|block| block.id != 99)
            .all(|block| block.content.is_some())
    );
}

#[tokio::test(start_paused = true)]
async fn test_unknown_collection_skips_content_fetch() {
    let mut backend = backend_with_blocks(1, false);
    backend.page_blocks.get_mut(&1).unwrap().push(json!({
        "id": 50, "page": 1, "collection": "block_carousel", "item": "7", "sort": 2,
    }));
    let (backend, resolver) = resolver_for(backend);

    let page = resolver
        .resolve_with(Strategy::Batched, "about")
        .await
        .expect("resolved");

    let unknown = page.blocks.iter().find(|block| block.id == 50).unwrap();
    assert!(unknown.content.is_none());
    assert!(!backend.content_started().contains(&"7".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_reserved_slugs_bypass_resolution() {
    let mut backend = backend_with_blocks(1, true);
    backend.pages.insert(
        "services".to_string(),
        json!({"id": 2, "title": "Services", "slug": "services", "status": "published"}),
    );
    let (backend, resolver) = resolver_for(backend);

    assert!(matches!(
        resolver.resolve_page("services").await,
        Resolution::NotFound
    ));
    assert!(matches!(
        resolver.resolve_page("blog/whitening").await,
        Resolution::NotFound
    ));

    // The backend was never consulted for reserved routes.
    assert!(backend.listed().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_missing_page_is_not_found() {
    let (_, resolver) = resolver_for(backend_with_blocks(1, true));
    assert!(matches!(
        resolver.resolve_page("no-such-page").await,
        Resolution::NotFound
    ));
}

#[tokio::test(start_paused = true)]
async fn test_hide_flag_survives_resolution() {
    let mut backend = backend_with_blocks(1, false);
    backend.page_blocks.get_mut(&1).unwrap()[0]["hide_block"] = json!(true);
    let (_, resolver) = resolver_for(backend);

    let page = resolver
        .resolve_with(Strategy::Batched, "about")
        .await
        .expect("resolved");
    assert!(page.blocks[0].hidden);
}

fn form_fixture(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "slug": name.to_lowercase(),
        "submit_button_text": "Send",
        "fields": [],
    })
}

fn backend_with_form_blocks() -> FakeBackend {
    let mut backend = backend_with_blocks(1, false);
    for (block_id, item, form_id) in [(201, "21", 71), (202, "22", 72)] {
        backend.page_blocks.get_mut(&1).unwrap().push(json!({
            "id": block_id, "page": 1, "collection": "block_form",
            "item": item, "sort": block_id,
        }));
        backend.content.insert(
            ("block_form".to_string(), item.to_string()),
            json!({"id": item.parse::<i64>().unwrap(), "form": form_id}),
        );
    }
    backend.forms.insert(71, form_fixture(71, "Booking"));
    backend.forms.insert(72, form_fixture(72, "Feedback"));
    backend
}

#[tokio::test(start_paused = true)]
async fn test_auxiliary_maps_forms_by_block_id() {
    let (_, resolver) = resolver_for(backend_with_form_blocks());
    let store = resolver.store().clone();

    let page = resolver
        .resolve_with(Strategy::Batched, "about")
        .await
        .expect("resolved");
    let aux = collect_auxiliary(&store, &page.blocks).await;

    assert_eq!(aux.forms.len(), 2);
    assert_eq!(aux.forms.get(&201).map(|f| f.id), Some(71));
    assert_eq!(aux.forms.get(&202).map(|f| f.id), Some(72));
}

#[tokio::test(start_paused = true)]
async fn test_auxiliary_omits_failed_form_lookup() {
    let mut backend = backend_with_form_blocks();
    backend.fail_form_ids.insert(72);
    let (_, resolver) = resolver_for(backend);
    let store = resolver.store().clone();

    let page = resolver
        .resolve_with(Strategy::Batched, "about")
        .await
        .expect("resolved");
    let aux = collect_auxiliary(&store, &page.blocks).await;

    // The failed lookup's key is absent, not present-with-null.
    assert_eq!(aux.forms.len(), 1);
    assert!(aux.forms.contains_key(&201));
    assert!(!aux.forms.contains_key(&202));
}

#[tokio::test(start_paused = true)]
async fn test_auxiliary_extracts_first_locations_block() {
    let mut backend = backend_with_blocks(1, false);
    for (block_id, item, branch) in [(301, "31", "Thonglor"), (302, "32", "Ari")] {
        backend.page_blocks.get_mut(&1).unwrap().push(json!({
            "id": block_id, "page": 1, "collection": "block_locations",
            "item": item, "sort": block_id,
        }));
        backend.content.insert(
            ("block_locations".to_string(), item.to_string()),
            json!({"id": item.parse::<i64>().unwrap(), "branch_name": branch}),
        );
    }
    let (_, resolver) = resolver_for(backend);
    let store = resolver.store().clone();

    let page = resolver
        .resolve_with(Strategy::Batched, "about")
        .await
        .expect("resolved");
    let aux = collect_auxiliary(&store, &page.blocks).await;

    // First locations block wins; the second is ignored.
    assert_eq!(
        aux.locations.and_then(|l| l.branch_name).as_deref(),
        Some("Thonglor")
    );
}

#[tokio::test(start_paused = true)]
async fn test_form_submission_payload() {
    let (backend, resolver) = resolver_for(backend_with_blocks(0, false));
    let store = resolver.store().clone();

    let created = mutations::create_form_submission(
        &store,
        71,
        json!({"name": "Somchai", "email": "somchai@example.com"}),
    )
    .await
    .expect("created");
    assert_eq!(created.id, 321);

    let records = backend.created.lock().unwrap().clone();
    assert_eq!(records.len(), 1);
    let (collection, payload) = &records[0];
    assert_eq!(collection, "form_submissions");
    assert_eq!(payload["form"], 71);
    assert_eq!(payload["status"], "pending");
    assert_eq!(payload["data"]["name"], "Somchai");
}
