//! Page resolution: slug to ordered, content-populated block list.
//!
//! Three fetch strategies are tried in descending order of efficiency. The
//! order is data, not control flow, so strategies can be added, removed, or
//! reordered without touching the coordinator. Each strategy has the same
//! contract: `Some(page)` on success, `None` to hand over to the next one.

use futures::future::join_all;
use smileworks_core::block::{BlockContent, BlockType};
use smileworks_core::page::{PageBlock, ResolvedBlock, ResolvedPage};

use crate::store::ContentStore;

/// Route prefixes owned by dedicated handlers; generic resolution never
/// serves them, even when a CMS page with that slug exists.
pub const RESERVED_PREFIXES: [&str; 2] = ["services", "blog"];

/// Content fetches per concurrent batch in the batched strategy. Bounds
/// outbound request pressure on the backend.
const BATCH_SIZE: usize = 5;

/// One fetch strategy for assembling a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Page and block stubs in one round trip, content fetched after.
    Nested,
    /// Separate queries with content fetched in bounded batches.
    Batched,
    /// Separate queries with all content fetched at once.
    Naive,
}

/// Strategies in the order they are attempted.
pub const STRATEGY_ORDER: [Strategy; 3] = [Strategy::Nested, Strategy::Batched, Strategy::Naive];

/// Outcome of resolving a slug.
#[derive(Debug, Clone)]
pub enum Resolution {
    Found(ResolvedPage),
    NotFound,
}

impl Resolution {
    /// The resolved page, if found.
    #[must_use]
    pub fn into_page(self) -> Option<ResolvedPage> {
        match self {
            Self::Found(page) => Some(page),
            Self::NotFound => None,
        }
    }
}

/// Turns a slug into a fully content-populated, ordered block list.
#[derive(Clone)]
pub struct Resolver {
    store: ContentStore,
}

impl Resolver {
    #[must_use]
    pub fn new(store: ContentStore) -> Self {
        Self { store }
    }

    /// The store backing this resolver.
    #[must_use]
    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Resolve a page by slug.
    ///
    /// Reserved route prefixes bypass resolution entirely. Backend
    /// unavailability surfaces as `NotFound`, never as an error.
    pub async fn resolve_page(&self, slug: &str) -> Resolution {
        if is_reserved(slug) {
            tracing::debug!(slug, "slug is owned by a dedicated route");
            return Resolution::NotFound;
        }

        for strategy in STRATEGY_ORDER {
            if let Some(page) = self.resolve_with(strategy, slug).await {
                tracing::debug!(slug, ?strategy, blocks = page.blocks.len(), "page resolved");
                return Resolution::Found(page);
            }
        }

        Resolution::NotFound
    }

    /// Run a single strategy. `None` means the next strategy in
    /// [`STRATEGY_ORDER`] should be tried.
    pub async fn resolve_with(&self, strategy: Strategy, slug: &str) -> Option<ResolvedPage> {
        match strategy {
            Strategy::Nested => self.resolve_nested(slug).await,
            Strategy::Batched => self.resolve_batched(slug).await,
            Strategy::Naive => self.resolve_naive(slug).await,
        }
    }

    /// One round trip for page + block stubs; the nested relation does not
    /// deliver content records, so those are fetched one by one afterwards.
    async fn resolve_nested(&self, slug: &str) -> Option<ResolvedPage> {
        let (page, stubs) = self.store.page_with_nested_blocks(slug).await?;

        let mut blocks = Vec::with_capacity(stubs.len());
        for stub in &stubs {
            let content = self.fetch_content(stub).await;
            blocks.push(ResolvedBlock::new(stub, content));
        }

        Some(ResolvedPage { page, blocks })
    }

    /// Separate page/blocks queries, then content in batches of
    /// [`BATCH_SIZE`]: batches run sequentially, fetches inside a batch run
    /// concurrently, and results keep the input order by index.
    async fn resolve_batched(&self, slug: &str) -> Option<ResolvedPage> {
        let page = self.store.page_by_slug(slug).await?;
        let page_blocks = self.store.page_blocks(page.id).await;

        let mut blocks = Vec::with_capacity(page_blocks.len());
        for batch in page_blocks.chunks(BATCH_SIZE) {
            let contents = join_all(batch.iter().map(|block| self.fetch_content(block))).await;
            blocks.extend(
                batch
                    .iter()
                    .zip(contents)
                    .map(|(block, content)| ResolvedBlock::new(block, content)),
            );
        }

        Some(ResolvedPage { page, blocks })
    }

    /// Separate queries with every content fetch issued at once.
    async fn resolve_naive(&self, slug: &str) -> Option<ResolvedPage> {
        let page = self.store.page_by_slug(slug).await?;
        let page_blocks = self.store.page_blocks(page.id).await;

        let contents = join_all(page_blocks.iter().map(|block| self.fetch_content(block))).await;
        let blocks = page_blocks
            .iter()
            .zip(contents)
            .map(|(block, content)| ResolvedBlock::new(block, content))
            .collect();

        Some(ResolvedPage { page, blocks })
    }

    /// Fetch one block's content; failures and unknown tags yield `None`
    /// so a single bad block never fails the page.
    async fn fetch_content(&self, block: &PageBlock) -> Option<BlockContent> {
        let Some(tag) = BlockType::from_tag(&block.collection) else {
            tracing::warn!(collection = %block.collection, block = block.id,
                "unknown block collection, content not fetched");
            return None;
        };
        self.store.block_content(tag, &block.item).await
    }
}

/// Whether the slug's first segment belongs to a dedicated route.
#[must_use]
pub fn is_reserved(slug: &str) -> bool {
    match slug.split('/').next() {
        Some(first) => RESERVED_PREFIXES.contains(&first),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_prefixes() {
        assert!(is_reserved("services"));
        assert!(is_reserved("services/veneers"));
        assert!(is_reserved("blog"));
        assert!(is_reserved("blog/whitening-101"));
        assert!(!is_reserved("home"));
        assert!(!is_reserved("about"));
        assert!(!is_reserved("serviceship"));
    }

    #[test]
    fn test_strategy_order_is_nested_first() {
        assert_eq!(
            STRATEGY_ORDER,
            [Strategy::Nested, Strategy::Batched, Strategy::Naive]
        );
    }
}
