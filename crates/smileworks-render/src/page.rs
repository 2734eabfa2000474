//! Page assembly: filter, order, and dispatch a resolved block list.

use smileworks_core::block::BlockType;
use smileworks_core::page::{Auxiliary, ResolvedBlock};

use crate::registry::{HandlerRegistry, RenderContext};

/// Title of a leftover draft text record in the CMS that must never render,
/// regardless of where its sort key places it.
pub const LEGACY_WELCOME_TITLE: &str = "ยินดีต้อนรับสู่ Tooth Box Dental";

/// Renders resolved pages through the handler registry.
pub struct PageRenderer {
    registry: HandlerRegistry,
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer {
    /// Renderer with the built-in handler set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: HandlerRegistry::new(),
        }
    }

    /// Renderer over a custom registry.
    #[must_use]
    pub fn with_registry(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    /// Render each visible block to markup, in `sort` order.
    ///
    /// Blocks with no content, hidden blocks, and the legacy placeholder
    /// text block are dropped. Ties on `sort` keep their original relative
    /// order. Unknown tags and unregistered handlers are skipped with a
    /// diagnostic; a failing handler skips only its own block.
    pub fn render_blocks(&self, blocks: &[ResolvedBlock], aux: &Auxiliary) -> Vec<String> {
        let mut visible: Vec<&ResolvedBlock> = blocks
            .iter()
            .filter(|block| !block.hidden)
            .filter(|block| block.content.is_some())
            .filter(|block| !is_legacy_placeholder(block))
            .collect();
        visible.sort_by_key(|block| block.sort_key());

        visible
            .into_iter()
            .filter_map(|block| self.render_block(block, aux))
            .collect()
    }

    /// Render a full page body.
    #[must_use]
    pub fn render_page(&self, blocks: &[ResolvedBlock], aux: &Auxiliary) -> String {
        self.render_blocks(blocks, aux).join("\n")
    }

    fn render_block(&self, block: &ResolvedBlock, aux: &Auxiliary) -> Option<String> {
        let Some(tag) = BlockType::from_tag(&block.collection) else {
            tracing::warn!(collection = %block.collection, block = block.id,
                "unknown block collection, skipping");
            return None;
        };

        let Some(handler) = self.registry.get(tag) else {
            tracing::warn!(%tag, block = block.id, "no handler registered, skipping");
            return None;
        };

        let content = block.content.as_ref()?;
        let ctx = RenderContext {
            block_id: block.id,
            aux,
        };

        match handler.render(content, &ctx) {
            Ok(html) if html.is_empty() => None,
            Ok(html) => Some(html),
            Err(e) => {
                tracing::warn!(%tag, block = block.id, error = %e, "handler failed, skipping");
                None
            }
        }
    }
}

/// The hardcoded placeholder exclusion (applied after resolution).
fn is_legacy_placeholder(block: &ResolvedBlock) -> bool {
    block
        .content
        .as_ref()
        .and_then(|content| content.as_text())
        .and_then(|text| text.title.as_deref())
        == Some(LEGACY_WELCOME_TITLE)
}
