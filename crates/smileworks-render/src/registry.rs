//! Block type to handler dispatch.
//!
//! A fixed registry resolved at startup. The tag set is closed, so this is
//! deliberately not a plugin system: adding a block type means adding a tag
//! in core and a handler here.

use std::collections::HashMap;

use smileworks_core::block::{BlockContent, BlockType};
use smileworks_core::page::Auxiliary;

use crate::error::Result;

/// Per-block data passed to handlers alongside the content record.
///
/// Exactly two tags consume the auxiliary payloads: `block_form` reads the
/// form definition keyed by its block id, and `block_contact` reads the
/// shared locations payload.
pub struct RenderContext<'a> {
    pub block_id: i64,
    pub aux: &'a Auxiliary,
}

/// A presentation handler for one block collection tag.
///
/// Handlers render nothing (empty output) for absent or mismatched content;
/// that contract lives in every handler rather than the dispatcher.
pub trait BlockHandler: Send + Sync {
    fn render(&self, content: &BlockContent, ctx: &RenderContext<'_>) -> Result<String>;
}

/// Registry of block handlers, populated at startup.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<BlockType, Box<dyn BlockHandler>>,
}

impl HandlerRegistry {
    /// Registry with every built-in handler registered.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        crate::blocks::register_defaults(&mut registry);
        registry
    }

    /// Registry with no handlers (unhandled tags are skipped with a
    /// warning at render time).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a handler for a tag, replacing any existing one.
    pub fn register(&mut self, tag: BlockType, handler: Box<dyn BlockHandler>) {
        self.handlers.insert(tag, handler);
    }

    /// Look up the handler for a tag.
    #[must_use]
    pub fn get(&self, tag: BlockType) -> Option<&dyn BlockHandler> {
        self.handlers.get(&tag).map(|handler| handler.as_ref())
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
