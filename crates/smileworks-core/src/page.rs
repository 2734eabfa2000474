//! Page and block join types.
//!
//! Pages are CMS-managed documents identified by slug; each owns an ordered
//! collection of block join rows pointing at concrete content records.

use serde::{Deserialize, Deserializer, Serialize};

use crate::block::BlockContent;

/// Accept an item key as either a string or a bare number.
fn de_item_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "invalid item key: {other}"
        ))),
    }
}

/// Publication status of a CMS-managed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Published,
    #[default]
    Draft,
}

/// A CMS page identified by slug.
///
/// The sentinel slug `"home"` backs the root route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub status: PublishStatus,
}

/// Join row linking a page to one concrete content record.
///
/// `collection` stays a raw string so rows with tags this build does not
/// know about survive resolution and can be skipped with a diagnostic at
/// render time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageBlock {
    pub id: i64,
    pub page: i64,
    pub collection: String,
    #[serde(deserialize_with = "de_item_key")]
    pub item: String,
    #[serde(default)]
    pub sort: Option<i64>,
    #[serde(default)]
    pub hide_block: bool,
}

impl PageBlock {
    /// Sort key with absent values treated as zero.
    #[must_use]
    pub fn sort_key(&self) -> i64 {
        self.sort.unwrap_or(0)
    }
}

/// A page block with its content record resolved.
///
/// `content` is `None` when the content fetch failed or decoded to nothing;
/// such blocks are excluded from rendering without failing the page.
#[derive(Debug, Clone)]
pub struct ResolvedBlock {
    pub id: i64,
    pub collection: String,
    pub sort: Option<i64>,
    pub hidden: bool,
    pub content: Option<BlockContent>,
}

impl ResolvedBlock {
    /// Build a resolved block from its join row and fetched content.
    #[must_use]
    pub fn new(block: &PageBlock, content: Option<BlockContent>) -> Self {
        Self {
            id: block.id,
            collection: block.collection.clone(),
            sort: block.sort,
            hidden: block.hide_block,
            content,
        }
    }

    /// Sort key with absent values treated as zero.
    #[must_use]
    pub fn sort_key(&self) -> i64 {
        self.sort.unwrap_or(0)
    }
}

/// The transient aggregate produced by the resolver for one request.
#[derive(Debug, Clone)]
pub struct ResolvedPage {
    pub page: Page,
    pub blocks: Vec<ResolvedBlock>,
}

/// Request-scoped side data consumed by the renderer alongside the block
/// list. Only two block types need data beyond their own content record.
#[derive(Debug, Clone, Default)]
pub struct Auxiliary {
    /// Shared locations payload; the first locations block on the page wins.
    pub locations: Option<crate::content::LocationsContent>,

    /// Form definitions keyed by the *block* id (not the form id). Blocks
    /// whose lookup failed or whose content lacks a form reference are
    /// absent, never present-with-null.
    pub forms: std::collections::HashMap<i64, crate::form::Form>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_deserializes_status() {
        let page: Page = serde_json::from_str(
            r#"{"id": 1, "title": "Home", "slug": "home", "status": "published"}"#,
        )
        .expect("decode page");
        assert_eq!(page.status, PublishStatus::Published);
    }

    #[test]
    fn test_page_block_sort_key_defaults_to_zero() {
        let block: PageBlock = serde_json::from_str(
            r#"{"id": 7, "page": 1, "collection": "block_hero", "item": "3"}"#,
        )
        .expect("decode block");
        assert_eq!(block.sort, None);
        assert_eq!(block.sort_key(), 0);
        assert!(!block.hide_block);
    }

    #[test]
    fn test_resolved_block_carries_join_fields() {
        let block: PageBlock = serde_json::from_str(
            r#"{"id": 7, "page": 1, "collection": "block_text", "item": "3", "sort": 2}"#,
        )
        .expect("decode block");
        let resolved = ResolvedBlock::new(&block, None);
        assert_eq!(resolved.id, 7);
        assert_eq!(resolved.collection, "block_text");
        assert_eq!(resolved.sort_key(), 2);
        assert!(resolved.content.is_none());
    }
}
