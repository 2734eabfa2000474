//! Request-scoped auxiliary data collection, performed by the caller
//! between resolution and rendering.

use futures::future::join_all;
use smileworks_core::page::{Auxiliary, ResolvedBlock};

use crate::store::ContentStore;

/// Gather auxiliary data for a resolved block list.
///
/// The first `block_locations` content found becomes the shared locations
/// payload; form-definition lookups for every `block_form` run concurrently
/// and land in a map keyed by block id.
pub async fn collect_auxiliary(store: &ContentStore, blocks: &[ResolvedBlock]) -> Auxiliary {
    let locations = blocks
        .iter()
        .filter_map(|block| block.content.as_ref())
        .find_map(|content| content.as_locations())
        .cloned();

    let form_refs: Vec<(i64, i64)> = blocks
        .iter()
        .filter_map(|block| {
            let form_id = block.content.as_ref()?.as_form()?.form?;
            Some((block.id, form_id))
        })
        .collect();

    let lookups = join_all(form_refs.iter().map(|(block_id, form_id)| async move {
        store.form_by_id(*form_id).await.map(|form| (*block_id, form))
    }))
    .await;

    let forms = lookups.into_iter().flatten().collect();

    Auxiliary { locations, forms }
}
