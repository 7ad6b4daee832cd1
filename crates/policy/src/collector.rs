//! Inline content discovery across a page's render hooks.

use crate::hash::HashToken;
use dom::{flatten_one, Component};

/// Gather a page's components in hashing order: head, post-body, pre-body.
///
/// Each list is flattened one level, so components that render several
/// elements contribute them individually.
pub fn collect_elements<'a>(
    head: &'a [Component],
    post_body: &'a [Component],
    pre_body: &'a [Component],
) -> Vec<&'a Component> {
    flatten_one(head)
        .chain(flatten_one(post_body))
        .chain(flatten_one(pre_body))
        .collect()
}

/// Hash tokens for every `tag` element carrying non-empty inline content.
///
/// Tags match exactly. Elements without inline content (for instance
/// `<script src=...>`) are skipped, as are entries that are still lists.
pub fn hash_tokens<'a, I>(components: I, tag: &str) -> Vec<HashToken>
where
    I: IntoIterator<Item = &'a Component>,
{
    components
        .into_iter()
        .filter_map(Component::as_element)
        .filter(|elem| elem.tag == tag)
        .filter_map(|elem| elem.inline_content())
        .map(|content| {
            let token = HashToken::sha256(content);
            tracing::trace!("hashed inline <{}> ({} bytes): {}", tag, content.len(), token);
            token
        })
        .collect()
}

/// Space-joined hash tokens for `tag`; empty when nothing matches.
pub fn get_hashes<'a, I>(components: I, tag: &str) -> String
where
    I: IntoIterator<Item = &'a Component>,
{
    hash_tokens(components, tag)
        .iter()
        .map(HashToken::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}
