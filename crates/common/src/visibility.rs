//! Visibility probe: bounded ancestor-chain walk over computed styles to
//! decide whether a placement element is effectively hidden.

use crate::constants::STYLE_WALK_LIMIT;
use crate::dom::{Access, BrowsingContext, StyleScope};

/// Resolves which document's styles govern `element`: the current
/// document's body first, else the top document's body when accessible.
/// `None` means the element is not attached to any document we can read.
pub fn style_scope<C: BrowsingContext>(ctx: &C, element: &C::Element) -> Option<StyleScope> {
    if ctx.body_contains(element) {
        Some(StyleScope::Current)
    } else if ctx.top_body_contains(element).found() == Some(true) {
        Some(StyleScope::Top)
    } else {
        None
    }
}

/// Effective visibility of a placement element: it exists, it is attached
/// to a readable document, and no ancestor hides it.
pub fn is_visible<C: BrowsingContext>(ctx: &C, element: Option<&C::Element>) -> bool {
    let Some(element) = element else {
        return false;
    };
    match style_scope(ctx, element) {
        Some(scope) => !is_hidden(ctx, scope, element),
        None => false,
    }
}

/// Walks from `element` through its ancestors reading computed styles.
/// Returns true on the first `display: none` / `visibility: hidden`. A
/// blocked style read fails open to "not hidden", and the walk gives up
/// after [`STYLE_WALK_LIMIT`] steps so cyclic or degenerate parent chains
/// cannot stall the auction.
fn is_hidden<C: BrowsingContext>(ctx: &C, scope: StyleScope, element: &C::Element) -> bool {
    let mut current = Some(element.clone());
    for _ in 0..STYLE_WALK_LIMIT {
        let Some(element) = current else {
            return false;
        };
        match ctx.computed_style(scope, &element) {
            Access::Found(style) if style.hides() => return true,
            Access::Found(_) => current = ctx.parent_element(&element),
            Access::Denied | Access::Absent => return false,
        }
    }
    false
}
