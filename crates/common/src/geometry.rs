//! Geometry probe: top-window viewport and document sizing plus placement
//! coordinates, including the cross-frame accumulation path used when the
//! adapter executes inside an iframe.

use serde::Serialize;

use crate::constants::FRAME_WALK_LIMIT;
use crate::dom::{Access, BrowsingContext};

/// On-screen coordinates of a placement, attached to the outbound payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coords {
    pub x: f64,
    pub y: f64,
}

/// Whether the adapter is executing inside a nested frame: the current
/// window is not the top window and no same-origin frame element is
/// reachable.
pub fn in_iframe<C: BrowsingContext>(ctx: &C) -> bool {
    !(ctx.is_top() || ctx.has_frame_element())
}

/// Viewport size of the top window, rounded to whole pixels. Falls through
/// zero inner sizes to the root element, then the body. `(0, 0)` when the
/// top window is not accessible.
pub fn client_dimensions<C: BrowsingContext>(ctx: &C) -> (i32, i32) {
    match ctx.top_viewport() {
        Access::Found(viewport) => {
            let width = first_nonzero([
                viewport.inner_width,
                viewport.root_client_width,
                viewport.body_client_width,
            ]);
            let height = first_nonzero([
                viewport.inner_height,
                viewport.root_client_height,
                viewport.body_client_height,
            ]);
            (width.round() as i32, height.round() as i32)
        }
        Access::Denied | Access::Absent => (0, 0),
    }
}

/// Full content size of the top document: the body's offset width and the
/// maximum of the scroll/offset/client heights across body and root
/// element. `(-1, -1)` when the top document is not accessible.
pub fn document_dimensions<C: BrowsingContext>(ctx: &C) -> (i32, i32) {
    match ctx.top_document() {
        Access::Found(doc) => {
            let height = [
                doc.body_scroll_height,
                doc.root_scroll_height,
                doc.body_offset_height,
                doc.root_offset_height,
                doc.body_client_height,
                doc.root_client_height,
            ]
            .into_iter()
            .fold(0.0_f64, f64::max);
            (doc.body_offset_width.round() as i32, height.round() as i32)
        }
        Access::Denied | Access::Absent => (-1, -1),
    }
}

/// Accumulated offset of the current window within the top page, summing
/// frame-element rects up the frame-parent chain. Levels the browser
/// refuses to expose are skipped and the walk continues; it stops after
/// [`FRAME_WALK_LIMIT`] steps regardless of nesting depth.
pub fn frame_position<C: BrowsingContext>(ctx: &C) -> (f64, f64) {
    let mut left = 0.0;
    let mut top = 0.0;
    for step in ctx.frame_chain().take(FRAME_WALK_LIMIT) {
        if let Access::Found(rect) = step {
            left += rect.x;
            top += rect.y;
        }
    }
    (left, top)
}

/// Placement coordinates for the outbound payload: the cross-frame
/// accumulated position inside an iframe, the element's own bounding rect
/// otherwise. A missing element yields no coordinates rather than an
/// error.
pub fn placement_coords<C: BrowsingContext>(
    ctx: &C,
    element: Option<&C::Element>,
) -> Option<Coords> {
    let element = element?;
    if in_iframe(ctx) {
        let (x, y) = frame_position(ctx);
        Some(Coords { x, y })
    } else {
        let rect = ctx.bounding_rect(element);
        Some(Coords {
            x: rect.x,
            y: rect.y,
        })
    }
}

fn first_nonzero(values: [f64; 3]) -> f64 {
    values.into_iter().find(|value| *value != 0.0).unwrap_or(0.0)
}
