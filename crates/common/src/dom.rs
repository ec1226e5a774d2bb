//! Browsing-context capability injected into the geometry and visibility
//! probes.
//!
//! The adapter never reads `window`/`document` globals itself. A host
//! embedding implements [`BrowsingContext`] over the live frame it runs in;
//! tests use the in-memory fixture in [`crate::test_support`]. Reads that a
//! real browser guards with try/catch (cross-origin frames, detached nodes)
//! are expressed as [`Access`] values so callers must handle each case.

/// Outcome of a DOM read that the browser may block or that may have no
/// target node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access<T> {
    /// The value was readable.
    Found(T),
    /// The read was blocked, typically by cross-origin policy.
    Denied,
    /// The node does not exist (e.g. a top window has no frame element).
    Absent,
}

impl<T> Access<T> {
    /// The contained value, when the read succeeded.
    pub fn found(self) -> Option<T> {
        match self {
            Access::Found(value) => Some(value),
            Access::Denied | Access::Absent => None,
        }
    }
}

impl<T> Default for Access<T> {
    fn default() -> Self {
        Access::Absent
    }
}

/// Bounding rectangle of an element, in CSS pixels relative to its
/// window's viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Computed `display`/`visibility` values of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedStyle {
    pub display: String,
    pub visibility: String,
}

impl ComputedStyle {
    /// A style that leaves the element visible.
    pub fn visible() -> Self {
        Self {
            display: "block".to_string(),
            visibility: "visible".to_string(),
        }
    }

    /// Whether this style hides the element and everything below it.
    pub fn hides(&self) -> bool {
        self.display == "none" || self.visibility == "hidden"
    }
}

/// Raw viewport measurements of the top window. Zero values are treated as
/// unusable and fall through to the next source, matching browser
/// falsy-chaining over `innerWidth`, the root element and the body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportMetrics {
    pub inner_width: f64,
    pub inner_height: f64,
    pub root_client_width: f64,
    pub root_client_height: f64,
    pub body_client_width: f64,
    pub body_client_height: f64,
}

/// Raw size measurements of the top document's body and root element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DocumentMetrics {
    pub body_offset_width: f64,
    pub body_scroll_height: f64,
    pub body_offset_height: f64,
    pub body_client_height: f64,
    pub root_scroll_height: f64,
    pub root_offset_height: f64,
    pub root_client_height: f64,
}

/// Which document's styles govern an element during the visibility walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleScope {
    /// The element lives under the current document's body.
    Current,
    /// The element lives under the top document's body.
    Top,
}

/// Read access to the frame the adapter executes in.
///
/// `Element` is an opaque handle; the adapter only ever passes handles back
/// into the same context that produced them.
pub trait BrowsingContext {
    /// Handle to an element in this context.
    type Element: Clone;

    /// True when the current window is the top-level browsing context.
    fn is_top(&self) -> bool;

    /// True when the current window can reach its own frame element (i.e.
    /// the parent document is same-origin).
    fn has_frame_element(&self) -> bool;

    /// Viewport measurements of the top window.
    fn top_viewport(&self) -> Access<ViewportMetrics>;

    /// Size measurements of the top document.
    fn top_document(&self) -> Access<DocumentMetrics>;

    /// Scroll offsets `(x, y)` of the top window.
    fn top_scroll(&self) -> Access<(f64, f64)>;

    /// Referrer of the top document.
    fn top_referrer(&self) -> Access<String>;

    /// Referrer of the current document.
    fn referrer(&self) -> String;

    /// Looks up an element by id in the current document.
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Parent element, or `None` at the document root.
    fn parent_element(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Bounding rectangle of `element` relative to its viewport.
    fn bounding_rect(&self, element: &Self::Element) -> ElementRect;

    /// Computed style of `element`, read through the window `scope`
    /// resolves to. `Denied` corresponds to a throwing style read.
    fn computed_style(&self, scope: StyleScope, element: &Self::Element) -> Access<ComputedStyle>;

    /// Whether the current document's body contains `element`.
    fn body_contains(&self, element: &Self::Element) -> bool;

    /// Whether the top document's body contains `element`.
    fn top_body_contains(&self, element: &Self::Element) -> Access<bool>;

    /// Frame-element rects of this window and each ancestor window,
    /// innermost first. `Denied` entries mark cross-origin levels; the
    /// iterator ends once the top window is reached.
    fn frame_chain(&self) -> Box<dyn Iterator<Item = Access<ElementRect>> + '_>;
}
