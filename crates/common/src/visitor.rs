//! Visitor metadata forwarded to the vendor with every outbound payload.

use chrono::{DateTime, Datelike, Local};
use serde::Serialize;

use crate::dom::BrowsingContext;
use crate::geometry;

/// Page and clock context at the time the bid payload is built. Field
/// names follow the vendor wire contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitorInfo {
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`.
    #[serde(rename = "localTime")]
    pub local_time: String,
    /// Day of week with Sunday as 0.
    #[serde(rename = "dayOfWeek")]
    pub day_of_week: u32,
    #[serde(rename = "screenWidth")]
    pub screen_width: i32,
    #[serde(rename = "screenHeight")]
    pub screen_height: i32,
    #[serde(rename = "docWidth")]
    pub doc_width: i32,
    #[serde(rename = "docHeight")]
    pub doc_height: i32,
    pub scrollbarx: f64,
    pub scrollbary: f64,
}

/// Collects visitor metadata from the browsing context. Scroll offsets of
/// an inaccessible top window default to zero.
pub fn visitor_info<C: BrowsingContext>(ctx: &C, now: DateTime<Local>) -> VisitorInfo {
    let (screen_width, screen_height) = geometry::client_dimensions(ctx);
    let (doc_width, doc_height) = geometry::document_dimensions(ctx);
    let (scrollbarx, scrollbary) = ctx.top_scroll().found().unwrap_or((0.0, 0.0));

    VisitorInfo {
        local_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
        day_of_week: now.weekday().num_days_from_sunday(),
        screen_width,
        screen_height,
        doc_width,
        doc_height,
        scrollbarx,
        scrollbary,
    }
}
