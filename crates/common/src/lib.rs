//! h12media bidder adapter.
//!
//! This crate adapts the h12media demand endpoint to a host auction
//! framework's bidder interface. It builds one outbound HTTP descriptor per
//! validated bid request (enriched with placement geometry, visibility and
//! consent signals), interprets vendor replies into the host's normalized
//! bid-response shape, and relays user-sync pixels/iframes.
//!
//! The adapter never performs network I/O and never touches browser globals
//! directly: transport belongs to the host, and the DOM is reached through
//! the injected [`dom::BrowsingContext`] capability so the probes stay
//! deterministic under test.
//!
//! # Modules
//!
//! - [`bidder`]: Host-facing request types and the adapter entry points
//! - [`constants`]: Bidder code, response defaults and walk caps
//! - [`dom`]: Browsing-context capability and DOM value types
//! - [`error`]: Error types
//! - [`geometry`]: Viewport/document sizing and placement coordinates
//! - [`logging`]: Logging initialization
//! - [`request`]: Outbound payload assembly
//! - [`response`]: Vendor reply interpretation
//! - [`settings`]: Configuration management and validation
//! - [`usersync`]: User-sync filtering and consent macro substitution
//! - [`visibility`]: Hidden-element detection across ancestor chains
//! - [`visitor`]: Visitor metadata forwarded with every payload

pub mod bidder;
pub mod constants;
pub mod dom;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod request;
pub mod response;
pub mod settings;
pub mod usersync;
pub mod visibility;
pub mod visitor;
