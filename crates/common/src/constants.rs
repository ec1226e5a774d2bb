/// Bidder code registered with the host auction framework.
pub const BIDDER_CODE: &str = "h12media";

/// Short aliases the host may use for this bidder.
pub const BIDDER_ALIASES: &[&str] = &["h12"];

/// Media type reported on every normalized bid.
pub const MEDIA_TYPE_BANNER: &str = "banner";

/// Upper bound on the `pubsubid` bidder param. Longer values trigger a
/// non-fatal diagnostic and are forwarded unchanged.
pub const PUBSUBID_MAX_CHARS: usize = 32;

/// Maximum steps when accumulating frame-element offsets up the
/// frame-parent chain. Guards termination on pathological nesting.
pub const FRAME_WALK_LIMIT: usize = 100;

/// Maximum ancestor steps when probing computed styles for hidden state.
pub const STYLE_WALK_LIMIT: usize = 250;
