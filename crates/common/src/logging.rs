use log::LevelFilter;

/// Initialize logging for the adapter.
/// Should be called once by the host embedding, before the first auction.
pub fn init_logging() {
    env_logger::builder().filter_level(LevelFilter::Info).init();
}

/// Log level helper to determine if debug logging is enabled
pub fn is_debug_enabled() -> bool {
    log::log_enabled!(log::Level::Debug)
}
