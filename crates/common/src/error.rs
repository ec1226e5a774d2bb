use derive_more::{Display, Error};

/// Errors surfaced by the adapter.
///
/// Probe and interpretation paths deliberately do not error: lookup
/// failures fail open to safe defaults and malformed vendor replies yield
/// empty results. What remains fallible is configuration.
#[derive(Debug, Display, Error)]
pub enum AdapterError {
    /// Configuration could not be loaded or deserialized.
    #[display("Settings error: {message}")]
    Settings { message: String },

    /// A vendor endpoint URL could not be parsed.
    #[display("Invalid endpoint URL: {message}")]
    Endpoint { message: String },
}
