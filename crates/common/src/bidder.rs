//! Host-facing bidder interface: the request/context types the auction
//! framework hands in, and the [`H12MediaAdapter`] entry points it calls.
//!
//! Call pattern per auction: [`H12MediaAdapter::is_bid_request_valid`] per
//! unit, [`H12MediaAdapter::build_requests`] once with the validated units,
//! then (after the host performs transport)
//! [`H12MediaAdapter::interpret_response`] per reply and
//! [`H12MediaAdapter::user_syncs`] once all replies are known.

use error_stack::{Report, ResultExt};
use url::Url;

use crate::constants::{BIDDER_ALIASES, BIDDER_CODE};
use crate::dom::BrowsingContext;
use crate::error::AdapterError;
use crate::request::{self, OutboundRequest};
use crate::response::{self, NormalizedBid, ServerResponse};
use crate::settings::Settings;
use crate::usersync::{self, SyncDescriptor, SyncOptions};

/// A host-validated bid request for a single ad unit.
#[derive(Debug, Clone, Default)]
pub struct BidRequest {
    pub bid_id: String,
    pub transaction_id: String,
    pub ad_unit_code: String,
    pub params: BidderParams,
    /// Requested banner sizes as `(width, height)` pairs.
    pub banner_sizes: Vec<(u32, u32)>,
    /// Names of the host user-id modules attached to this request.
    pub ext_user_ids: Vec<String>,
}

/// Publisher-configured parameters for this bidder.
#[derive(Debug, Clone, Default)]
pub struct BidderParams {
    pub pubid: String,
    pub placementid: Option<String>,
    pub size: Option<String>,
    /// Per-unit endpoint override.
    pub endpointdom: Option<String>,
    /// Publisher sub-account identifier, at most 32 characters.
    pub pubsubid: Option<String>,
    /// DOM container id housing the ad slot, when it differs from the
    /// ad-unit code.
    pub pubcontainerid: Option<String>,
}

/// Auction-wide context the host passes alongside the bid requests.
#[derive(Debug, Clone, Default)]
pub struct BidderRequest {
    pub gdpr_consent: Option<GdprConsent>,
    /// Opaque US-privacy string, when the regulation applies.
    pub usp_consent: Option<String>,
    pub referer_info: Option<RefererInfo>,
    /// Host framework version forwarded to the vendor.
    pub host_version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GdprConsent {
    pub gdpr_applies: bool,
    pub consent_string: String,
}

#[derive(Debug, Clone, Default)]
pub struct RefererInfo {
    pub referer: String,
}

/// The h12media bidder adapter. Holds the validated endpoint and the
/// response defaults; all per-auction state lives in the call arguments.
pub struct H12MediaAdapter {
    settings: Settings,
    default_endpoint: Url,
}

impl H12MediaAdapter {
    /// Creates an adapter from settings, validating the configured
    /// endpoint once up front.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Endpoint`] when the configured endpoint is
    /// not a valid URL.
    pub fn new(settings: Settings) -> Result<Self, Report<AdapterError>> {
        let default_endpoint =
            Url::parse(&settings.bidder.endpoint_url).change_context(AdapterError::Endpoint {
                message: settings.bidder.endpoint_url.clone(),
            })?;

        Ok(Self {
            settings,
            default_endpoint,
        })
    }

    /// The bidder code this adapter registers under.
    pub fn code(&self) -> &'static str {
        BIDDER_CODE
    }

    /// Short aliases the host may register for this bidder.
    pub fn aliases(&self) -> &'static [&'static str] {
        BIDDER_ALIASES
    }

    /// A bid request is usable when a publisher id is configured.
    pub fn is_bid_request_valid(&self, bid: &BidRequest) -> bool {
        !bid.params.pubid.is_empty()
    }

    /// Builds one outbound HTTP descriptor per validated bid request,
    /// order preserving. The host owns transport and timing.
    pub fn build_requests<C: BrowsingContext>(
        &self,
        ctx: &C,
        bids: &[BidRequest],
        bidder_request: &BidderRequest,
    ) -> Vec<OutboundRequest> {
        request::build_requests(ctx, &self.default_endpoint, bids, bidder_request)
    }

    /// Maps a vendor reply into normalized bid records. `request` is the
    /// outbound descriptor the reply answers, when the host can still
    /// associate it; it supplies the pass-through fields.
    pub fn interpret_response(
        &self,
        response: &ServerResponse,
        request: Option<&OutboundRequest>,
    ) -> Vec<NormalizedBid> {
        response::interpret(&self.settings.bidder, response, request)
    }

    /// Filters and resolves the vendor-declared user syncs against the
    /// host's sync capabilities.
    pub fn user_syncs(
        &self,
        options: &SyncOptions,
        responses: &[ServerResponse],
        gdpr_consent: Option<&GdprConsent>,
        usp_consent: Option<&str>,
    ) -> Vec<SyncDescriptor> {
        usersync::user_syncs(options, responses, gdpr_consent, usp_consent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tests::create_test_settings;

    fn adapter() -> H12MediaAdapter {
        H12MediaAdapter::new(create_test_settings()).unwrap()
    }

    #[test]
    fn adapter_reports_bidder_code() {
        assert_eq!(adapter().code(), "h12media");
    }

    #[test]
    fn bid_request_with_pubid_is_valid() {
        let bid = BidRequest {
            params: BidderParams {
                pubid: "pub-1".to_string(),
                ..BidderParams::default()
            },
            ..BidRequest::default()
        };
        assert!(adapter().is_bid_request_valid(&bid));
    }

    #[test]
    fn bid_request_without_pubid_is_invalid() {
        let bid = BidRequest::default();
        assert!(!adapter().is_bid_request_valid(&bid));
    }

    #[test]
    fn invalid_endpoint_url_is_rejected() {
        let mut settings = create_test_settings();
        settings.bidder.endpoint_url = "not a url".to_string();
        assert!(H12MediaAdapter::new(settings).is_err());
    }
}
