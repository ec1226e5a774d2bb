//! Outbound payload assembly: one HTTP descriptor per validated bid
//! request, enriched with placement geometry, visibility, consent flags
//! and visitor metadata.

use chrono::Local;
use http::Method;
use serde::Serialize;
use url::Url;

use crate::bidder::{BidRequest, BidderRequest};
use crate::constants::PUBSUBID_MAX_CHARS;
use crate::dom::{Access, BrowsingContext};
use crate::geometry::{self, Coords};
use crate::visibility;
use crate::visitor::{self, VisitorInfo};

/// HTTP call descriptor handed back to the host transport.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    /// The vendor endpoint expects cookies, so the transport must send
    /// credentials.
    pub with_credentials: bool,
    pub payload: BidPayload,
}

/// Body of the outbound POST. Field names follow the vendor wire
/// contract.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BidPayload {
    pub gdpr: bool,
    pub gdpr_cs: String,
    pub usp: bool,
    pub usp_cs: String,
    #[serde(rename = "topLevelUrl")]
    pub top_level_url: String,
    #[serde(rename = "refererUrl")]
    pub referer_url: String,
    pub isiframe: bool,
    pub version: String,
    #[serde(rename = "ExtUserIDs")]
    pub ext_user_ids: Vec<String>,
    #[serde(rename = "visitorInfo")]
    pub visitor_info: VisitorInfo,
    pub bidrequest: UnitRequest,
}

/// Per-unit block of the outbound payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitRequest {
    #[serde(rename = "bidId")]
    pub bid_id: String,
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    #[serde(rename = "adunitId")]
    pub adunit_id: String,
    pub pubid: String,
    pub placementid: String,
    pub size: String,
    #[serde(rename = "adunitSize")]
    pub adunit_size: Vec<(u32, u32)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coords: Option<Coords>,
    pub ishidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pubsubid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pubcontainerid: Option<String>,
}

pub(crate) fn build_requests<C: BrowsingContext>(
    ctx: &C,
    default_endpoint: &Url,
    bids: &[BidRequest],
    bidder_request: &BidderRequest,
) -> Vec<OutboundRequest> {
    let isiframe = geometry::in_iframe(ctx);
    let visitor_info = visitor::visitor_info(ctx, Local::now());
    let referer_url = referer_url(ctx);

    let (gdpr, gdpr_cs) = match &bidder_request.gdpr_consent {
        Some(consent) => (consent.gdpr_applies, consent.consent_string.clone()),
        None => (false, String::new()),
    };
    let usp_cs = bidder_request.usp_consent.clone().unwrap_or_default();
    let usp = !usp_cs.is_empty();
    let top_level_url = bidder_request
        .referer_info
        .as_ref()
        .map(|info| info.referer.clone())
        .unwrap_or_default();

    bids.iter()
        .map(|bid| {
            let params = &bid.params;
            let url = endpoint_url(params.endpointdom.as_deref(), default_endpoint);

            if let Some(pubsubid) = &params.pubsubid {
                if pubsubid.chars().count() > PUBSUBID_MAX_CHARS {
                    log::warn!(
                        "Bidder param 'pubsubid' should be less than {PUBSUBID_MAX_CHARS} chars."
                    );
                }
            }

            let container_id = params
                .pubcontainerid
                .as_deref()
                .unwrap_or(&bid.ad_unit_code);
            let element = ctx.element_by_id(container_id);
            let ishidden = !visibility::is_visible(ctx, element.as_ref());
            let coords = geometry::placement_coords(ctx, element.as_ref());

            OutboundRequest {
                method: Method::POST,
                url,
                with_credentials: true,
                payload: BidPayload {
                    gdpr,
                    gdpr_cs: gdpr_cs.clone(),
                    usp,
                    usp_cs: usp_cs.clone(),
                    top_level_url: top_level_url.clone(),
                    referer_url: referer_url.clone(),
                    isiframe,
                    version: bidder_request.host_version.clone(),
                    ext_user_ids: bid.ext_user_ids.clone(),
                    visitor_info: visitor_info.clone(),
                    bidrequest: UnitRequest {
                        bid_id: bid.bid_id.clone(),
                        transaction_id: bid.transaction_id.clone(),
                        adunit_id: bid.ad_unit_code.clone(),
                        pubid: params.pubid.clone(),
                        placementid: params.placementid.clone().unwrap_or_default(),
                        size: params.size.clone().unwrap_or_default(),
                        adunit_size: bid.banner_sizes.clone(),
                        coords,
                        ishidden,
                        pubsubid: params.pubsubid.clone(),
                        pubcontainerid: params.pubcontainerid.clone(),
                    },
                },
            }
        })
        .collect()
}

/// Referrer forwarded to the vendor: the top document's when readable and
/// non-empty, the current document's otherwise.
fn referer_url<C: BrowsingContext>(ctx: &C) -> String {
    match ctx.top_referrer() {
        Access::Found(referrer) if !referrer.is_empty() => referrer,
        _ => ctx.referrer(),
    }
}

/// Per-unit endpoint override, falling back to the configured default
/// when missing or unparseable.
fn endpoint_url(endpointdom: Option<&str>, default_endpoint: &Url) -> Url {
    match endpointdom {
        Some(raw) if !raw.is_empty() => match Url::parse(raw) {
            Ok(url) => url,
            Err(err) => {
                log::warn!("Ignoring invalid 'endpointdom' {raw}: {err}");
                default_endpoint.clone()
            }
        },
        _ => default_endpoint.clone(),
    }
}
