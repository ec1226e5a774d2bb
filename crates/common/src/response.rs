//! Vendor reply interpretation: maps the single bid object of a server
//! reply into the host's normalized bid-response shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::MEDIA_TYPE_BANNER;
use crate::request::OutboundRequest;
use crate::settings::BidderSettings;

/// Raw reply the host transport hands back. The body is kept as parsed
/// JSON; a reply with no body (network failure, empty 204) carries `None`.
#[derive(Debug, Clone, Default)]
pub struct ServerResponse {
    pub body: Option<Value>,
}

impl ServerResponse {
    pub fn from_body(body: Value) -> Self {
        Self { body: Some(body) }
    }
}

/// Vendor reply body. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
struct ServerBody {
    #[serde(default)]
    bid: Option<ServerBid>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default, rename = "netRevenue")]
    net_revenue: Option<bool>,
    #[serde(default)]
    ttl: Option<u32>,
}

/// The single bid object a vendor reply may carry.
#[derive(Debug, Clone, Deserialize)]
struct ServerBid {
    #[serde(rename = "bidId")]
    bid_id: String,
    cpm: f64,
    width: u32,
    height: u32,
    #[serde(rename = "creativeId")]
    creative_id: String,
    ad: String,
    #[serde(default)]
    meta: Option<Value>,
}

/// Normalized bid record returned to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedBid {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub cpm: f64,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "creativeId")]
    pub creative_id: String,
    pub ad: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    pub currency: String,
    #[serde(rename = "netRevenue")]
    pub net_revenue: bool,
    pub ttl: u32,
    #[serde(rename = "mediaType")]
    pub media_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pubid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placementid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Interprets one vendor reply. A missing body or missing bid object
/// yields an empty vec; a body that fails deserialization is logged and
/// suppressed the same way. Never returns a partial record.
pub(crate) fn interpret(
    defaults: &BidderSettings,
    response: &ServerResponse,
    request: Option<&OutboundRequest>,
) -> Vec<NormalizedBid> {
    let Some(raw_body) = &response.body else {
        return Vec::new();
    };

    let body: ServerBody = match serde_json::from_value(raw_body.clone()) {
        Ok(body) => body,
        Err(err) => {
            log::warn!("Discarding unparseable bidder response: {err}");
            return Vec::new();
        }
    };

    let Some(bid) = body.bid else {
        return Vec::new();
    };

    let unit = request.map(|request| &request.payload.bidrequest);

    vec![NormalizedBid {
        request_id: bid.bid_id,
        cpm: bid.cpm,
        width: bid.width,
        height: bid.height,
        creative_id: bid.creative_id,
        ad: bid.ad,
        meta: bid.meta,
        currency: body
            .currency
            .filter(|currency| !currency.is_empty())
            .unwrap_or_else(|| defaults.default_currency.clone()),
        net_revenue: body.net_revenue.unwrap_or(defaults.default_net_revenue),
        ttl: body.ttl.filter(|ttl| *ttl != 0).unwrap_or(defaults.default_ttl_secs),
        media_type: MEDIA_TYPE_BANNER.to_string(),
        pubid: unit.map(|unit| unit.pubid.clone()),
        placementid: unit.map(|unit| unit.placementid.clone()),
        size: unit.map(|unit| unit.size.clone()),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use serde_json::json;
    use url::Url;

    use crate::request::{BidPayload, UnitRequest};
    use crate::visitor::VisitorInfo;

    fn defaults() -> BidderSettings {
        BidderSettings::default()
    }

    fn bid_body() -> Value {
        json!({
            "bid": {
                "bidId": "b1",
                "cpm": 1.5,
                "width": 300,
                "height": 250,
                "creativeId": "c1",
                "ad": "<div/>"
            }
        })
    }

    fn outbound_request() -> OutboundRequest {
        OutboundRequest {
            method: Method::POST,
            url: Url::parse("https://bidder.h12-media.com/prebid/").unwrap(),
            with_credentials: true,
            payload: BidPayload {
                gdpr: false,
                gdpr_cs: String::new(),
                usp: false,
                usp_cs: String::new(),
                top_level_url: String::new(),
                referer_url: String::new(),
                isiframe: false,
                version: String::new(),
                ext_user_ids: Vec::new(),
                visitor_info: VisitorInfo {
                    local_time: "2026-08-29 07:05:09".to_string(),
                    day_of_week: 6,
                    screen_width: 1280,
                    screen_height: 800,
                    doc_width: 1280,
                    doc_height: 2400,
                    scrollbarx: 0.0,
                    scrollbary: 0.0,
                },
                bidrequest: UnitRequest {
                    bid_id: "b1".to_string(),
                    transaction_id: "txn-b1".to_string(),
                    adunit_id: "slot-a".to_string(),
                    pubid: "pub-1".to_string(),
                    placementid: "plc-9".to_string(),
                    size: "300x250".to_string(),
                    adunit_size: vec![(300, 250)],
                    coords: None,
                    ishidden: false,
                    pubsubid: None,
                    pubcontainerid: None,
                },
            },
        }
    }

    #[test]
    fn missing_body_yields_empty() {
        let bids = interpret(&defaults(), &ServerResponse::default(), None);
        assert!(bids.is_empty());
    }

    #[test]
    fn body_without_bid_yields_empty() {
        let response = ServerResponse::from_body(json!({ "currency": "EUR" }));
        let bids = interpret(&defaults(), &response, None);
        assert!(bids.is_empty());
    }

    #[test]
    fn malformed_body_is_suppressed() {
        let response = ServerResponse::from_body(json!({ "bid": { "cpm": "not a number" } }));
        let bids = interpret(&defaults(), &response, None);
        assert!(bids.is_empty());
    }

    #[test]
    fn bid_gets_defaults_when_overrides_are_absent() {
        let response = ServerResponse::from_body(bid_body());
        let bids = interpret(&defaults(), &response, None);

        assert_eq!(bids.len(), 1);
        let bid = &bids[0];
        assert_eq!(bid.request_id, "b1");
        assert_eq!(bid.cpm, 1.5);
        assert_eq!(bid.width, 300);
        assert_eq!(bid.height, 250);
        assert_eq!(bid.creative_id, "c1");
        assert_eq!(bid.ad, "<div/>");
        assert_eq!(bid.currency, "USD");
        assert!(!bid.net_revenue);
        assert_eq!(bid.ttl, 360);
        assert_eq!(bid.media_type, "banner");
    }

    #[test]
    fn server_overrides_take_precedence() {
        let mut body = bid_body();
        body["currency"] = json!("EUR");
        body["netRevenue"] = json!(true);
        body["ttl"] = json!(60);

        let bids = interpret(&defaults(), &ServerResponse::from_body(body), None);
        let bid = &bids[0];
        assert_eq!(bid.currency, "EUR");
        assert!(bid.net_revenue);
        assert_eq!(bid.ttl, 60);
    }

    #[test]
    fn empty_currency_falls_back_to_default() {
        let mut body = bid_body();
        body["currency"] = json!("");

        let bids = interpret(&defaults(), &ServerResponse::from_body(body), None);
        assert_eq!(bids[0].currency, "USD");
    }

    #[test]
    fn pass_through_fields_come_from_the_outbound_request() {
        let response = ServerResponse::from_body(bid_body());
        let request = outbound_request();
        let bids = interpret(&defaults(), &response, Some(&request));

        let bid = &bids[0];
        assert_eq!(bid.pubid.as_deref(), Some("pub-1"));
        assert_eq!(bid.placementid.as_deref(), Some("plc-9"));
        assert_eq!(bid.size.as_deref(), Some("300x250"));
    }

    #[test]
    fn pass_through_fields_absent_without_request() {
        let response = ServerResponse::from_body(bid_body());
        let bids = interpret(&defaults(), &response, None);

        assert_eq!(bids[0].pubid, None);
        assert_eq!(bids[0].placementid, None);
        assert_eq!(bids[0].size, None);
    }

    #[test]
    fn meta_passes_through() {
        let mut body = bid_body();
        body["bid"]["meta"] = json!({ "advertiserDomains": ["adv.example"] });

        let bids = interpret(&defaults(), &ServerResponse::from_body(body), None);
        assert_eq!(
            bids[0].meta,
            Some(json!({ "advertiserDomains": ["adv.example"] }))
        );
    }

    #[test]
    fn normalized_bid_serializes_with_wire_names() {
        let response = ServerResponse::from_body(bid_body());
        let bids = interpret(&defaults(), &response, None);
        let json = serde_json::to_value(&bids[0]).unwrap();

        assert!(json.get("requestId").is_some());
        assert!(json.get("creativeId").is_some());
        assert!(json.get("netRevenue").is_some());
        assert_eq!(json.get("mediaType"), Some(&json!("banner")));
        assert!(json.get("pubid").is_none());
    }
}
