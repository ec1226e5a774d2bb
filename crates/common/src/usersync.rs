//! User-sync relay: filters the vendor-declared sync URLs by the host's
//! sync capabilities and substitutes the consent macros.

use serde::{Deserialize, Serialize};

use crate::bidder::GdprConsent;
use crate::response::ServerResponse;

const MACRO_GDPR: &str = "{gdpr}";
const MACRO_GDPR_CONSENT: &str = "{gdpr_cs}";
const MACRO_USP: &str = "{usp}";
// The vendor contract spells this macro "sup_cs".
const MACRO_USP_CONSENT: &str = "{sup_cs}";

/// Sync capabilities the host declares for this auction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    pub iframe_enabled: bool,
    pub pixel_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncKind {
    Iframe,
    Image,
}

/// A user-sync call handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncDescriptor {
    #[serde(rename = "type")]
    pub kind: SyncKind,
    pub url: String,
}

/// The `usersync` list of a vendor reply body. Everything else in the
/// body is irrelevant here.
#[derive(Debug, Default, Deserialize)]
struct SyncBody {
    #[serde(default)]
    usersync: Vec<SyncEntry>,
}

#[derive(Debug, Deserialize)]
struct SyncEntry {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    url: String,
}

/// Resolves user syncs from the first server reply. Entries whose type is
/// unknown or whose capability the host disabled are dropped silently, as
/// are entries without a URL. A missing body yields an empty list.
pub(crate) fn user_syncs(
    options: &SyncOptions,
    responses: &[ServerResponse],
    gdpr_consent: Option<&GdprConsent>,
    usp_consent: Option<&str>,
) -> Vec<SyncDescriptor> {
    let Some(raw_body) = responses.first().and_then(|response| response.body.as_ref()) else {
        return Vec::new();
    };

    let body: SyncBody = match serde_json::from_value(raw_body.clone()) {
        Ok(body) => body,
        Err(err) => {
            log::warn!("Discarding unparseable usersync list: {err}");
            return Vec::new();
        }
    };

    let gdpr = gdpr_consent.cloned().unwrap_or_default();
    let usp_string = usp_consent.unwrap_or_default();
    let usp_applies = !usp_string.is_empty();

    body.usersync
        .into_iter()
        .filter_map(|entry| {
            if entry.url.is_empty() {
                return None;
            }
            let kind = match entry.kind.as_str() {
                "iframe" if options.iframe_enabled => SyncKind::Iframe,
                "image" if options.pixel_enabled => SyncKind::Image,
                _ => return None,
            };
            Some(SyncDescriptor {
                kind,
                url: substitute(&entry.url, &gdpr, usp_applies, usp_string),
            })
        })
        .collect()
}

fn substitute(url: &str, gdpr: &GdprConsent, usp_applies: bool, usp_string: &str) -> String {
    url.replace(MACRO_GDPR, bool_str(gdpr.gdpr_applies))
        .replace(MACRO_GDPR_CONSENT, &gdpr.consent_string)
        .replace(MACRO_USP, bool_str(usp_applies))
        .replace(MACRO_USP_CONSENT, usp_string)
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
