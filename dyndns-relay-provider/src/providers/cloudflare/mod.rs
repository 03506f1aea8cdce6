//! Cloudflare DNS provider.

mod error;
mod http;
mod provider;
mod types;

use reqwest::Client;

use crate::providers::common::create_http_client;

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse, CloudflareZone};

pub(crate) const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// TTL for upserted address records. 1 selects Cloudflare's "automatic" TTL.
pub(crate) const RECORD_TTL: u32 = 1;

/// Cloudflare DNS provider.
///
/// Authenticates with a bearer API token scoped to DNS edit on the target
/// zone.
pub struct CloudflareProvider {
    pub(crate) client: Client,
    pub(crate) api_token: String,
}

impl CloudflareProvider {
    #[must_use]
    pub fn new(api_token: String) -> Self {
        Self {
            client: create_http_client(),
            api_token,
        }
    }
}
