//! Cloudflare `DnsProvider` implementation.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{ProviderError, Result};
use crate::names::relative_to_full_name;
use crate::traits::{DnsProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{AddressRecord, DnsRecord};

use super::{CloudflareDnsRecord, CloudflareProvider, CloudflareZone, RECORD_TTL};

/// Request body for creating or replacing a record.
#[derive(Serialize)]
struct RecordBody<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    name: &'a str,
    content: &'a str,
    ttl: u32,
}

impl CloudflareProvider {
    fn to_dns_record(cf_record: CloudflareDnsRecord) -> DnsRecord {
        DnsRecord {
            id: cf_record.id,
            record_type: cf_record.record_type,
            name: cf_record.name,
            content: cf_record.content,
            ttl: cf_record.ttl,
        }
    }

    /// Resolve a zone name to its Cloudflare zone id.
    async fn zone_id(&self, zone: &str) -> Result<String> {
        let context = ErrorContext {
            domain: Some(zone.to_string()),
            ..ErrorContext::default()
        };
        let zones: Vec<CloudflareZone> = self
            .get(
                &format!("/zones?name={}", urlencoding::encode(zone)),
                context,
            )
            .await?;

        zones
            .into_iter()
            .find(|z| z.name.eq_ignore_ascii_case(zone))
            .map(|z| z.id)
            .ok_or_else(|| ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: zone.to_string(),
                raw_message: None,
            })
    }

    /// Replace-or-create a single address record.
    async fn upsert_record(
        &self,
        zone_id: &str,
        zone: &str,
        record: &AddressRecord,
    ) -> Result<DnsRecord> {
        let full_name = relative_to_full_name(&record.name, zone);
        let record_type = record.record_type.as_str();

        let context = ErrorContext {
            domain: Some(zone.to_string()),
            ..ErrorContext::default()
        };
        let existing: Vec<CloudflareDnsRecord> = self
            .get(
                &format!(
                    "/zones/{zone_id}/dns_records?type={record_type}&name={}",
                    urlencoding::encode(&full_name)
                ),
                context,
            )
            .await?;

        let body = RecordBody {
            record_type,
            name: &full_name,
            content: &record.value,
            ttl: RECORD_TTL,
        };

        let cf_record: CloudflareDnsRecord = if let Some(current) = existing.first() {
            let context = ErrorContext {
                record_id: Some(current.id.clone()),
                domain: Some(zone.to_string()),
            };
            self.patch(
                &format!("/zones/{zone_id}/dns_records/{}", current.id),
                &body,
                context,
            )
            .await?
        } else {
            let context = ErrorContext {
                domain: Some(zone.to_string()),
                ..ErrorContext::default()
            };
            self.post(&format!("/zones/{zone_id}/dns_records"), &body, context)
                .await?
        };

        Ok(Self::to_dns_record(cf_record))
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    fn id(&self) -> &'static str {
        "cloudflare"
    }

    async fn set_records(&self, zone: &str, records: &[AddressRecord]) -> Result<Vec<DnsRecord>> {
        let zone_id = self.zone_id(zone).await?;

        let mut updated = Vec::with_capacity(records.len());
        for record in records {
            let rec = self.upsert_record(&zone_id, zone, record).await?;
            log::info!(
                "cloudflare set {} {} -> {}",
                rec.record_type,
                rec.name,
                rec.content
            );
            updated.push(rec);
        }
        Ok(updated)
    }
}
