//! The update pipeline: resolve → persist → dispatch.

use std::sync::Arc;

use dyndns_relay_provider::{full_name_to_relative, AddressRecord, RecordType};

use crate::error::CoreResult;
use crate::eui64;
use crate::render::{render, RenderContext};
use crate::services::ServiceContext;
use crate::types::{
    AddressUpdate, Host, RuleAction, UpdateOutcome, UpdateRequest, UpdateRule,
};

/// Handles one inbound address-update callback end to end.
pub struct UpdateService {
    ctx: Arc<ServiceContext>,
}

impl UpdateService {
    /// Create an update service instance
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Run the full pipeline for one request.
    ///
    /// The address change commits before any rule dispatches
    /// (commit-then-dispatch): a failing action surfaces as an error to the
    /// caller but never reverts a legitimate address change.
    pub async fn handle(&self, req: UpdateRequest) -> CoreResult<UpdateOutcome> {
        let ip6 = eui64::resolve_ip6(&req)?;

        let update = AddressUpdate {
            token: req.token.clone(),
            domain: req.domain.clone(),
            ip4: req.ipaddr.clone(),
            ip6,
        };

        let applied = self.ctx.host_store.apply_addresses(&update).await?;
        log::debug!(
            "update for {}: modified={}",
            applied.host.domain,
            applied.modified
        );

        if !applied.modified {
            return Ok(UpdateOutcome::Unchanged);
        }

        self.run_rules(&req, &applied.host).await?;
        Ok(UpdateOutcome::Modified)
    }

    /// Dispatch every rule of the host, in stored order, stopping at the
    /// first fatal failure. Side effects of already-dispatched rules are
    /// not rolled back.
    async fn run_rules(&self, req: &UpdateRequest, host: &Host) -> CoreResult<()> {
        let rules = self.ctx.host_store.rules_for(&host.token).await?;

        for rule in &rules {
            let ctx = RenderContext { req, host, rule };
            let arg = render(&rule.args, &ctx)?;

            match rule.action() {
                RuleAction::Probe => {
                    log::debug!("rule {}: GET {arg}", rule.id);
                    self.ctx.probe.get(&arg).await?;
                }
                RuleAction::DnsPush => {
                    self.push_records(host, rule).await?;
                }
                RuleAction::ShellExec(template) => {
                    let command = render(template, &ctx)?;
                    log::debug!("rule {}: exec {command}", rule.id);
                    self.ctx.runner.run(&command, &arg).await?;
                }
            }
        }

        Ok(())
    }

    /// Push the host's stored addresses to the DNS provider.
    ///
    /// A missing or empty credential reference skips the rule — the only
    /// non-fatal path in the pipeline.
    async fn push_records(&self, host: &Host, rule: &UpdateRule) -> CoreResult<()> {
        let Some(env_name) = rule
            .credential_env
            .as_deref()
            .filter(|name| !name.is_empty())
        else {
            log::warn!("rule {}: credential reference not set, skipping", rule.id);
            return Ok(());
        };

        let Some(api_token) = self.ctx.credentials.get(env_name) else {
            log::warn!(
                "rule {}: credential variable '{env_name}' not set, skipping",
                rule.id
            );
            return Ok(());
        };

        let name = full_name_to_relative(&host.domain, &host.zone);
        let mut records = Vec::new();
        if let Some(ip4) = &host.ip4addr {
            records.push(AddressRecord {
                name: name.clone(),
                record_type: RecordType::A,
                value: ip4.clone(),
            });
        }
        if let Some(ip6) = &host.ip6addr {
            records.push(AddressRecord {
                name: name.clone(),
                record_type: RecordType::Aaaa,
                value: ip6.clone(),
            });
        }

        if records.is_empty() {
            log::warn!("rule {}: host has no stored addresses to push", rule.id);
            return Ok(());
        }

        let provider = self.ctx.providers.create(&api_token);
        log::debug!(
            "rule {}: {} set {} record(s) in {}",
            rule.id,
            provider.id(),
            records.len(),
            host.zone
        );
        provider.set_records(&host.zone, &records).await?;
        Ok(())
    }
}
