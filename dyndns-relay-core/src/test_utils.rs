//! In-memory fakes shared by the core unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use dyndns_relay_provider::{AddressRecord, DnsProvider, DnsRecord, ProviderError};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{CommandRunner, CredentialSource, HostStore, ProviderFactory, UrlProbe};
use crate::types::{AddressUpdate, Host, UpdateApplied, UpdateRule};

pub fn host_fixture(token: &str, ip4: Option<&str>, ip6: Option<&str>) -> Host {
    Host {
        token: token.to_string(),
        name: "router".to_string(),
        domain: "router.example.com".to_string(),
        zone: "example.com".to_string(),
        ip4addr: ip4.map(String::from),
        ip6addr: ip6.map(String::from),
        modified: Utc::now(),
        created: Utc::now(),
    }
}

pub fn rule_fixture(id: i64, token: &str, cmd: &str, args: &str) -> UpdateRule {
    UpdateRule {
        id,
        token: token.to_string(),
        cmd: cmd.to_string(),
        args: args.to_string(),
        credential_env: None,
        modified: Utc::now(),
        created: Utc::now(),
    }
}

/// In-memory `HostStore` with the same change-detection semantics as the
/// database store.
#[derive(Default)]
pub struct MemoryHostStore {
    hosts: Mutex<HashMap<String, Host>>,
    rules: Mutex<Vec<UpdateRule>>,
}

impl MemoryHostStore {
    pub fn insert_host(&self, host: Host) {
        self.hosts.lock().unwrap().insert(host.token.clone(), host);
    }

    pub fn insert_rule(&self, rule: UpdateRule) {
        self.rules.lock().unwrap().push(rule);
    }

    pub fn host(&self, token: &str) -> Option<Host> {
        self.hosts.lock().unwrap().get(token).cloned()
    }
}

#[async_trait]
impl HostStore for MemoryHostStore {
    async fn apply_addresses(&self, update: &AddressUpdate) -> CoreResult<UpdateApplied> {
        let mut hosts = self.hosts.lock().unwrap();
        let host = hosts
            .get_mut(&update.token)
            .ok_or_else(|| CoreError::HostNotFound(update.token.clone()))?;

        if update.domain != host.domain {
            return Err(CoreError::DomainMismatch {
                asserted: update.domain.clone(),
                configured: host.domain.clone(),
            });
        }

        let mut modified = false;
        if let Some(ip4) = &update.ip4 {
            if host.ip4addr.as_deref() != Some(ip4) {
                host.ip4addr = Some(ip4.clone());
                modified = true;
            }
        }
        if let Some(ip6) = &update.ip6 {
            if host.ip6addr.as_deref() != Some(ip6) {
                host.ip6addr = Some(ip6.clone());
                modified = true;
            }
        }
        if modified {
            host.modified = Utc::now();
        }

        Ok(UpdateApplied {
            host: host.clone(),
            modified,
        })
    }

    async fn rules_for(&self, token: &str) -> CoreResult<Vec<UpdateRule>> {
        let mut rules: Vec<UpdateRule> = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.token == token)
            .cloned()
            .collect();
        rules.sort_by_key(|r| r.id);
        Ok(rules)
    }
}

/// Probe that records requested URLs and optionally fails every call.
#[derive(Default)]
pub struct RecordingProbe {
    calls: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl RecordingProbe {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl UrlProbe for RecordingProbe {
    async fn get(&self, url: &str) -> CoreResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CoreError::ProbeFailed(format!("GET {url} returned 503")));
        }
        self.calls.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Runner that records (command, argument) pairs.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingRunner {
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &str, arg: &str) -> CoreResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), arg.to_string()));
        Ok(())
    }
}

/// Provider that records set_records calls and optionally fails.
#[derive(Default)]
pub struct RecordingProvider {
    calls: Mutex<Vec<(String, Vec<AddressRecord>)>>,
    fail: AtomicBool,
}

impl RecordingProvider {
    pub fn calls(&self) -> Vec<(String, Vec<AddressRecord>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_all(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl DnsProvider for RecordingProvider {
    fn id(&self) -> &'static str {
        "recording"
    }

    async fn set_records(
        &self,
        zone: &str,
        records: &[AddressRecord],
    ) -> Result<Vec<DnsRecord>, ProviderError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ProviderError::Unknown {
                provider: "recording".to_string(),
                raw_code: None,
                raw_message: "push rejected".to_string(),
            });
        }
        self.calls
            .lock()
            .unwrap()
            .push((zone.to_string(), records.to_vec()));
        Ok(Vec::new())
    }
}

/// Factory handing out one shared provider, recording the tokens used.
pub struct RecordingProviderFactory {
    provider: Arc<RecordingProvider>,
    tokens: Mutex<Vec<String>>,
}

impl RecordingProviderFactory {
    pub fn new(provider: Arc<RecordingProvider>) -> Self {
        Self {
            provider,
            tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

impl ProviderFactory for RecordingProviderFactory {
    fn create(&self, api_token: &str) -> Arc<dyn DnsProvider> {
        self.tokens.lock().unwrap().push(api_token.to_string());
        Arc::clone(&self.provider) as Arc<dyn DnsProvider>
    }
}

/// Credential source backed by a plain map.
#[derive(Default)]
pub struct MapCredentials {
    values: Mutex<HashMap<String, String>>,
}

impl MapCredentials {
    pub fn set(&self, name: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
    }
}

impl CredentialSource for MapCredentials {
    fn get(&self, name: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .filter(|v| !v.is_empty())
    }
}

/// Bundle of fakes wired into a `ServiceContext`.
pub struct TestContext {
    pub store: Arc<MemoryHostStore>,
    pub probe: Arc<RecordingProbe>,
    pub runner: Arc<RecordingRunner>,
    pub factory: Arc<RecordingProviderFactory>,
    pub credentials: Arc<MapCredentials>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_provider(Arc::new(RecordingProvider::default()))
    }

    pub fn with_provider(provider: Arc<RecordingProvider>) -> Self {
        Self {
            store: Arc::new(MemoryHostStore::default()),
            probe: Arc::new(RecordingProbe::default()),
            runner: Arc::new(RecordingRunner::default()),
            factory: Arc::new(RecordingProviderFactory::new(provider)),
            credentials: Arc::new(MapCredentials::default()),
        }
    }

    pub fn context(&self) -> Arc<ServiceContext> {
        Arc::new(ServiceContext::new(
            Arc::clone(&self.store) as _,
            Arc::clone(&self.probe) as _,
            Arc::clone(&self.runner) as _,
            Arc::clone(&self.factory) as _,
            Arc::clone(&self.credentials) as _,
        ))
    }
}
