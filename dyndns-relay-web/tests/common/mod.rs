#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]
//! Shared fixtures: a temp-file SQLite database behind the real `DbStore`,
//! with recording fakes for every outbound backend.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, Database, DatabaseConnection, EntityTrait};
use sea_orm_migration::MigratorTrait;

use dyndns_relay_core::error::ProviderError;
use dyndns_relay_core::{
    CommandRunner, CoreError, CoreResult, CredentialSource, ProviderFactory, ServiceContext,
    UpdateService, UrlProbe,
};
use dyndns_relay_provider::{AddressRecord, DnsProvider, DnsRecord};
use dyndns_relay_web::handlers::AppState;
use dyndns_relay_web::store::entity::{host, update_rule};
use dyndns_relay_web::store::migration::Migrator;
use dyndns_relay_web::store::DbStore;

/// Probe fake recording requested URLs.
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

/// Runner fake recording (command, argument) pairs.
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

/// Provider fake recording set_records calls.
#[derive(Default)]
pub struct RecordingProvider {
    calls: Mutex<Vec<(String, Vec<AddressRecord>)>>,
}

impl RecordingProvider {
    pub fn calls(&self) -> Vec<(String, Vec<AddressRecord>)> {
        self.calls.lock().unwrap().clone()
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
        self.calls
            .lock()
            .unwrap()
            .push((zone.to_string(), records.to_vec()));
        Ok(Vec::new())
    }
}

pub struct SharedProviderFactory {
    provider: Arc<RecordingProvider>,
}

impl ProviderFactory for SharedProviderFactory {
    fn create(&self, _api_token: &str) -> Arc<dyn DnsProvider> {
        Arc::clone(&self.provider) as Arc<dyn DnsProvider>
    }
}

/// Credential fake backed by a plain map.
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

/// One fully wired application over a fresh temp-file SQLite database.
pub struct TestApp {
    pub state: web::Data<AppState>,
    pub db: DatabaseConnection,
    pub probe: Arc<RecordingProbe>,
    pub runner: Arc<RecordingRunner>,
    pub provider: Arc<RecordingProvider>,
    pub credentials: Arc<MapCredentials>,
    pub tmp: tempfile::TempDir,
}

pub async fn setup() -> TestApp {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let db_path = tmp.path().join("test.db");
    let db = Database::connect(format!("sqlite://{}?mode=rwc", db_path.display()))
        .await
        .expect("failed to connect to SQLite");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");

    let probe = Arc::new(RecordingProbe::default());
    let runner = Arc::new(RecordingRunner::default());
    let provider = Arc::new(RecordingProvider::default());
    let credentials = Arc::new(MapCredentials::default());

    let ctx = Arc::new(ServiceContext::new(
        Arc::new(DbStore::new(db.clone())),
        Arc::clone(&probe) as _,
        Arc::clone(&runner) as _,
        Arc::new(SharedProviderFactory {
            provider: Arc::clone(&provider),
        }),
        Arc::clone(&credentials) as _,
    ));

    let state = web::Data::new(AppState {
        service: UpdateService::new(ctx),
        db: db.clone(),
    });

    TestApp {
        state,
        db,
        probe,
        runner,
        provider,
        credentials,
        tmp,
    }
}

// ===== Seeding helpers =====

pub async fn insert_host(
    db: &DatabaseConnection,
    token: &str,
    domain: &str,
    zone: &str,
    ip4: Option<&str>,
    ip6: Option<&str>,
) {
    let now = Utc::now().to_rfc3339();
    host::ActiveModel {
        token: Set(token.to_string()),
        name: Set("router".to_string()),
        domain: Set(domain.to_string()),
        zone: Set(zone.to_string()),
        ip4addr: Set(ip4.map(String::from)),
        ip6addr: Set(ip6.map(String::from)),
        modified: Set(now.clone()),
        created: Set(now),
    }
    .insert(db)
    .await
    .expect("failed to insert host");
}

pub async fn insert_rule(
    db: &DatabaseConnection,
    token: &str,
    cmd: &str,
    args: &str,
    credential_env: Option<&str>,
) {
    let now = Utc::now().to_rfc3339();
    update_rule::ActiveModel {
        token: Set(token.to_string()),
        cmd: Set(cmd.to_string()),
        args: Set(args.to_string()),
        credential_env: Set(credential_env.map(String::from)),
        modified: Set(now.clone()),
        created: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to insert rule");
}

pub async fn fetch_host(db: &DatabaseConnection, token: &str) -> Option<host::Model> {
    host::Entity::find_by_id(token.to_string())
        .one(db)
        .await
        .expect("failed to query host")
}
