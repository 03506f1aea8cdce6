//! Service entrypoint: configuration, tracing, database, HTTP server.

use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dyndns_relay_core::{
    CloudflareFactory, EnvCredentialSource, HttpProbe, ServiceContext, ShellRunner, UpdateService,
};
use dyndns_relay_web::config::{Config, LogFormat};
use dyndns_relay_web::handlers::{self, AppState};
use dyndns_relay_web::store::{migration::Migrator, DbStore};

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    Migrator::up(&db, None)
        .await
        .context("failed to run migrations")?;

    let ctx = Arc::new(ServiceContext::new(
        Arc::new(DbStore::new(db.clone())),
        Arc::new(HttpProbe::new()),
        Arc::new(ShellRunner),
        Arc::new(CloudflareFactory),
        Arc::new(EnvCredentialSource),
    ));
    let state = web::Data::new(AppState {
        service: UpdateService::new(ctx),
        db,
    });

    info!("listening on http://{}", config.bind_addr);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(handlers::configure)
    })
    .bind(&config.bind_addr)
    .with_context(|| format!("failed to bind {}", config.bind_addr))?
    .run()
    .await?;

    Ok(())
}
