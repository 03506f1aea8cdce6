//! HTTP handlers for the update callback and the health check.

use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use tracing::Instrument;

use dyndns_relay_core::{UpdateOutcome, UpdateRequest, UpdateService};

use crate::error::ApiError;

/// Shared application state.
pub struct AppState {
    /// The core update pipeline.
    pub service: UpdateService,
    /// Database handle, used by the health check.
    pub db: DatabaseConnection,
}

/// Inbound update fields, accepted from the query string or a form body.
///
/// Routers omit fields they have nothing to report for; missing and empty
/// are treated alike.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateForm {
    pub token: Option<String>,
    pub domain: Option<String>,
    pub ipaddr: Option<String>,
    pub ip6addr: Option<String>,
    pub ip6lanprefix: Option<String>,
    pub ether: Option<String>,
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}

impl UpdateForm {
    fn into_request(self) -> UpdateRequest {
        UpdateRequest {
            token: self.token.unwrap_or_default(),
            domain: self.domain.unwrap_or_default(),
            ipaddr: non_empty(self.ipaddr),
            ip6addr: non_empty(self.ip6addr),
            ip6lanprefix: non_empty(self.ip6lanprefix),
            ether: non_empty(self.ether),
        }
    }
}

/// Register the service routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(update_get))
        .route("/", web::post().to(update_post))
        .route("/health", web::get().to(health));
}

async fn update_get(
    state: web::Data<AppState>,
    form: web::Query<UpdateForm>,
) -> Result<HttpResponse, ApiError> {
    process(&state, form.into_inner()).await
}

async fn update_post(
    state: web::Data<AppState>,
    form: web::Form<UpdateForm>,
) -> Result<HttpResponse, ApiError> {
    process(&state, form.into_inner()).await
}

async fn process(state: &AppState, form: UpdateForm) -> Result<HttpResponse, ApiError> {
    let req = form.into_request();
    // The token is a secret; only the asserted domain goes into the span.
    let span = tracing::info_span!("update", domain = %req.domain);
    let outcome = state.service.handle(req).instrument(span).await?;

    let body = match outcome {
        UpdateOutcome::Modified => "OK modified\n",
        UpdateOutcome::Unchanged => "OK\n",
    };
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(body))
}

async fn health(state: web::Data<AppState>) -> HttpResponse {
    match state.db.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "status": "up" })),
        Err(e) => {
            tracing::error!("database ping failed: {e}");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({ "status": "down" }))
        }
    }
}
