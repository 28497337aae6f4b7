use crate::{
    flow::CheckoutController,
    models::HealthStatus,
    services::SessionRegistry,
};
use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct HealthState {
    pub controller: CheckoutController,
    pub sessions: Arc<SessionRegistry>,
    pub started_at: Instant,
}

pub async fn health_check(
    State(state): State<HealthState>,
) -> Json<HealthStatus> {
    let store_ok = state.controller.recorder().ping().await;
    let widget_ok = state.controller.initiator().ready();

    let status = if store_ok && widget_ok {
        "healthy"
    } else if store_ok || widget_ok {
        "degraded"
    } else {
        "unhealthy"
    };

    Json(HealthStatus {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checkout_mode: state.sessions.default_mode(),
        store: store_ok,
        widget: widget_ok,
        active_sessions: state.sessions.active(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        timestamp: Utc::now(),
    })
}
