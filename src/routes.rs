use crate::{
    config::{Config, StoreBackend},
    flow::{CheckoutController, FlowPolicy},
    handlers::*,
    models::{CheckoutMode, WidgetSettings},
    services::*,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Wires the collaborators named by `config` into a controller.
pub fn build_controller(config: &Config) -> anyhow::Result<CheckoutController> {
    let recorder: Arc<dyn TransactionRecorder> = match (config.store_backend, config.supabase()) {
        (StoreBackend::Memory, _) => {
            tracing::info!("Using in-memory transaction store");
            Arc::new(InMemoryRecorder::new())
        }
        (StoreBackend::Supabase, Some((url, key))) => {
            Arc::new(SupabaseRecorder::new(url, key, config.store_timeout)?)
        }
        (StoreBackend::Supabase, None) => {
            tracing::warn!("SUPABASE_URL or SUPABASE_ANON_KEY missing, transaction store unavailable");
            Arc::new(UnconfiguredRecorder)
        }
    };

    let initiator = TransakInitiator::new(
        config.transak_api_key.clone(),
        config.transak_environment,
        WidgetSettings::default(),
    );

    Ok(CheckoutController::new(recorder, Arc::new(initiator), config.flow_policy))
}

/// Full HTTP surface of the service.
pub fn app_router(
    controller: CheckoutController,
    default_mode: CheckoutMode,
    session_idle: Duration,
) -> Router {
    let sessions = Arc::new(SessionRegistry::new(default_mode, session_idle));

    let app_state = AppState {
        controller: controller.clone(),
        sessions: sessions.clone(),
    };

    let health_state = HealthState {
        controller,
        sessions,
        started_at: Instant::now(),
    };

    Router::new()
        .route("/health", get(health_check))
        .with_state(health_state)

        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/api/sessions/:id/events", post(post_event))
        .route("/api/transactions", get(list_transactions))
        .with_state(app_state)

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
}

/// Router over explicit collaborators, with default flow settings.
pub fn router_with(
    recorder: Arc<dyn TransactionRecorder>,
    initiator: Arc<dyn PaymentInitiator>,
    policy: FlowPolicy,
    default_mode: CheckoutMode,
) -> Router {
    let controller = CheckoutController::new(recorder, initiator, policy);
    app_router(controller, default_mode, Duration::from_secs(1800))
}
