use crate::{
    error::CryptoTapError,
    flow::{CheckoutController, CheckoutEvent},
    models::{ApiResponse, CheckoutMode, SessionView},
    services::{SessionRegistry, SharedSession},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub controller: CheckoutController,
    pub sessions: Arc<SessionRegistry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub mode: Option<CheckoutMode>,
}

async fn find(state: &AppState, id: Uuid) -> Result<SharedSession, CryptoTapError> {
    state
        .sessions
        .get(&id)
        .await
        .ok_or(CryptoTapError::SessionNotFound(id))
}

pub async fn create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Json<ApiResponse<SessionView>> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let session = state.sessions.create(request.mode).await;
    let view = SessionView::from(&*session.lock().await);

    Json(ApiResponse::ok(view))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SessionView>>, CryptoTapError> {
    let session = find(&state, id).await?;
    let view = SessionView::from(&*session.lock().await);

    Ok(Json(ApiResponse::ok(view)))
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, CryptoTapError> {
    if state.sessions.remove(&id).await {
        Ok(Json(ApiResponse::ok(id)))
    } else {
        Err(CryptoTapError::SessionNotFound(id))
    }
}

pub async fn post_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<CheckoutEvent>, JsonRejection>,
) -> Result<Json<ApiResponse<SessionView>>, CryptoTapError> {
    let Json(event) = payload?;
    let session = find(&state, id).await?;
    let mut session = session.lock().await;

    state.controller.dispatch(&mut session, event).await?;

    Ok(Json(ApiResponse::ok(SessionView::from(&*session))))
}
