//! JSON REST handlers for the switch.

use axum::Json;
use axum::extract::{Path, State};

use restswitch_app::ports::{HttpClient, TemplateRenderer};
use restswitch_domain::entity::SwitchEntity;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/switch`
pub async fn get<H, T>(State(state): State<AppState<H, T>>) -> Json<SwitchEntity>
where
    H: HttpClient + Send + Sync + 'static,
    T: TemplateRenderer + Send + Sync + 'static,
{
    Json(state.switch.snapshot())
}

/// `POST /api/switch/{service}`
///
/// Runs `turn_on`, `turn_off`, `toggle` or `update` and returns the
/// resulting snapshot.
///
/// # Errors
///
/// Returns an [`ApiError`] when the service is unknown or the switch could
/// not reach its resource.
pub async fn call_service<H, T>(
    State(state): State<AppState<H, T>>,
    Path(service): Path<String>,
) -> Result<Json<SwitchEntity>, ApiError>
where
    H: HttpClient + Send + Sync + 'static,
    T: TemplateRenderer + Send + Sync + 'static,
{
    let entity = state.switch.handle_service(&service).await?;
    Ok(Json(entity))
}
