//! HTTP Endpoints
//!
//! REST surface for the calling engine: calling-list generation, provider
//! webhooks, manual outcomes and call-history reads.

use axum::{
    extract::{Json, Path, Query, State},
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use fieldcall_core::{CallRecord, Prospect};
use fieldcall_dialer::{CallContext, OutcomeRequest, RecordingCallback, StatusCallback};

use crate::metrics::{
    metrics_handler, record_list_generated, record_outcome, record_recording_event,
    record_status_event, record_storage_failure,
};
use crate::state::AppState;
use crate::ServerError;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.settings.server.cors_origins,
        state.settings.server.cors_enabled,
    );

    Router::new()
        // Calling list
        .route("/api/field-reps/:id/calling-list", get(get_calling_list))
        // Provider webhooks
        .route("/webhooks/voice/status", post(status_webhook))
        .route("/webhooks/voice/recording", post(recording_webhook))
        // Manual outcomes
        .route("/api/calls/outcome", post(post_outcome))
        // Call history reads
        .route("/api/calls/:call_key", get(get_call))
        .route("/api/prospects/:id/calls", get(get_prospect_calls))
        // Health checks
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty, defaults to localhost:3000 for safety
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin("http://localhost:3000".parse::<HeaderValue>().unwrap())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(true)
}

/// Calling list response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallingListResponse {
    pub field_rep_id: String,
    pub territory: String,
    pub count: usize,
    pub prospects: Vec<Prospect>,
}

/// Generate a field rep's calling list
async fn get_calling_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CallingListResponse>, ServerError> {
    let rep = state
        .field_reps
        .get(&id)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?
        .ok_or_else(|| ServerError::NotFound(format!("field rep {id}")))?;

    let pool = state
        .prospects
        .list_by_territory(&rep.territory)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    let prospects = state.generator.generate(pool, &rep, Utc::now());
    record_list_generated(prospects.len());

    Ok(Json(CallingListResponse {
        field_rep_id: rep.id,
        territory: rep.territory,
        count: prospects.len(),
        prospects,
    }))
}

/// Provider status callback
async fn status_webhook(
    State(state): State<AppState>,
    Query(context): Query<CallContext>,
    Json(callback): Json<StatusCallback>,
) -> Result<Json<CallRecord>, ServerError> {
    record_status_event(&callback.call_status);

    let record = state
        .correlator
        .apply_status(callback, context)
        .await
        .map_err(storage_aware)?;

    Ok(Json(record))
}

/// Provider recording callback
async fn recording_webhook(
    State(state): State<AppState>,
    Json(callback): Json<RecordingCallback>,
) -> Result<Json<CallRecord>, ServerError> {
    record_recording_event();

    let record = state
        .correlator
        .apply_recording(callback)
        .await
        .map_err(storage_aware)?;

    Ok(Json(record))
}

/// Record a manual call outcome
async fn post_outcome(
    State(state): State<AppState>,
    Json(request): Json<OutcomeRequest>,
) -> Result<Json<CallRecord>, ServerError> {
    if request.prospect_id.is_empty() || request.caller_id.is_empty() {
        return Err(ServerError::InvalidRequest(
            "prospect_id and caller_id are required".to_string(),
        ));
    }
    if request.outcome.is_empty() {
        return Err(ServerError::InvalidRequest("outcome is required".to_string()));
    }

    let record = state.outcomes.record(request, Utc::now()).await?;
    record_outcome();

    Ok(Json(record))
}

/// Call record snapshot
async fn get_call(
    State(state): State<AppState>,
    Path(call_key): Path<String>,
) -> Result<Json<CallRecord>, ServerError> {
    let record = state
        .correlator
        .get(&call_key)
        .await
        .map_err(storage_aware)?
        .ok_or_else(|| ServerError::NotFound(format!("call {call_key}")))?;

    Ok(Json(record))
}

/// Call history response with read-side prospect fields joined in
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallHistoryResponse {
    pub prospect_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prospect_name: Option<String>,
    pub count: usize,
    pub calls: Vec<CallRecord>,
}

/// Call history for a prospect, most recent attempt first
async fn get_prospect_calls(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CallHistoryResponse>, ServerError> {
    let prospect = state
        .prospects
        .get(&id)
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))?;

    let calls = state
        .call_records
        .list_for_prospect(&id)
        .await
        .map_err(storage_aware)?;

    Ok(Json(CallHistoryResponse {
        prospect_id: id,
        prospect_name: prospect.and_then(|p| p.name),
        count: calls.len(),
        calls,
    }))
}

/// Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness check
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ready",
        "territory_engine": "ok",
        "call_store": state.call_records.list_for_prospect("").await.is_ok(),
    }))
}

/// Convert a dialer failure, bumping the storage-failure counter when the
/// store (rather than the business rule) was at fault
fn storage_aware(err: fieldcall_dialer::DialerError) -> ServerError {
    if matches!(err, fieldcall_dialer::DialerError::Storage(_)) {
        record_storage_failure();
    }
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{InMemoryFieldRepDirectory, InMemoryProspectDirectory};
    use axum::http::StatusCode;
    use fieldcall_config::Settings;
    use fieldcall_core::{CallStatus, FieldRep};
    use fieldcall_dialer::InMemoryCallRecordStore;
    use std::sync::Arc;

    fn test_state() -> (
        Arc<InMemoryProspectDirectory>,
        Arc<InMemoryFieldRepDirectory>,
        AppState,
    ) {
        let prospects = Arc::new(InMemoryProspectDirectory::new());
        let reps = Arc::new(InMemoryFieldRepDirectory::new());
        let store = Arc::new(InMemoryCallRecordStore::new());
        let state = AppState::new(
            Settings::default(),
            prospects.clone(),
            reps.clone(),
            store,
        );
        (prospects, reps, state)
    }

    #[test]
    fn test_router_creation() {
        let (_, _, state) = test_state();
        let _ = create_router(state);
    }

    #[tokio::test]
    async fn test_calling_list_for_unknown_rep() {
        let (_, _, state) = test_state();

        let result = get_calling_list(State(state), Path("ghost".to_string())).await;
        assert!(matches!(result, Err(ServerError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_calling_list_filters_and_counts() {
        let (prospects, reps, state) = test_state();
        reps.insert(FieldRep::new("r-1", "north"));
        prospects.insert(Prospect::new("p-1", "north"));
        prospects.insert(Prospect::new("p-2", "south"));

        let Json(response) = get_calling_list(State(state), Path("r-1".to_string()))
            .await
            .unwrap();

        assert_eq!(response.field_rep_id, "r-1");
        assert_eq!(response.territory, "north");
        assert_eq!(response.count, 1);
        assert_eq!(response.prospects[0].id, "p-1");
    }

    #[tokio::test]
    async fn test_status_webhook_creates_record() {
        let (_, _, state) = test_state();

        let callback: StatusCallback = serde_json::from_value(serde_json::json!({
            "CallSid": "CA1",
            "CallStatus": "ringing",
            "To": "+15550100"
        }))
        .unwrap();

        let Json(record) = status_webhook(
            State(state.clone()),
            Query(CallContext {
                prospect_id: Some("p-1".to_string()),
                caller_id: Some("u-1".to_string()),
            }),
            Json(callback),
        )
        .await
        .unwrap();

        assert_eq!(record.call_key, "CA1");
        assert_eq!(record.status, CallStatus::Ringing);
        assert_eq!(record.prospect_id.as_deref(), Some("p-1"));
    }

    #[tokio::test]
    async fn test_outcome_without_history_is_conflict() {
        let (_, _, state) = test_state();

        let result = post_outcome(
            State(state),
            Json(OutcomeRequest {
                prospect_id: "p-1".to_string(),
                caller_id: "u-1".to_string(),
                outcome: "Sale".to_string(),
                notes: None,
            }),
        )
        .await;

        let err = result.err().expect("outcome must fail without history");
        assert_eq!(StatusCode::from(err), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_outcome_validation() {
        let (_, _, state) = test_state();

        let result = post_outcome(
            State(state),
            Json(OutcomeRequest {
                prospect_id: String::new(),
                caller_id: "u-1".to_string(),
                outcome: "Sale".to_string(),
                notes: None,
            }),
        )
        .await;

        let err = result.err().expect("empty prospect_id must be rejected");
        assert_eq!(StatusCode::from(err), StatusCode::BAD_REQUEST);
    }
}
