//! Health check endpoint

use axum::{extract::State, Json};

use crate::dto::HealthResponse;
use crate::AppState;

/// GET /health - Liveness plus which pool this instance serves
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let ledger = state.ledger();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        pool_account: ledger.pool_account().to_string(),
        token_symbol: ledger.token_symbol().to_string(),
    })
}
