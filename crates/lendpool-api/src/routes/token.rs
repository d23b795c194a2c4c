//! Token wallet endpoints used by the caller layer before deposit/repay

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lending::TokenTransfer;
use lendpool_core::Amount;

use crate::dto::{ApiError, ApproveRequest, TokenBalanceResponse};
use crate::routes::ledger::bad_request;
use crate::state::{parse_account, parse_amount};
use crate::AppState;

/// Create token routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/balance/:account", get(get_balance))
        .route("/approve", post(approve))
}

/// GET /token/balance/:account
async fn get_balance(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> Result<Json<TokenBalanceResponse>, (StatusCode, Json<ApiError>)> {
    let account = parse_account(&account).map_err(bad_request)?;
    Ok(Json(balance_response(&state, &account)))
}

/// POST /token/approve - Let the pool pull tokens from `owner`
async fn approve(
    State(state): State<AppState>,
    Json(request): Json<ApproveRequest>,
) -> Result<Json<TokenBalanceResponse>, (StatusCode, Json<ApiError>)> {
    let owner = parse_account(&request.owner).map_err(bad_request)?;
    let amount = if request.amount.trim().eq_ignore_ascii_case("max") {
        Amount::MAX
    } else {
        parse_amount(&request.amount).map_err(bad_request)?
    };

    let pool = state.ledger().pool_account();
    state.token().approve(&owner, pool, amount);
    tracing::info!(owner = %owner, spender = %pool, amount = %amount, "Approved pool allowance");

    Ok(Json(balance_response(&state, &owner)))
}

fn balance_response(state: &AppState, account: &lendpool_core::AccountId) -> TokenBalanceResponse {
    let token = state.token();
    TokenBalanceResponse {
        account: account.to_string(),
        name: token.name().to_string(),
        symbol: token.symbol().to_string(),
        decimals: token.decimals(),
        balance: token.balance_of(account).to_string(),
        pool_allowance: token
            .allowance(account, state.ledger().pool_account())
            .to_string(),
    }
}
