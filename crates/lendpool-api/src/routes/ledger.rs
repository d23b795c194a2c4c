//! Ledger API Routes
//!
//! - GET /ledger/balance - Total deposited (settled)
//! - GET /ledger/borrow-balance - Total borrowed (settled)
//! - GET /ledger/pool - Pool summary
//! - GET /ledger/positions/:account - Settled and projected position
//! - GET /ledger/events?limit=N - Most recent journal entries
//! - POST /ledger/{deposit,withdraw,borrow,repay} - Mutating operations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lending::Operation;
use lendpool_core::LedgerError;

use crate::dto::{
    ApiError, BalanceResponse, BorrowBalanceResponse, EventsQuery, EventsResponse,
    OperationRequest, OperationResponse, PoolResponse, PositionResponse,
};
use crate::state::{parse_account, parse_amount};
use crate::AppState;

const DEFAULT_EVENTS_LIMIT: usize = 100;

type HandlerResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

/// Create ledger router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/balance", get(get_balance))
        .route("/borrow-balance", get(get_borrow_balance))
        .route("/pool", get(get_pool))
        .route("/positions/:account", get(get_position))
        .route("/events", get(get_events))
        .route("/deposit", post(deposit))
        .route("/withdraw", post(withdraw))
        .route("/borrow", post(borrow))
        .route("/repay", post(repay))
}

/// GET /ledger/balance
async fn get_balance(State(state): State<AppState>) -> Json<BalanceResponse> {
    Json(BalanceResponse {
        total_deposited: state.ledger().total_pool_balance().to_string(),
    })
}

/// GET /ledger/borrow-balance
async fn get_borrow_balance(State(state): State<AppState>) -> Json<BorrowBalanceResponse> {
    Json(BorrowBalanceResponse {
        total_borrowed: state.ledger().total_borrow_balance().to_string(),
    })
}

/// GET /ledger/pool
async fn get_pool(State(state): State<AppState>) -> Json<PoolResponse> {
    Json(state.ledger().snapshot().into())
}

/// GET /ledger/positions/:account
async fn get_position(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> HandlerResult<PositionResponse> {
    let account = parse_account(&account).map_err(bad_request)?;
    let ledger = state.ledger();
    let settled = ledger.position(&account);
    let projected = ledger
        .projected_position(&account)
        .map_err(|e| ledger_error(&e))?;

    Ok(Json(PositionResponse {
        account: account.to_string(),
        settled: settled.into(),
        projected: projected.into(),
    }))
}

/// GET /ledger/events
async fn get_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Json<EventsResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_EVENTS_LIMIT);
    Json(EventsResponse {
        events: state
            .ledger()
            .recent_events(limit)
            .into_iter()
            .map(Into::into)
            .collect(),
    })
}

async fn deposit(
    State(state): State<AppState>,
    Json(request): Json<OperationRequest>,
) -> HandlerResult<OperationResponse> {
    execute(&state, Operation::Deposit, request)
}

async fn withdraw(
    State(state): State<AppState>,
    Json(request): Json<OperationRequest>,
) -> HandlerResult<OperationResponse> {
    execute(&state, Operation::Withdraw, request)
}

async fn borrow(
    State(state): State<AppState>,
    Json(request): Json<OperationRequest>,
) -> HandlerResult<OperationResponse> {
    execute(&state, Operation::Borrow, request)
}

async fn repay(
    State(state): State<AppState>,
    Json(request): Json<OperationRequest>,
) -> HandlerResult<OperationResponse> {
    execute(&state, Operation::Repay, request)
}

/// Run one ledger operation for the calling account
fn execute(
    state: &AppState,
    operation: Operation,
    request: OperationRequest,
) -> HandlerResult<OperationResponse> {
    let account = parse_account(&request.account).map_err(bad_request)?;
    let amount = parse_amount(&request.amount).map_err(bad_request)?;

    let ledger = state.ledger();
    let result = match operation {
        Operation::Deposit => ledger.deposit(&account, amount),
        Operation::Withdraw => ledger.withdraw(&account, amount),
        Operation::Borrow => ledger.borrow(&account, amount),
        Operation::Repay => ledger.repay(&account, amount),
    };

    let position = result.map_err(|e| {
        tracing::warn!(
            operation = %operation,
            account = %account,
            amount = %amount,
            error = %e,
            "Ledger operation failed"
        );
        ledger_error(&e)
    })?;

    Ok(Json(OperationResponse {
        operation: operation.to_string(),
        account: account.to_string(),
        amount: amount.to_string(),
        position: position.into(),
    }))
}

pub(crate) fn bad_request(err: crate::state::ApiError) -> (StatusCode, Json<ApiError>) {
    (StatusCode::BAD_REQUEST, Json(ApiError::bad_request(err.to_string())))
}

fn ledger_error(err: &LedgerError) -> (StatusCode, Json<ApiError>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err.into()))
}
