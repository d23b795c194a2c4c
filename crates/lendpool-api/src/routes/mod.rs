//! API route handlers

pub mod health;
pub mod ledger;
pub mod token;

use axum::{routing::get, Router};

use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/ledger", ledger::router())
        .nest("/token", token::router())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use lending::{InMemoryToken, Ledger, ManualClock, TokenTransfer};
    use lendpool_core::constants::SECONDS_PER_YEAR;
    use lendpool_core::{tokens, AccountId, Amount, AppConfig};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    struct Harness {
        state: AppState,
        clock: Arc<ManualClock>,
    }

    fn harness() -> Harness {
        let config = AppConfig::default();
        let deployer = config.provisioning.deployer.clone();
        let token = Arc::new(
            InMemoryToken::with_initial_supply("Mock Token", "MTK", &deployer, tokens(1_000_000))
                .unwrap(),
        );
        for user in ["user1", "user2"] {
            token
                .transfer(&deployer, &AccountId::new(user), tokens(10_000))
                .unwrap();
        }

        let clock = Arc::new(ManualClock::new(1_700_000_000));
        let ledger = Arc::new(
            Ledger::from_config(token.clone(), &config.ledger).with_clock(clock.clone()),
        );
        Harness {
            state: AppState::new(ledger, token),
            clock,
        }
    }

    async fn call(state: &AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = create_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn approve_max(state: &AppState, owner: &str) {
        let (status, _) = call(
            state,
            Method::POST,
            "/token/approve",
            Some(json!({ "owner": owner, "amount": "max" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health() {
        let h = harness();
        let (status, body) = call(&h.state, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["pool_account"], "lendpool");
        assert_eq!(body["token_symbol"], "MTK");
    }

    #[tokio::test]
    async fn test_deposit_and_balance() {
        let h = harness();
        approve_max(&h.state, "user1").await;

        let (status, body) = call(
            &h.state,
            Method::POST,
            "/ledger/deposit",
            Some(json!({ "account": "user1", "amount": tokens(1000).to_string() })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["operation"], "Deposit");
        assert_eq!(body["position"]["deposit_balance"], tokens(1000).to_string());

        let (_, body) = call(&h.state, Method::GET, "/ledger/balance", None).await;
        assert_eq!(body["total_deposited"], tokens(1000).to_string());

        let (_, body) = call(&h.state, Method::GET, "/token/balance/user1", None).await;
        assert_eq!(body["balance"], tokens(9000).to_string());
        assert_eq!(body["decimals"], 18);
        assert_eq!(body["pool_allowance"], Amount::MAX.to_string());
    }

    #[tokio::test]
    async fn test_withdraw_returns_tokens() {
        let h = harness();
        approve_max(&h.state, "user1").await;
        call(
            &h.state,
            Method::POST,
            "/ledger/deposit",
            Some(json!({ "account": "user1", "amount": tokens(1000).to_string() })),
        )
        .await;

        let (status, body) = call(
            &h.state,
            Method::POST,
            "/ledger/withdraw",
            Some(json!({ "account": "user1", "amount": tokens(400).to_string() })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["operation"], "Withdraw");
        assert_eq!(body["position"]["deposit_balance"], tokens(600).to_string());

        let (_, body) = call(&h.state, Method::GET, "/ledger/balance", None).await;
        assert_eq!(body["total_deposited"], tokens(600).to_string());

        let (_, body) = call(&h.state, Method::GET, "/token/balance/user1", None).await;
        assert_eq!(body["balance"], tokens(9400).to_string());

        let (status, body) = call(
            &h.state,
            Method::POST,
            "/ledger/withdraw",
            Some(json!({ "account": "user1", "amount": tokens(601).to_string() })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "insufficient_balance");
    }

    #[tokio::test]
    async fn test_deposit_without_approval_is_transfer_failure() {
        let h = harness();
        let (status, body) = call(
            &h.state,
            Method::POST,
            "/ledger/deposit",
            Some(json!({ "account": "user1", "amount": "100" })),
        )
        .await;
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body["code"], "transfer_failure");
    }

    #[tokio::test]
    async fn test_zero_amount_rejected() {
        let h = harness();
        let (status, body) = call(
            &h.state,
            Method::POST,
            "/ledger/borrow",
            Some(json!({ "account": "user2", "amount": "0" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_amount");
        assert_eq!(body["message"], "Borrow amount must be greater than 0");
    }

    #[tokio::test]
    async fn test_malformed_amount_rejected() {
        let h = harness();
        let (status, body) = call(
            &h.state,
            Method::POST,
            "/ledger/deposit",
            Some(json!({ "account": "user1", "amount": "ten" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");
    }

    #[tokio::test]
    async fn test_borrow_over_liquidity() {
        let h = harness();
        approve_max(&h.state, "user1").await;
        call(
            &h.state,
            Method::POST,
            "/ledger/deposit",
            Some(json!({ "account": "user1", "amount": tokens(1000).to_string() })),
        )
        .await;

        let (status, body) = call(
            &h.state,
            Method::POST,
            "/ledger/borrow",
            Some(json!({ "account": "user2", "amount": tokens(1001).to_string() })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "insufficient_liquidity");
    }

    #[tokio::test]
    async fn test_position_projection_and_events() {
        let h = harness();
        approve_max(&h.state, "user1").await;
        approve_max(&h.state, "user2").await;
        call(
            &h.state,
            Method::POST,
            "/ledger/deposit",
            Some(json!({ "account": "user1", "amount": tokens(1000).to_string() })),
        )
        .await;
        call(
            &h.state,
            Method::POST,
            "/ledger/borrow",
            Some(json!({ "account": "user2", "amount": tokens(500).to_string() })),
        )
        .await;

        h.clock.advance(SECONDS_PER_YEAR);

        let (status, body) = call(&h.state, Method::GET, "/ledger/positions/user2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["settled"]["borrow_balance"], tokens(500).to_string());
        assert_eq!(body["projected"]["borrow_balance"], tokens(525).to_string());

        let (status, _) = call(
            &h.state,
            Method::POST,
            "/ledger/repay",
            Some(json!({ "account": "user2", "amount": "1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = call(&h.state, Method::GET, "/ledger/borrow-balance", None).await;
        assert_eq!(body["total_borrowed"], (tokens(525) - 1).to_string());

        let (_, body) = call(&h.state, Method::GET, "/ledger/events", None).await;
        let events = body["events"].as_array().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[2]["operation"], "Repay");
        assert_eq!(events[2]["amount"], "1");

        let (_, body) = call(&h.state, Method::GET, "/ledger/events?limit=1", None).await;
        let events = body["events"].as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["sequence"], 2);
        assert_eq!(events[0]["operation"], "Repay");

        let (_, body) = call(&h.state, Method::GET, "/ledger/pool", None).await;
        assert_eq!(body["token_symbol"], "MTK");
        assert_eq!(body["annual_rate_bps"], "500");
        assert_eq!(body["account_count"], 2);
    }

    #[tokio::test]
    async fn test_invalid_account_path() {
        let h = harness();
        let (status, body) =
            call(&h.state, Method::GET, "/ledger/positions/bad%20account", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");
    }
}
