use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::donations::domain::{DonationId, DonorId};
use crate::donations::repository::DonationStore;
use crate::donations::router::{self, donation_router};
use crate::donations::service::DonationLifecycleManager;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

#[tokio::test]
async fn create_route_completes_money_donation() {
    let harness = build_manager();
    let outbox = harness.outbox.clone();
    let app = donation_router(Arc::new(harness.manager));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/donations/donor/5",
            json!({
                "donationType": "MONEY",
                "amount": "500",
                "donor": { "id": 7, "name": "Ravi", "email": "ravi@example.org" }
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "COMPLETED");
    assert_eq!(payload["quantity"], "500");
    assert_eq!(payload["donor"]["id"], 5);
    assert_eq!(payload["ngo"], serde_json::Value::Null);
    assert_eq!(payload["completedAt"], payload["confirmedAt"]);
    assert_eq!(outbox.messages().len(), 1);
    assert_eq!(outbox.messages()[0].to, "asha@example.org");
}

#[tokio::test]
async fn create_route_maps_missing_ngo_to_not_found() {
    let harness = build_manager();
    let app = donation_router(Arc::new(harness.manager));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/donations/donor/5",
            json!({ "donationType": "FOOD", "foodName": "Rice", "ngo": { "id": 999 } }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "NGO not found");
    assert!(harness.store.is_empty());
}

#[tokio::test]
async fn create_handler_reports_unknown_donor() {
    let harness = build_manager();
    let manager = Arc::new(harness.manager);

    let response = router::create_handler(
        State(manager),
        Path(404),
        axum::Json(food_draft("Rice")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "Donor not found");
}

#[tokio::test]
async fn update_route_rejects_non_owner() {
    let harness = build_manager();
    let seeded = seed_owned_donation(&harness);
    let app = donation_router(Arc::new(harness.manager));

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/donations/9/donor/7",
            json!({ "donationType": "FOOD", "foodName": "Poha" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "Not allowed");
    let stored = harness
        .store
        .find_by_id(DonationId(9))
        .expect("lookup")
        .expect("present");
    assert_eq!(stored, seeded);
}

#[tokio::test]
async fn update_route_applies_owner_changes() {
    let harness = build_manager();
    seed_owned_donation(&harness);
    let app = donation_router(Arc::new(harness.manager));

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/donations/9/donor/3",
            json!({ "donationType": "FOOD", "foodName": "Poha", "quantity": 15 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["id"], 9);
    assert_eq!(payload["foodName"], "Poha");
    assert_eq!(payload["quantity"], "15");
    assert_eq!(payload["status"], "PENDING");
    assert_eq!(payload["ngo"]["ngoName"], "Annapurna Trust");
}

#[tokio::test]
async fn update_handler_reports_missing_donation() {
    let harness = build_manager();
    let manager = Arc::new(harness.manager);

    let response = router::update_handler(
        State(manager),
        Path((41, 3)),
        axum::Json(food_draft("Rice")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "Donation not found");
}

#[tokio::test]
async fn list_routes_filter_by_donor_and_ngo() {
    let harness = build_manager();
    harness
        .manager
        .create_donation(DonorId(5), with_ngo(food_draft("Rice"), 2))
        .expect("recorded");
    harness
        .manager
        .create_donation(DonorId(7), with_ngo(money_draft("900"), 4))
        .expect("recorded");
    let app = donation_router(Arc::new(harness.manager));

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/donations")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let all = read_json_body(response).await;
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/donations/donor/7")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let by_donor = read_json_body(response).await;
    assert_eq!(by_donor.as_array().map(Vec::len), Some(1));
    assert_eq!(by_donor[0]["donationType"], "MONEY");

    let response = app
        .oneshot(
            Request::get("/api/donations/ngo/2")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let by_ngo = read_json_body(response).await;
    assert_eq!(by_ngo.as_array().map(Vec::len), Some(1));
    assert_eq!(by_ngo[0]["foodName"], "Rice");
}

#[tokio::test]
async fn list_handler_maps_repository_failure_to_internal_error() {
    let directory = directory();
    let manager = Arc::new(DonationLifecycleManager::new(
        directory.clone(),
        directory,
        Arc::new(UnavailableStore),
        Arc::new(FailingNotifier),
    ));

    let response = router::list_handler(State(manager)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "repository unavailable: database offline");
}
