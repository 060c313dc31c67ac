use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::eligibility::router::{check_loan_handler, eligibility_router};

fn scenario_json() -> serde_json::Value {
    json!({
        "credit_score": 620,
        "annual_income": 80000,
        "is_first_time_buyer": true,
        "loan_amount": 300000,
        "property_value": 350000,
        "loan_term_years": 30,
        "monthly_debt_payments": 400,
        "property_type": "single_family",
        "property_state": "TX",
        "property_county": "Harris",
        "occupancy": "primary"
    })
}

fn post_json(body: &serde_json::Value) -> Request<Body> {
    Request::post("/api/v1/check-loan")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serializes")))
        .expect("request builds")
}

#[tokio::test]
async fn check_loan_route_returns_report() {
    let router = eligibility_router(service());

    let response = router
        .oneshot(post_json(&scenario_json()))
        .await
        .expect("router responds");
    let (status, body) = json_body(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"][0]["eligible"], true);
    assert_eq!(body["products"][1]["eligible"], false);
    assert_eq!(
        body["products"][1]["violations"][0]["rule_name"],
        "min_credit_score"
    );
    assert_eq!(
        body["fix_suggestions"][0]["description"],
        "Improve credit score to 660+"
    );
    assert!(body["area_income_limit"].is_null());
}

#[tokio::test]
async fn check_loan_route_defaults_term_and_occupancy() {
    let router = eligibility_router(service());
    let mut payload = scenario_json();
    let object = payload.as_object_mut().expect("object payload");
    object.remove("loan_term_years");
    object.remove("occupancy");

    let response = router
        .oneshot(post_json(&payload))
        .await
        .expect("router responds");
    let (status, body) = json_body(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["scenario"]["loan_term_years"], 30);
    assert_eq!(body["scenario"]["occupancy"], "primary");
}

#[tokio::test]
async fn check_loan_route_rejects_unknown_term() {
    let router = eligibility_router(service());
    let mut payload = scenario_json();
    payload["loan_term_years"] = json!(25);

    let response = router
        .oneshot(post_json(&payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn check_loan_handler_returns_issues_for_rejected_scenario() {
    let mut input = scenario();
    input.loan_amount = 5_000.0;

    let response = check_loan_handler(State(service()), axum::Json(input)).await;
    let (status, body) = json_body(response).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["issues"][0]["field"], "loan_amount");
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .starts_with("scenario rejected"));
}

#[tokio::test]
async fn rules_route_exposes_rule_book() {
    let router = eligibility_router(service());

    let response = router
        .oneshot(
            Request::get("/api/v1/rules")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    let (status, body) = json_body(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["home_ready"]["product"], "HomeReady");
    assert_eq!(body["home_ready"]["rules"][0]["threshold"]["score"], 620);
    assert_eq!(body["home_possible"]["rules"][1]["citation"], "Freddie Mac Guide 4501.5, 5401.2");
}
