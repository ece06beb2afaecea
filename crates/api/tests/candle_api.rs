//! Integration tests for public candle submission, listing and reporting.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, get, post_json, NotifierCall, MODERATOR_CHAT};
use memorial_core::candle::CandleStatus;
use memorial_core::prompt::{PromptFraming, PromptHandle, RESULT_SUPERSEDED};
use memorial_core::types::DbId;
use memorial_db::store::ForbiddenWordStore;
use serde_json::json;

fn submission(writer_name: &str, text: &str) -> serde_json::Value {
    json!({
        "writerName": writer_name,
        "text": text,
        "createdAt": "2024-01-01T00:00:00Z",
    })
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submitted_candle_is_pending_and_prompted() {
    let app = common::build_test_app();

    let response = post_json(app.router(), "/api/v1/candles", submission("דנה", "תודה על הכל")).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["success"], true);
    let id: DbId = json["data"]["candleId"].as_str().unwrap().parse().unwrap();

    let candle = app.find_candle(id).await.expect("candle stored");
    assert_eq!(candle.status, CandleStatus::Pending);
    assert_eq!(candle.writer_name, "דנה");
    assert_eq!(candle.text, "תודה על הכל");
    assert!(candle.approved_at.is_none());
    assert_eq!(candle.created_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");

    assert_eq!(app.notifier.posted(), vec![(id, PromptFraming::New)]);
    assert_eq!(candle.prompt_message_id, Some(1));
}

#[tokio::test]
async fn submission_fields_are_trimmed() {
    let app = common::build_test_app();

    let response = post_json(app.router(), "/api/v1/candles", submission("  דנה ", "\tזוכרים\n")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id: DbId = body_json(response).await["data"]["candleId"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    let candle = app.find_candle(id).await.unwrap();
    assert_eq!(candle.writer_name, "דנה");
    assert_eq!(candle.text, "זוכרים");
}

#[tokio::test]
async fn blocked_submission_creates_nothing_and_names_the_word() {
    let app = common::build_test_app();
    app.words.add(&["שלום".to_string()]).await.unwrap();

    let response = post_json(
        app.router(),
        "/api/v1/candles",
        submission("דנה", "אמרתי שלום לכולם"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "FAILED_PRECONDITION");
    assert_eq!(json["word"], "שלום");
    assert_eq!(json["field"], "text");

    assert!(app.candles.is_empty().await);
    assert!(app.notifier.calls().is_empty());
}

#[tokio::test]
async fn forbidden_word_inside_longer_token_is_allowed() {
    let app = common::build_test_app();
    app.words.add(&["שלום".to_string()]).await.unwrap();

    let response = post_json(app.router(), "/api/v1/candles", submission("דנה", "שלומית בסדר")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(app.candles.len().await, 1);
}

#[tokio::test]
async fn forbidden_word_in_writer_name_is_blocked() {
    let app = common::build_test_app();
    app.words.add(&["spam".to_string()]).await.unwrap();

    let response = post_json(app.router(), "/api/v1/candles", submission("SPAM bot", "hello")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["field"], "writerName");
    assert!(app.candles.is_empty().await);
}

#[tokio::test]
async fn missing_fields_are_validation_errors() {
    let app = common::build_test_app();

    let response = post_json(app.router(), "/api/v1/candles", json!({ "text": "hi" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json(app.router(), "/api/v1/candles", submission("דנה", "   ")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(app.candles.is_empty().await);
}

#[tokio::test]
async fn overlong_text_is_rejected() {
    let app = common::build_test_app();
    let text = "א".repeat(257);

    let response = post_json(app.router(), "/api/v1/candles", submission("דנה", &text)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.candles.is_empty().await);
}

#[tokio::test]
async fn invalid_created_at_is_rejected() {
    let app = common::build_test_app();
    let body = json!({ "writerName": "דנה", "text": "זוכרים", "createdAt": "yesterday" });

    let response = post_json(app.router(), "/api/v1/candles", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn public_list_shows_only_approved_candles() {
    let app = common::build_test_app();
    let approved = app.seed_candle(CandleStatus::Approved).await;
    app.seed_candle(CandleStatus::Pending).await;
    app.seed_candle(CandleStatus::Reported).await;

    let response = get(app.router(), "/api/v1/candles").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], approved.id.to_string());
    assert_eq!(items[0]["status"], "Approved");
    assert!(items[0].get("promptMessageId").is_none());
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reporting_approved_candle_marks_it_and_sends_urgent_prompt() {
    let app = common::build_test_app();
    let candle = app.seed_candle(CandleStatus::Approved).await;

    let uri = format!("/api/v1/candles/{}/report", candle.id);
    let response = post_json(app.router(), &uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["success"], true);

    let stored = app.find_candle(candle.id).await.unwrap();
    assert_eq!(stored.status, CandleStatus::Reported);
    assert_eq!(app.notifier.posted(), vec![(candle.id, PromptFraming::Reported)]);
    assert!(app.notifier.resolved_texts().is_empty());
}

#[tokio::test]
async fn reporting_pending_candle_is_rejected() {
    let app = common::build_test_app();
    let candle = app.seed_candle(CandleStatus::Pending).await;

    let uri = format!("/api/v1/candles/{}/report", candle.id);
    let response = post_json(app.router(), &uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let stored = app.find_candle(candle.id).await.unwrap();
    assert_eq!(stored.status, CandleStatus::Pending);
    assert!(app.notifier.calls().is_empty());
}

#[tokio::test]
async fn repeated_reports_notify_each_time() {
    let app = common::build_test_app();
    let candle = app.seed_candle(CandleStatus::Approved).await;
    let uri = format!("/api/v1/candles/{}/report", candle.id);

    for _ in 0..2 {
        let response = post_json(app.router(), &uri, json!({})).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
    assert_eq!(app.notifier.posted().len(), 2);
}

#[tokio::test]
async fn repeat_report_retires_the_earlier_prompt() {
    let app = common::build_test_app();
    let candle = app.seed_candle(CandleStatus::Approved).await;
    let uri = format!("/api/v1/candles/{}/report", candle.id);

    for _ in 0..2 {
        let response = post_json(app.router(), &uri, json!({})).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = post_json(
        app.router(),
        "/api/v1/admin/candles/moderate",
        json!({
            "candleId": candle.id.to_string(),
            "action": "approve",
            "adminToken": admin_token(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let first = PromptHandle {
        chat_id: MODERATOR_CHAT,
        message_id: 1,
    };
    let resolved: Vec<(PromptHandle, String)> = app
        .notifier
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            NotifierCall::Resolved { handle, text, .. } => Some((handle, text)),
            _ => None,
        })
        .collect();

    assert_eq!(resolved.len(), 2, "{resolved:?}");
    assert_eq!(resolved[0].0, first);
    assert!(resolved[0].1.ends_with(RESULT_SUPERSEDED), "{}", resolved[0].1);
    assert_ne!(resolved[1].0, first);
    assert!(
        resolved[1].1.ends_with("Report resolved: approved"),
        "{}",
        resolved[1].1
    );
    assert!(app.notifier.live_prompts().is_empty());
}

#[tokio::test]
async fn reporting_unknown_candle_is_not_found() {
    let app = common::build_test_app();
    let uri = format!("/api/v1/candles/{}/report", DbId::new_v4());

    let response = post_json(app.router(), &uri, json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
