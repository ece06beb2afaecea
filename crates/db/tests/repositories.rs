//! Repository integration tests against a real database.
//!
//! Covers the queries whose behaviour lives in SQL rather than Rust:
//! - ordered bulk insert with conflict skipping
//! - `approved_at` preservation across status changes
//! - idempotent subscription
//! - capacity-checked registration

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use memorial_core::candle::CandleStatus;
use memorial_core::types::{DbId, Timestamp};
use memorial_db::models::candle::CreateCandle;
use memorial_db::models::commemoration::{CreateCommemoration, CreateRegistration};
use memorial_db::repositories::{
    CandleRepo, CommemorationRepo, ForbiddenWordRepo, RegistrationOutcome, RegistrationRepo,
    SubscriberRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn at(day: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn new_candle() -> CreateCandle {
    CreateCandle {
        writer_name: "דנה".to_string(),
        text: "תודה על הכל".to_string(),
        created_at: at(1),
    }
}

fn new_commemoration(capacity: Option<i32>) -> CreateCommemoration {
    CreateCommemoration {
        title: "Memorial evening".to_string(),
        description: String::new(),
        location: "Community hall".to_string(),
        starts_at: at(20),
        capacity,
    }
}

fn new_registration(name: &str, participants: i32) -> CreateRegistration {
    CreateRegistration {
        full_name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        participants,
    }
}

// ---------------------------------------------------------------------------
// Forbidden words
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_add_many_keeps_input_order(pool: PgPool) {
    let added = ForbiddenWordRepo::add_many(&pool, &words(&["zeta", "alpha", "mid"]))
        .await
        .unwrap();
    let added: Vec<&str> = added.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(added, ["zeta", "alpha", "mid"]);

    let listed = ForbiddenWordRepo::list(&pool).await.unwrap();
    let listed: Vec<&str> = listed.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(listed, ["zeta", "alpha", "mid"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_many_returns_only_new_words(pool: PgPool) {
    ForbiddenWordRepo::add_many(&pool, &words(&["one", "two"]))
        .await
        .unwrap();

    let added = ForbiddenWordRepo::add_many(&pool, &words(&["two", "three", "one"]))
        .await
        .unwrap();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].word, "three");

    let listed = ForbiddenWordRepo::list(&pool).await.unwrap();
    let listed: Vec<&str> = listed.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(listed, ["one", "two", "three"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_many_with_empty_input_is_a_no_op(pool: PgPool) {
    let added = ForbiddenWordRepo::add_many(&pool, &[]).await.unwrap();
    assert!(added.is_empty());
    assert!(ForbiddenWordRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_forbidden_word(pool: PgPool) {
    let added = ForbiddenWordRepo::add_many(&pool, &words(&["gone"]))
        .await
        .unwrap();

    assert!(ForbiddenWordRepo::delete(&pool, added[0].id).await.unwrap());
    assert!(!ForbiddenWordRepo::delete(&pool, added[0].id).await.unwrap());
    assert!(ForbiddenWordRepo::list(&pool).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Candles
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_created_candle_is_pending(pool: PgPool) {
    let candle = CandleRepo::create(&pool, &new_candle()).await.unwrap();
    assert_eq!(candle.status, CandleStatus::Pending);
    assert_eq!(candle.created_at, at(1));
    assert!(candle.approved_at.is_none());
    assert!(candle.prompt_message_id.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_report_keeps_original_approval_time(pool: PgPool) {
    let candle = CandleRepo::create(&pool, &new_candle()).await.unwrap();

    let approved = CandleRepo::update_status(&pool, candle.id, CandleStatus::Approved, Some(at(2)))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(approved.approved_at, Some(at(2)));

    let reported = CandleRepo::update_status(&pool, candle.id, CandleStatus::Reported, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reported.status, CandleStatus::Reported);
    assert_eq!(reported.approved_at, Some(at(2)));

    let reapproved =
        CandleRepo::update_status(&pool, candle.id, CandleStatus::Approved, Some(at(3)))
            .await
            .unwrap()
            .unwrap();
    assert_eq!(reapproved.approved_at, Some(at(3)));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_status_of_missing_candle_is_none(pool: PgPool) {
    let updated = CandleRepo::update_status(&pool, DbId::new_v4(), CandleStatus::Approved, None)
        .await
        .unwrap();
    assert!(updated.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_prompt_location_and_delete(pool: PgPool) {
    let candle = CandleRepo::create(&pool, &new_candle()).await.unwrap();

    CandleRepo::set_prompt(&pool, candle.id, -100, 42).await.unwrap();
    let stored = CandleRepo::find_by_id(&pool, candle.id).await.unwrap().unwrap();
    assert_eq!(stored.prompt_chat_id, Some(-100));
    assert_eq!(stored.prompt_message_id, Some(42));

    assert!(CandleRepo::delete(&pool, candle.id).await.unwrap());
    assert!(!CandleRepo::delete(&pool, candle.id).await.unwrap());
    assert!(CandleRepo::find_by_id(&pool, candle.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_by_status_filters(pool: PgPool) {
    let pending = CandleRepo::create(&pool, &new_candle()).await.unwrap();
    let approved = CandleRepo::create(&pool, &new_candle()).await.unwrap();
    CandleRepo::update_status(&pool, approved.id, CandleStatus::Approved, Some(at(2)))
        .await
        .unwrap();

    let listed = CandleRepo::list_by_status(&pool, CandleStatus::Pending, 50, 0)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, pending.id);

    let listed = CandleRepo::list_by_status(&pool, CandleStatus::Approved, 50, 0)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, approved.id);
}

// ---------------------------------------------------------------------------
// Subscribers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_subscribe_is_idempotent(pool: PgPool) {
    let (first, created) = SubscriberRepo::subscribe(&pool, "a@example.com").await.unwrap();
    assert!(created);

    let (second, created) = SubscriberRepo::subscribe(&pool, "a@example.com").await.unwrap();
    assert!(!created);
    assert_eq!(second.id, first.id);
    assert_eq!(second.unsubscribe_token, first.unsubscribe_token);

    assert_eq!(SubscriberRepo::list_all(&pool).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unsubscribe_by_token(pool: PgPool) {
    let (subscriber, _) = SubscriberRepo::subscribe(&pool, "b@example.com").await.unwrap();

    assert!(!SubscriberRepo::unsubscribe(&pool, DbId::new_v4()).await.unwrap());
    assert!(SubscriberRepo::unsubscribe(&pool, subscriber.unsubscribe_token)
        .await
        .unwrap());
    assert!(SubscriberRepo::list_all(&pool).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Registrations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_registration_respects_capacity(pool: PgPool) {
    let event = CommemorationRepo::create(&pool, &new_commemoration(Some(5)))
        .await
        .unwrap();

    let outcome = RegistrationRepo::create_checked(&pool, event.id, &new_registration("Noa", 3))
        .await
        .unwrap();
    assert_matches!(outcome, RegistrationOutcome::Registered(r) if r.participants == 3);

    let outcome = RegistrationRepo::create_checked(&pool, event.id, &new_registration("Ori", 3))
        .await
        .unwrap();
    assert_matches!(outcome, RegistrationOutcome::Full(reason) if reason == "Only 2 places left");

    let outcome = RegistrationRepo::create_checked(&pool, event.id, &new_registration("Ori", 2))
        .await
        .unwrap();
    assert_matches!(outcome, RegistrationOutcome::Registered(_));

    let registrations = RegistrationRepo::list_for_commemoration(&pool, event.id)
        .await
        .unwrap();
    assert_eq!(registrations.len(), 2);

    let upcoming = CommemorationRepo::list_upcoming(&pool, at(1)).await.unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].registered_participants, 5);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_registration_without_capacity_is_unbounded(pool: PgPool) {
    let event = CommemorationRepo::create(&pool, &new_commemoration(None))
        .await
        .unwrap();

    for i in 0..3 {
        let outcome =
            RegistrationRepo::create_checked(&pool, event.id, &new_registration(&format!("P{i}"), 10))
                .await
                .unwrap();
        assert_matches!(outcome, RegistrationOutcome::Registered(_));
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_registration_for_missing_commemoration(pool: PgPool) {
    let outcome =
        RegistrationRepo::create_checked(&pool, DbId::new_v4(), &new_registration("Noa", 1))
            .await
            .unwrap();
    assert_matches!(outcome, RegistrationOutcome::CommemorationNotFound);
}
