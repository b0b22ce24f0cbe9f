//! Integration tests for users, sessions, and profile provisioning.

use chrono::{Duration, Utc};
use jejum_db::models::profile::UpdateProfile;
use jejum_db::models::session::CreateSession;
use jejum_db::models::user::CreateUser;
use jejum_db::repositories::{ProfileRepo, SessionRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password_hash: "$argon2id$test".to_string(),
        display_name: Some("Tester".to_string()),
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_duplicate_email_violates_unique_constraint(pool: PgPool) {
    UserRepo::create(&pool, &new_user("dup@example.com")).await.unwrap();
    let err = UserRepo::create(&pool, &new_user("dup@example.com"))
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db) => {
            assert_eq!(db.code().as_deref(), Some("23505"));
            assert!(db.constraint().is_some_and(|c| c.starts_with("uq_")));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_failed_login_counter_and_lockout(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("lockout@example.com"))
        .await
        .unwrap();
    assert!(user.is_active);
    assert_eq!(user.failed_login_count, 0);
    assert!(!user.is_locked(Utc::now()));

    assert_eq!(UserRepo::increment_failed_login(&pool, user.id).await.unwrap(), 1);
    assert_eq!(UserRepo::increment_failed_login(&pool, user.id).await.unwrap(), 2);

    UserRepo::lock_account(&pool, user.id, Utc::now() + Duration::minutes(15))
        .await
        .unwrap();
    let locked = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(locked.is_locked(Utc::now()));
    // Locking resets the counter for the next window.
    assert_eq!(locked.failed_login_count, 0);

    UserRepo::record_successful_login(&pool, user.id).await.unwrap();
    let cleared = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(!cleared.is_locked(Utc::now()));
    assert!(cleared.last_login_at.is_some());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_ensure_profile_is_idempotent(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("profile@example.com"))
        .await
        .unwrap();

    let first = ProfileRepo::ensure_exists(&pool, user.id).await.unwrap();
    let second = ProfileRepo::ensure_exists(&pool, user.id).await.unwrap();
    assert_eq!(first.id, second.id);
    assert!(first.fasting_goal_hours.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_profile_partial_update(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("goal@example.com"))
        .await
        .unwrap();
    ProfileRepo::ensure_exists(&pool, user.id).await.unwrap();

    let updated = ProfileRepo::update(
        &pool,
        user.id,
        &UpdateProfile {
            fasting_goal_hours: Some(16.0),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("profile exists");
    assert_eq!(updated.fasting_goal_hours, Some(16.0));

    // Updating another field leaves the goal untouched.
    let updated = ProfileRepo::update(
        &pool,
        user.id,
        &UpdateProfile {
            meal_preferences: Some(json!({"diet_type": "vegetarian"})),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.fasting_goal_hours, Some(16.0));
    assert!(updated.meal_preferences.is_some());

    assert!(ProfileRepo::clear_fasting_goal(&pool, user.id).await.unwrap());
    let profile = ProfileRepo::find_by_user(&pool, user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(profile.fasting_goal_hours.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_session_revocation_and_lookup(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("session@example.com"))
        .await
        .unwrap();

    let session = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "abc123".to_string(),
            expires_at: Utc::now() + Duration::days(7),
            user_agent: None,
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "abc123")
        .await
        .unwrap()
        .is_some());

    assert!(SessionRepo::revoke(&pool, session.id).await.unwrap());
    // Revoked sessions are invisible to the lookup.
    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "abc123")
        .await
        .unwrap()
        .is_none());
    // Second revoke is a no-op.
    assert!(!SessionRepo::revoke(&pool, session.id).await.unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_expired_sessions_are_invisible_and_cleanable(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("expired@example.com"))
        .await
        .unwrap();

    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "expired".to_string(),
            expires_at: Utc::now() - Duration::hours(1),
            user_agent: None,
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_by_refresh_token_hash(&pool, "expired")
        .await
        .unwrap()
        .is_none());
    assert_eq!(SessionRepo::cleanup_expired(&pool).await.unwrap(), 1);
}
