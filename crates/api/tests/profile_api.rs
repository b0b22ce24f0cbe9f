//! HTTP-level integration tests for the profile endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, put_json_auth};
use jejum_api::auth::jwt::generate_access_token;
use jejum_db::models::user::CreateUser;
use jejum_db::repositories::UserRepo;
use sqlx::PgPool;

fn complete_ai_profile() -> serde_json::Value {
    serde_json::json!({
        "age": 34,
        "gender": "female",
        "activity_level": "moderate",
        "sleep_schedule": "23:00-07:00",
        "daily_routine": "office work, gym twice a week",
        "fasting_experience": "beginner",
    })
}

// ---------------------------------------------------------------------------
// GET /profile
// ---------------------------------------------------------------------------

/// The profile row is provisioned on signup, so GET returns 200 right away.
#[sqlx::test(migrations = "../../migrations")]
async fn test_get_profile_after_signup(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, user_id) = common::signup_user(app, "fresh@test.com").await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/profile", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], user_id);
    assert!(json["data"]["fasting_goal_hours"].is_null());
    assert!(json["data"]["ai_profile"].is_null());
    assert!(json["data"]["meal_preferences"].is_null());
}

/// A user created outside the signup flow has no profile row yet: 404.
#[sqlx::test(migrations = "../../migrations")]
async fn test_get_profile_unprovisioned_user(pool: PgPool) {
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            email: "raw@test.com".to_string(),
            password_hash: "irrelevant".to_string(),
            display_name: None,
        },
    )
    .await
    .expect("user creation should succeed");

    let config = common::test_config();
    let token = generate_access_token(user.id, &config.jwt).unwrap();

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/profile", &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// PUT /profile (partial update)
// ---------------------------------------------------------------------------

/// A partial update touches only the fields present in the body.
#[sqlx::test(migrations = "../../migrations")]
async fn test_partial_update(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::signup_user(app, "partial@test.com").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "fasting_goal_hours": 18.0 });
    let response = put_json_auth(app, "/api/v1/profile", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // A second update of another section must not clobber the goal.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "meal_preferences": { "diet_type": "vegetarian" } });
    let response = put_json_auth(app, "/api/v1/profile", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/profile", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["fasting_goal_hours"], 18.0);
    assert_eq!(json["data"]["meal_preferences"]["diet_type"], "vegetarian");
}

/// An invalid goal in the whole-document update is rejected with 400.
#[sqlx::test(migrations = "../../migrations")]
async fn test_partial_update_validates_goal(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::signup_user(app, "invalid@test.com").await;

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "fasting_goal_hours": -2.0 });
    let response = put_json_auth(app, "/api/v1/profile", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// PUT /profile/fasting-goal
// ---------------------------------------------------------------------------

/// The fasting goal can be set and later cleared with a null value.
#[sqlx::test(migrations = "../../migrations")]
async fn test_set_and_clear_fasting_goal(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::signup_user(app, "goalie@test.com").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "fasting_goal_hours": 16.0 });
    let response = put_json_auth(app, "/api/v1/profile/fasting-goal", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["fasting_goal_hours"], 16.0);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "fasting_goal_hours": null });
    let response = put_json_auth(app, "/api/v1/profile/fasting-goal", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["fasting_goal_hours"].is_null());
}

// ---------------------------------------------------------------------------
// PUT /profile/ai-profile
// ---------------------------------------------------------------------------

/// A complete AI profile is stored and returned on subsequent reads.
#[sqlx::test(migrations = "../../migrations")]
async fn test_update_ai_profile(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::signup_user(app, "lifestyle@test.com").await;

    let app = common::build_test_app(pool.clone());
    let response =
        put_json_auth(app, "/api/v1/profile/ai-profile", complete_ai_profile(), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/profile", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["ai_profile"]["age"], 34);
    assert_eq!(json["data"]["ai_profile"]["fasting_experience"], "beginner");
}

/// An AI profile with a blank field is rejected with 400.
#[sqlx::test(migrations = "../../migrations")]
async fn test_update_ai_profile_rejects_blank_field(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::signup_user(app, "blank@test.com").await;

    let mut profile = complete_ai_profile();
    profile["sleep_schedule"] = serde_json::json!("   ");

    let app = common::build_test_app(pool);
    let response = put_json_auth(app, "/api/v1/profile/ai-profile", profile, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// PUT /profile/meal-preferences
// ---------------------------------------------------------------------------

/// Valid preferences are stored; empty preferences are rejected.
#[sqlx::test(migrations = "../../migrations")]
async fn test_update_meal_preferences(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (token, _) = common::signup_user(app, "eater@test.com").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "diet_type": "vegan", "calorie_goal": 1900 });
    let response = put_json_auth(app, "/api/v1/profile/meal-preferences", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["meal_preferences"]["diet_type"], "vegan");
    assert_eq!(json["data"]["meal_preferences"]["calorie_goal"], 1900);

    let app = common::build_test_app(pool);
    let response =
        put_json_auth(app, "/api/v1/profile/meal-preferences", serde_json::json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
