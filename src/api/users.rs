use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::database::MongoDB;
use crate::models::User;
use crate::services::user_service::{self, CreateUserOutcome};

#[derive(Debug, Deserialize)]
pub struct UserLookupQuery {
    pub email: Option<String>,
}

/// Body of the counter-increment endpoints; only the email is read,
/// any other fields the client sends along are ignored
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UserCounterRequest {
    pub email: String,
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_users(db: web::Data<MongoDB>) -> HttpResponse {
    match user_service::list_users(&db).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => e.to_response(),
    }
}

/// GET /user/queryUser?email= - single user lookup; null body when absent
pub async fn get_user(db: web::Data<MongoDB>, query: web::Query<UserLookupQuery>) -> HttpResponse {
    match user_service::find_user(&db, query.email.as_deref()).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "User created, or soft message when the email already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_user(db: web::Data<MongoDB>, body: web::Json<User>) -> HttpResponse {
    match user_service::create_user(&db, &body).await {
        Ok(CreateUserOutcome::Created { inserted_id }) => {
            log::info!("✅ User registered: {}", body.email);
            HttpResponse::Ok().json(serde_json::json!({
                "acknowledged": true,
                "insertedId": inserted_id,
            }))
        }
        // Duplicate email is a no-op from the caller's perspective
        Ok(CreateUserOutcome::AlreadyExists) => {
            HttpResponse::Ok().json(serde_json::json!({ "message": "User already exists" }))
        }
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    get,
    path = "/users/stats",
    tag = "Users",
    responses(
        (status = 200, description = "Aggregate totals; all zeroes when no users exist", body = user_service::UserStats),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_user_stats(db: web::Data<MongoDB>) -> HttpResponse {
    match user_service::user_stats(&db).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => e.to_response(),
    }
}

/// GET /users/sortQuery - top five users by query counter
pub async fn top_users_by_queries(db: web::Data<MongoDB>) -> HttpResponse {
    match user_service::top_users_by_queries(&db).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => e.to_response(),
    }
}

/// GET /users/sortRecommendations - top five users by recommendation counter
pub async fn top_users_by_recommendations(db: web::Data<MongoDB>) -> HttpResponse {
    match user_service::top_users_by_recommendations(&db).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/users",
    tag = "Users",
    request_body = UserCounterRequest,
    responses(
        (status = 200, description = "Recommendation counter incremented (upserts a bare row for unknown emails)"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn bump_recommendation_count(
    db: web::Data<MongoDB>,
    body: web::Json<UserCounterRequest>,
) -> HttpResponse {
    match user_service::bump_recommendation_count(&db, &body.email).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/users/query",
    tag = "Users",
    request_body = UserCounterRequest,
    responses(
        (status = 200, description = "Query counter incremented (upserts a bare row for unknown emails)"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn bump_query_count(
    db: web::Data<MongoDB>,
    body: web::Json<UserCounterRequest>,
) -> HttpResponse {
    match user_service::bump_query_count(&db, &body.email).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.to_response(),
    }
}
