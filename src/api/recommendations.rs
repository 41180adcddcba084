use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::database::MongoDB;
use crate::models::Recommendation;
use crate::services::recommendation_service;
use crate::services::session_service::Claims;

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub email: Option<String>,
}

/// GET /recommendations?email= - recommendations received on the caller's
/// queries; the authenticated identity must match the requested email
pub async fn get_recommendations(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    query: web::Query<OwnerQuery>,
) -> HttpResponse {
    if query.email.as_deref() != Some(user.email.as_str()) {
        return HttpResponse::Forbidden()
            .json(serde_json::json!({ "message": "forbidden access" }));
    }

    match recommendation_service::recommendations_for_owner(&db, &user.email).await {
        Ok(recommendations) => HttpResponse::Ok().json(recommendations),
        Err(e) => e.to_response(),
    }
}

/// GET /recommendations/myRecommendations?email= - recommendations the
/// caller has made; same identity check
pub async fn get_my_recommendations(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    query: web::Query<OwnerQuery>,
) -> HttpResponse {
    if query.email.as_deref() != Some(user.email.as_str()) {
        return HttpResponse::Forbidden()
            .json(serde_json::json!({ "message": "forbidden access" }));
    }

    match recommendation_service::recommendations_by_author(&db, &user.email).await {
        Ok(recommendations) => HttpResponse::Ok().json(recommendations),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    post,
    path = "/recommendations",
    tag = "Recommendations",
    responses(
        (status = 200, description = "Recommendation created"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_recommendation(
    db: web::Data<MongoDB>,
    body: web::Json<Recommendation>,
) -> HttpResponse {
    match recommendation_service::create_recommendation(&db, &body).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/recommendations/delete/{id}",
    tag = "Recommendations",
    responses(
        (status = 200, description = "Recommendation deleted"),
        (status = 400, description = "Invalid recommendation ID"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_recommendation(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> HttpResponse {
    match recommendation_service::delete_recommendation(&db, &path).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    get,
    path = "/recommendations/{productID}",
    tag = "Recommendations",
    responses(
        (status = 200, description = "Recommendations targeting one query"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_recommendations_for_query(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> HttpResponse {
    match recommendation_service::recommendations_for_query(&db, &path).await {
        Ok(recommendations) => HttpResponse::Ok().json(recommendations),
        Err(e) => e.to_response(),
    }
}
