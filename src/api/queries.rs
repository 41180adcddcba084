use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::database::MongoDB;
use crate::models::Query;
use crate::services::query_service::{self, QueryCounterRequest, UpdateQueryRequest};
use crate::services::session_service::Claims;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub email: Option<String>,
}

#[utoipa::path(
    get,
    path = "/queries",
    tag = "Queries",
    params(
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on product name; empty matches all")
    ),
    responses(
        (status = 200, description = "Matching queries"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn search_queries(db: web::Data<MongoDB>, query: web::Query<SearchQuery>) -> HttpResponse {
    let term = query.search.as_deref().unwrap_or("");
    match query_service::search_queries(&db, term).await {
        Ok(queries) => HttpResponse::Ok().json(queries),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    post,
    path = "/queries",
    tag = "Queries",
    responses(
        (status = 200, description = "Query created"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_query(db: web::Data<MongoDB>, body: web::Json<Query>) -> HttpResponse {
    match query_service::create_query(&db, &body).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.to_response(),
    }
}

/// GET /queries/myQueries?email= - owner listing, auth-gated: the
/// authenticated identity must match the requested email
pub async fn get_my_queries(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    query: web::Query<OwnerQuery>,
) -> HttpResponse {
    if query.email.as_deref() != Some(user.email.as_str()) {
        return HttpResponse::Forbidden()
            .json(serde_json::json!({ "message": "forbidden access" }));
    }

    match query_service::queries_by_owner(&db, &user.email).await {
        Ok(queries) => HttpResponse::Ok().json(queries),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    get,
    path = "/limitedQueries",
    tag = "Queries",
    responses(
        (status = 200, description = "Six newest queries for the home feed"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn recent_queries(db: web::Data<MongoDB>) -> HttpResponse {
    match query_service::recent_queries(&db).await {
        Ok(queries) => HttpResponse::Ok().json(queries),
        Err(e) => e.to_response(),
    }
}

/// GET /queries/{id} - single query lookup
pub async fn get_query(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    match query_service::find_query(&db, &path).await {
        Ok(query) => HttpResponse::Ok().json(query),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    patch,
    path = "/queries/update/{id}",
    tag = "Queries",
    request_body = UpdateQueryRequest,
    responses(
        (status = 200, description = "Query fields replaced"),
        (status = 400, description = "Invalid query ID"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_query(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    body: web::Json<UpdateQueryRequest>,
) -> HttpResponse {
    match query_service::update_query(&db, &path, &body).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.to_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/queries/delete/{id}",
    tag = "Queries",
    responses(
        (status = 200, description = "Query deleted; its recommendations are left untouched"),
        (status = 400, description = "Invalid query ID"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_query(db: web::Data<MongoDB>, path: web::Path<String>) -> HttpResponse {
    match query_service::delete_query(&db, &path).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.to_response(),
    }
}

/// PATCH /queries - recommendation counter +1, query id in the body
pub async fn increment_recommendation_count(
    db: web::Data<MongoDB>,
    body: web::Json<QueryCounterRequest>,
) -> HttpResponse {
    match query_service::adjust_recommendation_count(&db, &body.qid, 1).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.to_response(),
    }
}

/// PATCH /queries/decrement - recommendation counter -1
pub async fn decrement_recommendation_count(
    db: web::Data<MongoDB>,
    body: web::Json<QueryCounterRequest>,
) -> HttpResponse {
    match query_service::adjust_recommendation_count(&db, &body.qid, -1).await {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => e.to_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::AuthMiddleware;
    use crate::services::session_service;
    use actix_web::cookie::Cookie;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn my_queries_rejects_mismatched_identity() {
        // The handler checks identity before touching the database, so an
        // unreachable MongoDB endpoint is fine here
        let db = MongoDB::new("mongodb://localhost:27017/boycottTest")
            .await
            .unwrap();
        let app = test::init_service(
            App::new().app_data(web::Data::new(db)).service(
                web::resource("/queries/myQueries")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(get_my_queries)),
            ),
        )
        .await;

        let token = session_service::generate_token("bob@example.com", None).unwrap();
        let req = test::TestRequest::get()
            .uri("/queries/myQueries?email=alice@example.com")
            .cookie(Cookie::new(session_service::TOKEN_COOKIE, token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn my_queries_rejects_missing_email_param() {
        let db = MongoDB::new("mongodb://localhost:27017/boycottTest")
            .await
            .unwrap();
        let app = test::init_service(
            App::new().app_data(web::Data::new(db)).service(
                web::resource("/queries/myQueries")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(get_my_queries)),
            ),
        )
        .await;

        let token = session_service::generate_token("bob@example.com", None).unwrap();
        let req = test::TestRequest::get()
            .uri("/queries/myQueries")
            .cookie(Cookie::new(session_service::TOKEN_COOKIE, token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), actix_web::http::StatusCode::FORBIDDEN);
    }
}
