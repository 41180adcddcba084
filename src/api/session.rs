use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::services::session_service;

/// Identity payload the frontend sends after its own login flow completes
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SessionRequest {
    pub email: String,
    pub name: Option<String>,
}

#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Session",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Session cookie set"),
        (status = 500, description = "Token signing failed")
    )
)]
pub async fn issue_token(body: web::Json<SessionRequest>) -> HttpResponse {
    match session_service::generate_token(&body.email, body.name.clone()) {
        Ok(token) => {
            log::info!("🔐 Session issued for {}", body.email);
            HttpResponse::Ok()
                .cookie(session_service::session_cookie(token))
                .json(serde_json::json!({ "success": true }))
        }
        Err(e) => {
            log::error!("❌ Failed to issue session token: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "success": false, "error": e }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "Session",
    responses(
        (status = 200, description = "Session cookie cleared; the token itself stays valid until expiry")
    )
)]
pub async fn logout() -> HttpResponse {
    HttpResponse::Ok()
        .cookie(session_service::expired_session_cookie())
        .json(serde_json::json!({ "success": true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn issue_sets_http_only_session_cookie() {
        let app = test::init_service(
            App::new().route("/jwt", web::post().to(issue_token)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/jwt")
            .set_json(serde_json::json!({ "email": "alice@example.com" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());

        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == session_service::TOKEN_COOKIE)
            .expect("session cookie missing");
        assert_eq!(cookie.http_only(), Some(true));
        assert!(!cookie.value().is_empty());
    }

    #[actix_web::test]
    async fn logout_clears_the_cookie() {
        let app =
            test::init_service(App::new().route("/logout", web::post().to(logout))).await;

        let req = test::TestRequest::post().uri("/logout").to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());

        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == session_service::TOKEN_COOKIE)
            .expect("session cookie missing");
        assert_eq!(cookie.value(), "");
        assert_eq!(
            cookie.max_age(),
            Some(actix_web::cookie::time::Duration::ZERO)
        );
    }
}
