use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Boycott Service API",
        version = "1.0.0",
        description = "Backend API for the product-boycott recommendation app.\n\n**Authentication:** Protected endpoints read a signed JWT from the http-only `token` cookie set by `POST /jwt`. Tokens expire after 2 hours; there is no server-side revocation.",
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Users
        crate::api::users::get_users,
        crate::api::users::create_user,
        crate::api::users::get_user_stats,
        crate::api::users::bump_recommendation_count,
        crate::api::users::bump_query_count,

        // Queries
        crate::api::queries::search_queries,
        crate::api::queries::create_query,
        crate::api::queries::recent_queries,
        crate::api::queries::update_query,
        crate::api::queries::delete_query,

        // Recommendations
        crate::api::recommendations::create_recommendation,
        crate::api::recommendations::delete_recommendation,
        crate::api::recommendations::get_recommendations_for_query,

        // Session
        crate::api::session::issue_token,
        crate::api::session::logout,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::session::SessionRequest,
            crate::api::users::UserCounterRequest,
            crate::services::user_service::UserStats,
            crate::services::query_service::UpdateQueryRequest,
            crate::services::query_service::QueryCounterRequest,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints for monitoring service status."),
        (name = "Users", description = "User registry, counters and leaderboard endpoints."),
        (name = "Queries", description = "Product-boycott queries: search, feed, CRUD and counter adjustments."),
        (name = "Recommendations", description = "Recommendations made against queries."),
        (name = "Session", description = "Cookie-based session lifecycle (issue and clear)."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
            );
        }
    }
}
