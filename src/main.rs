mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let mongodb_uri = env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017/boycottDB".to_string());

    log::info!("🚀 Starting Boycott Service...");

    let db = database::MongoDB::new(&mongodb_uri)
        .await
        .expect("Invalid MONGODB_URI");

    // Connectivity failures are logged, not fatal: the driver reconnects
    // lazily, so the listener starts regardless
    match db.probe().await {
        Ok(_) => log::info!("✅ MongoDB connected successfully"),
        Err(e) => log::warn!("⚠️  MongoDB unreachable at startup, continuing anyway: {}", e),
    }

    let db_data = web::Data::new(db);

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        // Credentials must be enabled for the session cookie to travel
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173")
            .allowed_origin("https://boycottbase.web.app")
            .allowed_origin("https://boycottbase.firebaseapp.com")
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health
            .route("/", web::get().to(api::health::root))
            .route("/health", web::get().to(api::health::health_check))
            // Users
            .route("/users", web::get().to(api::users::get_users))
            .route("/users", web::post().to(api::users::create_user))
            .route("/users", web::patch().to(api::users::bump_recommendation_count))
            .route("/users/query", web::patch().to(api::users::bump_query_count))
            .route("/users/stats", web::get().to(api::users::get_user_stats))
            .route("/users/sortQuery", web::get().to(api::users::top_users_by_queries))
            .route(
                "/users/sortRecommendations",
                web::get().to(api::users::top_users_by_recommendations),
            )
            .route("/user/queryUser", web::get().to(api::users::get_user))
            // Queries; literal segments must be registered before /queries/{id}
            .route("/queries", web::get().to(api::queries::search_queries))
            .route("/queries", web::post().to(api::queries::create_query))
            .route(
                "/queries",
                web::patch().to(api::queries::increment_recommendation_count),
            )
            .route(
                "/queries/decrement",
                web::patch().to(api::queries::decrement_recommendation_count),
            )
            .service(
                web::resource("/queries/myQueries")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::get().to(api::queries::get_my_queries)),
            )
            .route("/limitedQueries", web::get().to(api::queries::recent_queries))
            .route("/queries/update/{id}", web::patch().to(api::queries::update_query))
            .route("/queries/delete/{id}", web::delete().to(api::queries::delete_query))
            .route("/queries/{id}", web::get().to(api::queries::get_query))
            // Recommendations; only the two listing routes are auth-gated
            .route(
                "/recommendations",
                web::post().to(api::recommendations::create_recommendation),
            )
            .service(
                web::resource("/recommendations")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::get().to(api::recommendations::get_recommendations)),
            )
            .service(
                web::resource("/recommendations/myRecommendations")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::get().to(api::recommendations::get_my_recommendations)),
            )
            .route(
                "/recommendations/delete/{id}",
                web::delete().to(api::recommendations::delete_recommendation),
            )
            .route(
                "/recommendations/{productID}",
                web::get().to(api::recommendations::get_recommendations_for_query),
            )
            // Session
            .route("/jwt", web::post().to(api::session::issue_token))
            .route("/logout", web::post().to(api::session::logout))
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
