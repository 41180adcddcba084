pub mod query_service;
pub mod recommendation_service;
pub mod session_service;
pub mod user_service;
