use actix_web::HttpResponse;
use mongodb::bson::oid::ObjectId;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Database(mongodb::error::Error),
    InvalidId(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Database(e) => write!(f, "Database error: {}", e),
            AppError::InvalidId(id) => write!(f, "Invalid document ID: {}", id),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Database(e)
    }
}

impl AppError {
    /// Maps the error onto the HTTP response the route should return.
    pub fn to_response(&self) -> HttpResponse {
        let body = serde_json::json!({
            "success": false,
            "error": self.to_string(),
        });
        match self {
            AppError::InvalidId(_) => HttpResponse::BadRequest().json(body),
            AppError::Database(_) => HttpResponse::InternalServerError().json(body),
        }
    }
}

/// Parses a hex string into an ObjectId, mapping failures to `InvalidId`.
pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_object_id_accepts_valid_hex() {
        let id = ObjectId::new().to_hex();
        assert!(parse_object_id(&id).is_ok());
    }

    #[test]
    fn parse_object_id_rejects_garbage() {
        let err = parse_object_id("not-an-object-id").unwrap_err();
        assert!(matches!(err, AppError::InvalidId(_)));
    }
}
