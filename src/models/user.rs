use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Registered user (stored in MongoDB, keyed by email)
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,

    /// Unique key; counter upserts create bare rows with only this field set
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,

    /// How many queries this user has created
    #[serde(rename = "totalQueries", default)]
    pub total_queries: i64,

    /// How many recommendations this user has made
    #[serde(rename = "totalRecommendations", default)]
    pub total_recommendations: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_default_to_zero_when_absent() {
        // Upserted rows carry only the email and one counter
        let user: User =
            serde_json::from_str(r#"{"email":"a@b.com","totalQueries":1}"#).unwrap();
        assert_eq!(user.total_queries, 1);
        assert_eq!(user.total_recommendations, 0);
        assert!(user.name.is_none());
    }
}
