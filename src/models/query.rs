use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A product-boycott query (stored in MongoDB)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Email of the user who created the query
    #[serde(rename = "userEmail", skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,

    #[serde(rename = "productName", skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    #[serde(rename = "productBrand", skip_serializing_if = "Option::is_none")]
    pub product_brand: Option<String>,

    #[serde(rename = "productImage", skip_serializing_if = "Option::is_none")]
    pub product_image: Option<String>,

    #[serde(rename = "queryTitle", skip_serializing_if = "Option::is_none")]
    pub query_title: Option<String>,

    #[serde(rename = "boycottingReason", skip_serializing_if = "Option::is_none")]
    pub boycotting_reason: Option<String>,

    /// How many users recommended against this query's product
    #[serde(rename = "recommendationCount", default)]
    pub recommendation_count: i64,

    /// Client-supplied fields (poster name/photo, date strings) pass through untouched
    #[serde(flatten)]
    pub extra: Document,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_round_trip_through_extra() {
        let body = r#"{
            "userEmail": "a@b.com",
            "productName": "Cola",
            "userName": "Alice",
            "currentDate": "2024-01-01"
        }"#;
        let query: Query = serde_json::from_str(body).unwrap();
        assert_eq!(query.product_name.as_deref(), Some("Cola"));
        assert_eq!(query.extra.get_str("userName").unwrap(), "Alice");

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["currentDate"], "2024-01-01");
    }
}
