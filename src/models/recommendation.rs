use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// A recommendation made against a query (stored in MongoDB)
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Recommendation {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,

    /// Target query id, stored as its hex string
    #[serde(rename = "queryID", skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,

    /// Email of the owner of the target query
    #[serde(rename = "queryUserEmail", skip_serializing_if = "Option::is_none")]
    pub query_user_email: Option<String>,

    /// Email of the user making the recommendation
    #[serde(rename = "recommenderEmail", skip_serializing_if = "Option::is_none")]
    pub recommender_email: Option<String>,

    /// Remaining recommendation fields (title, product, reason, image, dates)
    /// pass through untouched
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Document,
}
