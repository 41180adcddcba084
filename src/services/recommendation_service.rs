use crate::database::MongoDB;
use crate::models::{DeleteSummary, InsertSummary, Recommendation};
use crate::utils::error::{parse_object_id, AppError};
use futures::stream::StreamExt;
use mongodb::bson::doc;

/// Recommendations received on queries owned by `email`
pub async fn recommendations_for_owner(
    db: &MongoDB,
    email: &str,
) -> Result<Vec<Recommendation>, AppError> {
    collect(db, doc! { "queryUserEmail": email }).await
}

/// Recommendations authored by `email`
pub async fn recommendations_by_author(
    db: &MongoDB,
    email: &str,
) -> Result<Vec<Recommendation>, AppError> {
    collect(db, doc! { "recommenderEmail": email }).await
}

/// Recommendations targeting one query. The foreign key is the hex string
/// of the query id, so this is a plain string match.
pub async fn recommendations_for_query(
    db: &MongoDB,
    query_id: &str,
) -> Result<Vec<Recommendation>, AppError> {
    collect(db, doc! { "queryID": query_id }).await
}

pub async fn create_recommendation(
    db: &MongoDB,
    recommendation: &Recommendation,
) -> Result<InsertSummary, AppError> {
    let result = db.recommendations().insert_one(recommendation).await?;
    Ok(result.into())
}

/// Deleting a recommendation does not touch the owning query's counter;
/// the client issues the paired decrement call itself.
pub async fn delete_recommendation(db: &MongoDB, id: &str) -> Result<DeleteSummary, AppError> {
    let oid = parse_object_id(id)?;
    let result = db.recommendations().delete_one(doc! { "_id": oid }).await?;
    Ok(result.into())
}

async fn collect(
    db: &MongoDB,
    filter: mongodb::bson::Document,
) -> Result<Vec<Recommendation>, AppError> {
    let mut cursor = db.recommendations().find(filter).await?;
    let mut recommendations = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(recommendation) => recommendations.push(recommendation),
            Err(e) => log::error!("❌ Failed to decode recommendation document: {}", e),
        }
    }
    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Document;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn lookup_by_query_id_matches_string_key() {
        let db = MongoDB::new("mongodb://localhost:27017/boycottTest")
            .await
            .unwrap();
        let query_id = mongodb::bson::oid::ObjectId::new().to_hex();

        let recommendation = Recommendation {
            id: None,
            query_id: Some(query_id.clone()),
            query_user_email: Some("owner@test".to_string()),
            recommender_email: Some("author@test".to_string()),
            extra: Document::new(),
        };
        create_recommendation(&db, &recommendation).await.unwrap();

        let found = recommendations_for_query(&db, &query_id).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].recommender_email.as_deref(), Some("author@test"));
    }
}
