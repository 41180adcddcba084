use crate::database::MongoDB;
use crate::models::{DeleteSummary, InsertSummary, Query, UpdateSummary};
use crate::utils::error::{parse_object_id, AppError};
use futures::stream::StreamExt;
use mongodb::bson::{doc, Document};
use serde::Deserialize;

/// Full-field update of a query; missing fields are written as null,
/// matching the original wire behavior
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateQueryRequest {
    #[serde(rename = "productName")]
    pub product_name: Option<String>,
    #[serde(rename = "productBrand")]
    pub product_brand: Option<String>,
    #[serde(rename = "productImage")]
    pub product_image: Option<String>,
    #[serde(rename = "queryTitle")]
    pub query_title: Option<String>,
    #[serde(rename = "boycottingReason")]
    pub boycotting_reason: Option<String>,
}

/// Counter adjustments address the query by id carried in the body
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct QueryCounterRequest {
    #[serde(rename = "Qid")]
    pub qid: String,
}

/// Case-insensitive substring match on the product name; an empty term
/// matches every document
fn search_filter(term: &str) -> Document {
    doc! { "productName": { "$regex": term, "$options": "i" } }
}

pub async fn search_queries(db: &MongoDB, term: &str) -> Result<Vec<Query>, AppError> {
    let mut cursor = db.queries().find(search_filter(term)).await?;
    let mut queries = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(query) => queries.push(query),
            Err(e) => log::error!("❌ Failed to decode query document: {}", e),
        }
    }
    Ok(queries)
}

pub async fn create_query(db: &MongoDB, query: &Query) -> Result<InsertSummary, AppError> {
    let result = db.queries().insert_one(query).await?;
    Ok(result.into())
}

/// Owner listing, newest first by insertion identity
pub async fn queries_by_owner(db: &MongoDB, email: &str) -> Result<Vec<Query>, AppError> {
    let mut cursor = db
        .queries()
        .find(doc! { "userEmail": email })
        .sort(doc! { "_id": -1 })
        .await?;

    let mut queries = Vec::new();
    while let Some(result) = cursor.next().await {
        queries.push(result?);
    }
    Ok(queries)
}

/// Home feed: six newest queries
pub async fn recent_queries(db: &MongoDB) -> Result<Vec<Query>, AppError> {
    let mut cursor = db
        .queries()
        .find(doc! {})
        .sort(doc! { "_id": -1 })
        .limit(6)
        .await?;

    let mut queries = Vec::new();
    while let Some(result) = cursor.next().await {
        queries.push(result?);
    }
    Ok(queries)
}

pub async fn find_query(db: &MongoDB, id: &str) -> Result<Option<Query>, AppError> {
    let oid = parse_object_id(id)?;
    Ok(db.queries().find_one(doc! { "_id": oid }).await?)
}

pub async fn update_query(
    db: &MongoDB,
    id: &str,
    request: &UpdateQueryRequest,
) -> Result<UpdateSummary, AppError> {
    let oid = parse_object_id(id)?;
    let update = doc! {
        "$set": {
            "productName": &request.product_name,
            "productBrand": &request.product_brand,
            "productImage": &request.product_image,
            "queryTitle": &request.query_title,
            "boycottingReason": &request.boycotting_reason,
        }
    };

    let result = db
        .queries()
        .update_one(doc! { "_id": oid }, update)
        .upsert(true)
        .await?;
    Ok(result.into())
}

pub async fn delete_query(db: &MongoDB, id: &str) -> Result<DeleteSummary, AppError> {
    let oid = parse_object_id(id)?;
    let result = db.queries().delete_one(doc! { "_id": oid }).await?;
    Ok(result.into())
}

/// Moves recommendationCount by `delta` (±1). Upserts, so a decrement on a
/// missing row creates it at -1; consistency with the recommendations
/// collection is left to paired client calls.
pub async fn adjust_recommendation_count(
    db: &MongoDB,
    id: &str,
    delta: i64,
) -> Result<UpdateSummary, AppError> {
    let oid = parse_object_id(id)?;
    let result = db
        .queries()
        .update_one(
            doc! { "_id": oid },
            doc! { "$inc": { "recommendationCount": delta } },
        )
        .upsert(true)
        .await?;
    Ok(result.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn search_filter_is_case_insensitive_regex() {
        let filter = search_filter("cola");
        let spec = filter.get_document("productName").unwrap();
        assert_eq!(spec.get_str("$regex").unwrap(), "cola");
        assert_eq!(spec.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn empty_search_term_keeps_the_match_all_regex() {
        let filter = search_filter("");
        let spec = filter.get_document("productName").unwrap();
        assert_eq!(spec.get_str("$regex").unwrap(), "");
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn recent_queries_caps_at_six_newest_first() {
        let db = MongoDB::new("mongodb://localhost:27017/boycottTest")
            .await
            .unwrap();
        db.queries().delete_many(doc! {}).await.unwrap();

        for i in 0..8 {
            let query = Query {
                id: None,
                user_email: Some("feed@test".to_string()),
                product_name: Some(format!("Product {}", i)),
                product_brand: None,
                product_image: None,
                query_title: None,
                boycotting_reason: None,
                recommendation_count: 0,
                extra: Document::new(),
            };
            create_query(&db, &query).await.unwrap();
        }

        let recent = recent_queries(&db).await.unwrap();
        assert_eq!(recent.len(), 6);
        assert_eq!(recent[0].product_name.as_deref(), Some("Product 7"));
        assert_eq!(recent[5].product_name.as_deref(), Some("Product 2"));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn increment_then_decrement_restores_counter() {
        let db = MongoDB::new("mongodb://localhost:27017/boycottTest")
            .await
            .unwrap();
        let query = Query {
            id: None,
            user_email: Some("counter@test".to_string()),
            product_name: Some("Counter".to_string()),
            product_brand: None,
            product_image: None,
            query_title: None,
            boycotting_reason: None,
            recommendation_count: 3,
            extra: Document::new(),
        };
        let inserted = create_query(&db, &query).await.unwrap();
        let id = inserted.inserted_id;

        adjust_recommendation_count(&db, &id, 1).await.unwrap();
        adjust_recommendation_count(&db, &id, -1).await.unwrap();

        let fetched = find_query(&db, &id).await.unwrap().unwrap();
        assert_eq!(fetched.recommendation_count, 3);
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn delete_leaves_no_document_behind() {
        let db = MongoDB::new("mongodb://localhost:27017/boycottTest")
            .await
            .unwrap();
        let query = Query {
            id: Some(ObjectId::new()),
            user_email: None,
            product_name: Some("Doomed".to_string()),
            product_brand: None,
            product_image: None,
            query_title: None,
            boycotting_reason: None,
            recommendation_count: 0,
            extra: Document::new(),
        };
        let inserted = create_query(&db, &query).await.unwrap();

        let summary = delete_query(&db, &inserted.inserted_id).await.unwrap();
        assert_eq!(summary.deleted_count, 1);
        assert!(find_query(&db, &inserted.inserted_id)
            .await
            .unwrap()
            .is_none());
    }
}
