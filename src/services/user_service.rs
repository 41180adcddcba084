use crate::database::MongoDB;
use crate::models::{UpdateSummary, User};
use crate::utils::error::AppError;
use futures::stream::StreamExt;
use mongodb::bson::{doc, Bson, Document};
use serde::Serialize;

/// Aggregate totals across the whole user collection
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserStats {
    #[serde(rename = "totalNumberOfUsers")]
    pub total_number_of_users: i64,
    #[serde(rename = "totalNumberOfQueries")]
    pub total_number_of_queries: i64,
    #[serde(rename = "totalNumberOfRecommendations")]
    pub total_number_of_recommendations: i64,
}

/// Outcome of a create request; duplicate emails are a soft no-op, not an error
pub enum CreateUserOutcome {
    Created { inserted_id: String },
    AlreadyExists,
}

pub async fn list_users(db: &MongoDB) -> Result<Vec<User>, AppError> {
    let mut cursor = db.users().find(doc! {}).await?;
    let mut users = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(user) => users.push(user),
            Err(e) => log::error!("❌ Failed to decode user document: {}", e),
        }
    }
    Ok(users)
}

/// Exact email match; no email means an empty filter (first document wins)
pub async fn find_user(db: &MongoDB, email: Option<&str>) -> Result<Option<User>, AppError> {
    let filter = match email {
        Some(email) => doc! { "email": email },
        None => doc! {},
    };
    Ok(db.users().find_one(filter).await?)
}

pub async fn create_user(db: &MongoDB, user: &User) -> Result<CreateUserOutcome, AppError> {
    let existing = db.users().find_one(doc! { "email": &user.email }).await?;
    if existing.is_some() {
        return Ok(CreateUserOutcome::AlreadyExists);
    }

    let result = db.users().insert_one(user).await?;
    let inserted_id = match result.inserted_id {
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    };
    Ok(CreateUserOutcome::Created { inserted_id })
}

pub async fn user_stats(db: &MongoDB) -> Result<UserStats, AppError> {
    let pipeline = vec![doc! {
        "$group": {
            "_id": null,
            "totalNumberOfUsers": { "$sum": 1 },
            "totalNumberOfQueries": { "$sum": "$totalQueries" },
            "totalNumberOfRecommendations": { "$sum": "$totalRecommendations" },
        }
    }];

    let mut cursor = db.users().aggregate(pipeline).await?;
    match cursor.next().await {
        Some(result) => Ok(stats_from_document(&result?)),
        // Empty collection: $group emits nothing, the caller still gets zeroes
        None => Ok(UserStats {
            total_number_of_users: 0,
            total_number_of_queries: 0,
            total_number_of_recommendations: 0,
        }),
    }
}

fn stats_from_document(doc: &Document) -> UserStats {
    UserStats {
        total_number_of_users: numeric_field(doc, "totalNumberOfUsers"),
        total_number_of_queries: numeric_field(doc, "totalNumberOfQueries"),
        total_number_of_recommendations: numeric_field(doc, "totalNumberOfRecommendations"),
    }
}

// $sum yields Int32, Int64 or Double depending on the stored values
fn numeric_field(doc: &Document, key: &str) -> i64 {
    match doc.get(key) {
        Some(Bson::Int32(v)) => *v as i64,
        Some(Bson::Int64(v)) => *v,
        Some(Bson::Double(v)) => *v as i64,
        _ => 0,
    }
}

/// Top five users by query counter, descending
pub async fn top_users_by_queries(db: &MongoDB) -> Result<Vec<User>, AppError> {
    top_users(db, doc! { "totalQueries": -1 }).await
}

/// Top five users by recommendation counter, descending
pub async fn top_users_by_recommendations(db: &MongoDB) -> Result<Vec<User>, AppError> {
    top_users(db, doc! { "totalRecommendations": -1 }).await
}

async fn top_users(db: &MongoDB, sort: Document) -> Result<Vec<User>, AppError> {
    let mut cursor = db.users().find(doc! {}).sort(sort).limit(5).await?;

    let mut users = Vec::new();
    while let Some(result) = cursor.next().await {
        users.push(result?);
    }
    Ok(users)
}

pub async fn bump_recommendation_count(
    db: &MongoDB,
    email: &str,
) -> Result<UpdateSummary, AppError> {
    bump_counter(db, email, doc! { "$inc": { "totalRecommendations": 1 } }).await
}

pub async fn bump_query_count(db: &MongoDB, email: &str) -> Result<UpdateSummary, AppError> {
    bump_counter(db, email, doc! { "$inc": { "totalQueries": 1 } }).await
}

/// Get-or-create increment: an unknown email gains a bare row whose counter
/// starts at 1 (upsert)
async fn bump_counter(
    db: &MongoDB,
    email: &str,
    update: Document,
) -> Result<UpdateSummary, AppError> {
    let result = db
        .users()
        .update_one(doc! { "email": email }, update)
        .upsert(true)
        .await?;
    Ok(result.into())
}
