use mongodb::{Client, Collection, Database};

use crate::models::{Query, Recommendation, User};

pub const USERS: &str = "users";
pub const QUERIES: &str = "queries";
pub const RECOMMENDATIONS: &str = "recommendations";

/// Shared MongoDB handle, constructed once in `main` and injected into
/// handlers through `web::Data`.
#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, mongodb::error::Error> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool tuning; the driver multiplexes requests internally
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Database name comes from the URI path, with a fallback
        let db_name = uri
            .split('/')
            .last()
            .and_then(|s| s.split('?').next())
            .filter(|s| !s.is_empty() && !s.contains(':'))
            .unwrap_or("boycottDB");

        let db = client.database(db_name);

        Ok(Self { client, db })
    }

    /// Connectivity check plus best-effort index creation. Failures are
    /// reported to the caller, which logs them without halting startup.
    pub async fn probe(&self) -> Result<(), mongodb::error::Error> {
        self.db.list_collection_names().await?;
        self.ensure_indexes().await;
        Ok(())
    }

    /// Secondary indexes for the hot lookup paths. Creation errors are
    /// logged and swallowed, the server works without them.
    async fn ensure_indexes(&self) {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        let specs = [
            (USERS, doc! { "email": 1 }),
            (QUERIES, doc! { "userEmail": 1 }),
            (RECOMMENDATIONS, doc! { "queryID": 1 }),
        ];

        for (name, keys) in specs {
            let collection = self.db.collection::<mongodb::bson::Document>(name);
            let index = IndexModel::builder().keys(keys.clone()).build();
            match collection.create_index(index).await {
                Ok(_) => log::info!("   ✅ Index ready: {}({})", name, keys),
                Err(e) => log::debug!("   ℹ️  Index creation skipped for {}: {}", name, e),
            }
        }
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection(USERS)
    }

    pub fn queries(&self) -> Collection<Query> {
        self.db.collection(QUERIES)
    }

    pub fn recommendations(&self) -> Collection<Recommendation> {
        self.db.collection(RECOMMENDATIONS)
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn database_name_comes_from_uri_path() {
        let db = MongoDB::new("mongodb://localhost:27017/discussDB")
            .await
            .unwrap();
        assert_eq!(db.database().name(), "discussDB");
    }

    #[tokio::test]
    async fn database_name_falls_back_without_path() {
        let db = MongoDB::new("mongodb://localhost:27017").await.unwrap();
        assert_eq!(db.database().name(), "boycottDB");
    }
}
