use crate::error::AppError;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Client as MongoClient, Collection, Database, IndexModel,
};

const USER_COLLECTION: &str = "userInformation";

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Builds the client handle. Connection establishment is lazy; callers
    /// that must fail fast run [`MongoDb::health_check`] right after.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        let users = self.users();

        // Alias lookup backs /checkUser and the alias-keyed upserts.
        // Not unique: singleton-profile documents carry no userAlias at all.
        let alias_index = IndexModel::builder()
            .keys(doc! { "userAlias": 1 })
            .options(
                IndexOptions::builder()
                    .name("user_alias_lookup".to_string())
                    .build(),
            )
            .build();

        users.create_index(alias_index, None).await.map_err(|e| {
            tracing::error!(
                "Failed to create userAlias index on {} collection: {}",
                USER_COLLECTION,
                e
            );
            AppError::from(e)
        })?;
        tracing::info!("Created index on {}.userAlias", USER_COLLECTION);

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    /// The user collection stays schemaless: records are raw BSON documents
    /// so arbitrary client-supplied shapes round-trip unmodified.
    pub fn users(&self) -> Collection<Document> {
        self.db.collection(USER_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
