use mongodb::bson::{doc, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database};
use tracing::info;

pub const ROOMS: &str = "rooms";
pub const BOOKINGS: &str = "bookings";
pub const REVIEWS: &str = "reviews";

/// Owns the driver client. The driver pools connections internally, so one
/// `DbClient` is created at startup and its collection handles are shared.
#[derive(Clone)]
pub struct DbClient {
    client: Client,
    db: Database,
}

impl DbClient {
    pub async fn new(connection_string: &str, database: &str) -> Result<Self, mongodb::error::Error> {
        let mut options = ClientOptions::parse(connection_string).await?;
        options.app_name = Some("innova-api".to_string());
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(options)?;
        let db = client.database(database);

        Ok(Self { client, db })
    }

    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        info!("Pinged database '{}'", self.db.name());
        Ok(())
    }

    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }

    /// Waits for in-flight operations, then closes every pooled connection.
    pub async fn shutdown(self) {
        info!("Closing database connections...");
        self.client.shutdown().await;
    }
}
