use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use std::time::Duration;
use tracing::info;

#[derive(Clone)]
pub struct DbClient {
    database: Database,
}

impl DbClient {
    /// Connect and ping once, so an unreachable store fails at startup
    /// rather than on the first request.
    pub async fn connect(connection_string: &str, database_name: &str) -> Result<Self, mongodb::error::Error> {
        let mut options = ClientOptions::parse(connection_string).await?;
        options.app_name = Some("roombook".to_string());
        options.server_selection_timeout = Some(Duration::from_secs(3));

        let client = Client::with_options(options)?;
        let database = client.database(database_name);

        database.run_command(doc! { "ping": 1 }).await?;
        info!("Connected to document store, database '{}'", database_name);

        Ok(Self { database })
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }
}
