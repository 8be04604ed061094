use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

#[derive(Clone)]
pub struct DbService {
    pub(crate) database_connection: DatabaseConnection,
}

impl DbService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        Self::connect(ConnectOptions::new(uri)).await
    }

    /// Opens the pool described by `options` and brings the schema up to date.
    pub async fn connect(options: ConnectOptions) -> Result<Self, DbErr> {
        info!("Connecting to database...");
        let database_connection = Database::connect(options).await?;
        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Database ready.");
        Ok(Self { database_connection })
    }
}
