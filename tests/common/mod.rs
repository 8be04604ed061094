#![allow(dead_code)]

use std::sync::Arc;
use conduit_users::config::{EnvConfig, TokenConfig};
use conduit_users::db::db_service::DbService;
use conduit_users::validation::password::PasswordPolicy;
use sea_orm::ConnectOptions;

pub mod client;

pub struct TestContext {
    pub db: Arc<DbService>,
    pub config: EnvConfig,
}

impl TestContext {
    /// Fresh in-memory SQLite database with the schema migrated.
    pub async fn new() -> TestContext {
        let mut options = ConnectOptions::new("sqlite::memory:");
        // one connection, kept open: every connection to :memory: is a new database
        options
            .max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Arc::new(
            DbService::connect(options)
                .await
                .expect("Failed to initialize DbService")
        );

        TestContext {
            db,
            config: get_test_config(),
        }
    }
}

pub fn get_test_config() -> EnvConfig {
    EnvConfig {
        port: 8080,
        db_url: "sqlite::memory:".to_string(), // Not used in tests
        db_max_connections: 1,
        token: TokenConfig {
            secret: "test_jwt_secret".to_string(),
            ttl_seconds: 3600,
        },
        password: PasswordPolicy::default(),
    }
}

// Test data helpers
pub mod test_data {
    use serde_json::{json, Value};

    pub const STRONG_PASSWORD: &str = "c0rrect-h0rse-battery";

    pub fn registration(username: &str, email: &str, password: &str) -> Value {
        json!({
            "user": {
                "username": username,
                "email": email,
                "password": password,
            }
        })
    }

    pub fn sample_registration() -> Value {
        registration("jake", "jake@jake.jake", STRONG_PASSWORD)
    }
}
