use actix_web::{test, web, App};
use conduit_users::config::EnvConfig;
use conduit_users::db::db_service::DbService;
use serde_json::Value;
use std::sync::Arc;

pub struct TestClient {
    pub db: Arc<DbService>,
    pub config: EnvConfig,
}

impl TestClient {
    pub fn new(db: Arc<DbService>, config: EnvConfig) -> Self {
        TestClient { db, config }
    }

    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(self.config.clone()))
            .configure(conduit_users::routes::configure_routes)
    }
}

pub fn register_request(body: &Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/users")
        .set_json(body)
}

/// The `errors.body` list of an error response.
pub fn error_messages(body: &Value) -> Vec<String> {
    body["errors"]["body"]
        .as_array()
        .expect("errors.body should be an array")
        .iter()
        .map(|m| m.as_str().expect("messages are strings").to_string())
        .collect()
}
