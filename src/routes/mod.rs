use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::types::error::AppError;

pub mod health;
pub mod users;

/// Bodies that fail to parse as JSON get the same error envelope as every
/// other failure.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("malformed request body: {err}")).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health").service(health::health)
    );
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .service(
                web::scope("/users")
                    .service(users::register::register)
            )
    );
}
