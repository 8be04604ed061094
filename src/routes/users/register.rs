use crate::config::EnvConfig;
use crate::db::db_service::DbService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{UserEnvelope, UserRes};
use crate::utils::token;
use crate::validation::registration;
use actix_web::{post, web};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

/// Returns the object under `user`, or a 400 if there isn't one.
pub fn unwrap_envelope(body: &Value) -> Result<&Map<String, Value>, AppError> {
    match body.get("user") {
        Some(Value::Object(user)) => Ok(user),
        Some(_) => Err(AppError::BadRequest("user must be an object".to_string())),
        None => Err(AppError::BadRequest("request body must contain a user object".to_string())),
    }
}

// RealWorld leaves 200 vs 201 open; 200 matches the documented response.
#[post("")]
async fn register(
    db: web::Data<Arc<DbService>>,
    config: web::Data<EnvConfig>,
    body: web::Json<Value>,
) -> ApiResult<UserEnvelope<UserRes>> {
    let payload = unwrap_envelope(&body)?;
    let new_user = registration::validate(&db, payload, &config.password).await?;

    let user = db.create_user(new_user).await?;
    let token = token::mint(&user.id, &config.token)?;

    info!(user_id = %user.id, "registered user");

    Ok(ApiResponse::Ok(UserEnvelope {
        user: UserRes::new(user, token),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_must_hold_an_object() {
        let body = json!({"user": {"username": "jake"}});
        assert_eq!(unwrap_envelope(&body).unwrap().len(), 1);

        assert!(matches!(
            unwrap_envelope(&json!({"user": "jake"})),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            unwrap_envelope(&json!({"username": "jake"})),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            unwrap_envelope(&json!(["user"])),
            Err(AppError::BadRequest(_))
        ));
    }
}
