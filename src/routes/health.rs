use actix_web::get;
use serde::Serialize;

use crate::types::response::{ApiResponse, ApiResult};

#[derive(Serialize)]
pub struct HealthRes {}

/// Liveness probe; no database round trip.
#[get("")]
async fn health() -> ApiResult<HealthRes> {
    Ok(ApiResponse::EmptyOk)
}
