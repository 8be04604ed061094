use serde::Serialize;
use crate::types::error::AppError;
use actix_web::{HttpResponse, Responder};

/// Successful outcomes; failures go through [`AppError`].
pub enum ApiResponse<T> {
    /// 200 with `T` as the JSON body.
    Ok(T),
    /// 200 with no body.
    EmptyOk,
}

impl<T: Serialize> Responder for ApiResponse<T> {
    type Body = actix_web::body::BoxBody;
    fn respond_to(self, _: &actix_web::HttpRequest) -> HttpResponse {
        match self {
            ApiResponse::Ok(body) => HttpResponse::Ok().json(body),
            ApiResponse::EmptyOk => HttpResponse::Ok().finish(),
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::MessageBody, http::StatusCode, test::TestRequest};

    #[test]
    fn ok_serializes_body() {
        let req = TestRequest::default().to_http_request();
        let resp = ApiResponse::Ok(serde_json::json!({"user": {"username": "jake"}})).respond_to(&req);

        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = resp.into_body().try_into_bytes().unwrap();
        assert_eq!(&bytes[..], br#"{"user":{"username":"jake"}}"#);
    }

    #[test]
    fn empty_ok_has_no_body() {
        let req = TestRequest::default().to_http_request();
        let resp = ApiResponse::<()>::EmptyOk.respond_to(&req);

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.into_body().try_into_bytes().unwrap().is_empty());
    }
}
