use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::TokenPayload;
use crate::error::AppError;

/// The caller identified by a verified bearer token.
///
/// Only available on routes behind `AuthMiddleware`, which puts the
/// `TokenPayload` into the request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub TokenPayload);

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<TokenPayload>().cloned() {
            Some(payload) => ready(Ok(AuthenticatedUser(payload))),
            None => {
                let err = AppError::Unauthorized("Missing token".to_string());
                ready(Err(err.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use uuid::Uuid;

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_success() {
        let req = test::TestRequest::default().to_http_request();
        let payload = TokenPayload {
            user_id: Uuid::new_v4(),
            email: "a@b.com".into(),
        };
        req.extensions_mut().insert(payload.clone());

        let mut body = Payload::None;
        let extracted = AuthenticatedUser::from_request(&req, &mut body).await.unwrap();
        assert_eq!(extracted.0, payload);
    }

    #[actix_rt::test]
    async fn test_authenticated_user_extractor_failure() {
        let req = test::TestRequest::default().to_http_request();

        let mut body = Payload::None;
        let err = AuthenticatedUser::from_request(&req, &mut body)
            .await
            .unwrap_err();
        assert_eq!(err.error_response().status(), StatusCode::UNAUTHORIZED);
    }
}
