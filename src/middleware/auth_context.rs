use std::future::{ready, Ready};

use actix_web::{
    dev::Payload, error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest,
};

use crate::middleware::auth::Claims;

// Lets handlers take `claims: Claims` directly once AuthMiddleware has run
impl FromRequest for Claims {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(claims) = req.extensions().get::<Claims>() {
            ready(Ok(claims.clone()))
        } else {
            ready(Err(ErrorUnauthorized("User not authenticated")))
        }
    }
}
