//! Extracting the logged-in customer from the identity cookie.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::AccountId;

fn user_from_request(req: &HttpRequest) -> Option<AuthenticatedUser> {
    let identity = req.get_identity().ok()?;
    let id = identity.id().ok()?;
    let id = id.parse::<i32>().ok()?;
    AccountId::new(id).ok().map(|id| AuthenticatedUser { id })
}

/// Rejects with `401` when nobody is logged in. Handlers that also serve
/// anonymous visitors take `Option<AuthenticatedUser>` instead.
impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(user_from_request(req).ok_or_else(|| {
            actix_web::error::ErrorUnauthorized("Not logged in")
        }))
    }
}
