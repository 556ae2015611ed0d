use super::*;
use cmn_core::ID;
use actix_web::FromRequest;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::web;
use std::future::Future;
use std::pin::Pin;

/// Cookie carrying the access token.
pub const ACCESS_COOKIE: &str = "accessToken";
/// Cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refreshToken";

fn bearer(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_owned())
}

/// Token lookup order: named cookie first, bearer header second. Both
/// gates and the refresh endpoint read credentials this way.
pub fn credential(req: &HttpRequest, cookie: &str) -> Option<String> {
    req.cookie(cookie)
        .map(|c| c.value().to_owned())
        .or_else(|| bearer(req))
}

/// Extractor for authenticated requests. Verifies the access token and
/// loads the live account; the redacted profile it carries is what every
/// protected handler downstream works from.
pub struct Auth(pub Profile);

impl Auth {
    pub fn profile(&self) -> &Profile {
        &self.0
    }
    pub fn user(&self) -> ID<Account> {
        ID::from(self.0.id)
    }
}

impl FromRequest for Auth {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let sessions = req.app_data::<web::Data<Sessions>>().cloned();
        let token = credential(req, ACCESS_COOKIE);
        Box::pin(async move {
            let sessions = sessions.ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("session manager not configured")
            })?;
            let token = token.ok_or(AuthError::Unauthorized("Missing access token"))?;
            let profile = sessions.authenticate(&token).await?;
            Ok(Auth(profile))
        })
    }
}

/// Admin gate: authenticates first, then requires the privilege flag.
/// Never runs standalone.
pub struct Admin(pub Profile);

impl FromRequest for Admin {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let auth = Auth::from_request(req, payload);
        Box::pin(async move {
            let Auth(profile) = auth.await?;
            match profile.admin {
                true => Ok(Admin(profile)),
                false => Err(AuthError::Forbidden("Admin access required").into()),
            }
        })
    }
}
