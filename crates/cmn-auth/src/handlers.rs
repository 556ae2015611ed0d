use super::*;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::cookie::Cookie;
use actix_web::web;

fn decode_picture(encoded: &str) -> Result<Vec<u8>, AuthError> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|_| AuthError::Invalid("Invalid profile picture encoding"))
}

fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(false)
        .finish()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = session_cookie(name, String::new());
    cookie.make_removal();
    cookie
}

pub async fn register(
    sessions: web::Data<Sessions>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AuthError> {
    let req = req.into_inner();
    let picture = match req.profile_picture {
        Some(ref encoded) => Some(decode_picture(encoded)?),
        None => None,
    };
    let profile = sessions
        .register(Registration {
            username: req.username,
            email: req.email,
            password: req.password,
            picture,
        })
        .await?;
    Ok(HttpResponse::Created().json(ApiReply::new(201, profile, "User registered successfully")))
}

pub async fn login(
    sessions: web::Data<Sessions>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AuthError> {
    let (pair, profile) = sessions.login(&req.username, &req.password).await?;
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(ACCESS_COOKIE, pair.access))
        .cookie(session_cookie(REFRESH_COOKIE, pair.refresh))
        .json(ApiReply::new(200, profile, "User logged in successfully")))
}

pub async fn logout(sessions: web::Data<Sessions>, auth: Auth) -> Result<HttpResponse, AuthError> {
    sessions.logout(auth.user()).await?;
    Ok(HttpResponse::Ok()
        .cookie(removal_cookie(ACCESS_COOKIE))
        .cookie(removal_cookie(REFRESH_COOKIE))
        .json(ApiReply::new(
            200,
            serde_json::Value::Null,
            "User logged out successfully",
        )))
}

pub async fn refresh(
    sessions: web::Data<Sessions>,
    req: HttpRequest,
) -> Result<HttpResponse, AuthError> {
    let presented = credential(&req, REFRESH_COOKIE)
        .ok_or(AuthError::Unauthorized("Refresh token not found"))?;
    let (pair, profile) = sessions.refresh(&presented).await?;
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(ACCESS_COOKIE, pair.access))
        .cookie(session_cookie(REFRESH_COOKIE, pair.refresh))
        .json(ApiReply::new(
            200,
            profile,
            "Access token refreshed successfully",
        )))
}

pub async fn change_password(
    sessions: web::Data<Sessions>,
    auth: Auth,
    req: web::Json<PasswordChange>,
) -> Result<HttpResponse, AuthError> {
    sessions
        .change_password(auth.user(), &req.old, &req.new)
        .await?;
    Ok(HttpResponse::Ok().json(ApiReply::new(
        200,
        serde_json::Value::Null,
        "Password changed successfully",
    )))
}

pub async fn change_picture(
    sessions: web::Data<Sessions>,
    auth: Auth,
    req: web::Json<PictureChange>,
) -> Result<HttpResponse, AuthError> {
    let bytes = decode_picture(&req.profile_picture)?;
    let profile = sessions.change_avatar(auth.user(), &bytes).await?;
    Ok(HttpResponse::Ok().json(ApiReply::new(
        200,
        profile,
        "Profile picture updated successfully",
    )))
}

pub async fn update_details(
    sessions: web::Data<Sessions>,
    auth: Auth,
    req: web::Json<DetailsChange>,
) -> Result<HttpResponse, AuthError> {
    let req = req.into_inner();
    let profile = sessions
        .update_profile(
            auth.user(),
            ProfileUpdate {
                username: req.username,
                email: req.email,
                bio: req.bio,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(ApiReply::new(
        200,
        profile,
        "User details updated successfully",
    )))
}

pub async fn me(auth: Auth) -> Result<HttpResponse, AuthError> {
    Ok(HttpResponse::Ok().json(ApiReply::new(200, auth.0, "User fetched successfully")))
}

pub async fn roster(
    sessions: web::Data<Sessions>,
    _admin: Admin,
) -> Result<HttpResponse, AuthError> {
    let users = sessions.roster().await?;
    Ok(HttpResponse::Ok().json(ApiReply::new(200, users, "Users fetched successfully")))
}
