use serde::Deserialize;
use serde::Serialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Optional base64 image payload; the multipart staging layer of the
    /// old stack is gone.
    #[serde(default, rename = "profilePicture")]
    pub profile_picture: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct PasswordChange {
    #[serde(rename = "oldpass")]
    pub old: String,
    #[serde(rename = "newpass")]
    pub new: String,
}

#[derive(Deserialize)]
pub struct PictureChange {
    #[serde(rename = "profilePicture")]
    pub profile_picture: String,
}

#[derive(Deserialize)]
pub struct DetailsChange {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Uniform success envelope; the clients predate this backend and expect
/// this exact shape.
#[derive(Serialize)]
pub struct ApiReply<T: Serialize> {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub data: T,
    pub message: &'static str,
    pub success: bool,
}

impl<T: Serialize> ApiReply<T> {
    pub fn new(status_code: u16, data: T, message: &'static str) -> Self {
        Self {
            status_code,
            data,
            message,
            success: true,
        }
    }
}
