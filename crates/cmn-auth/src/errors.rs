/// Tagged failure kinds for every credential and session operation.
///
/// Each operation maps deterministically to exactly one kind per failure
/// condition; propagation is immediate and auth failures are never retried.
/// The HTTP boundary is the only place these become status codes.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing or malformed input (400).
    #[error("{0}")]
    Invalid(&'static str),
    /// Duplicate unique field (409).
    #[error("{0}")]
    Conflict(&'static str),
    /// No such record (404).
    #[error("{0}")]
    NotFound(&'static str),
    /// Missing, invalid, or expired credential (401).
    #[error("{0}")]
    Unauthorized(&'static str),
    /// Insufficient privilege (403).
    #[error("{0}")]
    Forbidden(&'static str),
    /// Unexpected internal or upstream failure (500). The wrapped cause is
    /// logged at the HTTP boundary and never serialized into a response.
    #[error("Something went wrong")]
    Fatal(#[source] anyhow::Error),
}

impl From<anyhow::Error> for AuthError {
    fn from(e: anyhow::Error) -> Self {
        Self::Fatal(e)
    }
}

#[cfg(feature = "server")]
mod respond {
    use super::AuthError;
    use actix_web::HttpResponse;
    use actix_web::http::StatusCode;

    impl actix_web::ResponseError for AuthError {
        fn status_code(&self) -> StatusCode {
            match self {
                AuthError::Invalid(_) => StatusCode::BAD_REQUEST,
                AuthError::Conflict(_) => StatusCode::CONFLICT,
                AuthError::NotFound(_) => StatusCode::NOT_FOUND,
                AuthError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
                AuthError::Fatal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
        fn error_response(&self) -> HttpResponse {
            if let AuthError::Fatal(e) = self {
                log::error!("internal failure: {:#}", e);
            }
            HttpResponse::build(self.status_code()).json(serde_json::json!({
                "statusCode": self.status_code().as_u16(),
                "message": self.to_string(),
                "success": false,
            }))
        }
    }
}
