use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use spigot_core::Error as CoreError;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Infrastructure failures surfaced by a request handler. Request-scoped
/// outcomes (upstream errors, unavailable tweets) never take this path; they
/// travel inside `ApiReply`.
#[derive(Debug)]
pub struct ServerError(anyhow::Error);

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        let status = self.status_code();
        (status, self.to_string()).into_response()
    }
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        for cause in self.0.chain() {
            if cause.downcast_ref::<reqwest::Error>().is_some() {
                return StatusCode::BAD_GATEWAY;
            }
            if let Some(err) = cause.downcast_ref::<CoreError>() {
                match err {
                    CoreError::NoAccounts => return StatusCode::SERVICE_UNAVAILABLE,
                    CoreError::InvalidCredential(_) => return StatusCode::INTERNAL_SERVER_ERROR,
                    _ => return StatusCode::INTERNAL_SERVER_ERROR,
                }
            }
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
