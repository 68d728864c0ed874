use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;
use http::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("task not found")]
    TaskNotFound,
    #[error("title is required")]
    TitleRequired,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::TaskNotFound => StatusCode::NOT_FOUND,
            Self::TitleRequired => StatusCode::BAD_REQUEST,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::TaskNotFound => "task_not_found",
            Self::TitleRequired => "title_required",
            Self::Database(_) => "database_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let Self::Database(err) = &self {
            error!(error = %err, "database operation failed");
        }
        json_error(self.status(), self.code())
    }
}

pub fn json_error(status: StatusCode, code: &'static str) -> Response<Body> {
    let mut response = Response::new(Body::from(format!(r#"{{"error":"{code}"}}"#)));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    response
}
