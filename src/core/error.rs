use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};

/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Malformed or incomplete pagination cursor
    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    /// Missing or malformed date, month or range input
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Validation errors for request parameters
    #[error("Validation error: {0}")]
    Validation(String),

    /// No principal attached to the request
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Role not allowed for the requested operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Scoped lookup or mutation matched nothing under the caller's tenant.
    /// Deliberately identical for "missing" and "owned by another tenant".
    #[error("Not found: {0}")]
    NotFoundOrDenied(String),

    /// Product still referenced by sales or production entries
    #[error("Product in use: {0}")]
    ProductInUse(String),

    /// Record store errors, propagated as-is
    #[error("Store error: {0}")]
    UpstreamStore(#[from] sqlx::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidCursor(_) => "INVALID_CURSOR",
            AppError::InvalidPeriod(_) => "INVALID_PERIOD",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFoundOrDenied(_) => "NOT_FOUND",
            AppError::ProductInUse(_) => "PRODUCT_IN_USE",
            AppError::UpstreamStore(_) => "UPSTREAM_STORE_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        HttpResponse::build(status_code).json(serde_json::json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
                "code": status_code.as_u16(),
            }
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCursor(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidPeriod(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFoundOrDenied(_) => StatusCode::NOT_FOUND,
            AppError::ProductInUse(_) => StatusCode::CONFLICT,
            AppError::UpstreamStore(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Helper functions for common error scenarios
impl AppError {
    pub fn invalid_cursor(msg: impl Into<String>) -> Self {
        AppError::InvalidCursor(msg.into())
    }

    pub fn invalid_period(msg: impl Into<String>) -> Self {
        AppError::InvalidPeriod(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFoundOrDenied(resource.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
