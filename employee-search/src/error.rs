//! Unified service-layer error type
//!
//! `ServiceError` bridges DB-layer errors (`sqlx::Error`, `BoxError`) and the
//! API-layer error (`AppError`). Translation happens in exactly one place,
//! [`ServiceError::into_app_error`].

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::db::BoxError;

/// Service-layer error
///
/// - `Db`: Database/infrastructure errors (auto-logged, mapped to a generic 500)
/// - `App`: Business-rule errors (transparent pass-through to client)
#[derive(Debug)]
pub enum ServiceError {
    /// Database or infrastructure error
    Db(BoxError),
    /// Already an AppError with the correct ErrorCode
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl ServiceError {
    /// Translate into the client-facing error.
    ///
    /// Infrastructure errors are logged in full. The response carries the
    /// generic message unless `expose_detail` is set, in which case it carries
    /// the underlying error's display text and nothing more.
    pub fn into_app_error(self, expose_detail: bool) -> AppError {
        match self {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, detail = ?db_err, "Service database error");
                if expose_detail {
                    AppError::with_message(ErrorCode::DatabaseError, db_err.to_string())
                } else {
                    AppError::new(ErrorCode::DatabaseError)
                }
            }
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        e.into_app_error(false)
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
