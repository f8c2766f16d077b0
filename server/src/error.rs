use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde::Serialize;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

/// Stable error body: a machine-readable kind plus a human-readable message.
/// Reports never leak stack traces or store internals to the client.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: &'static str,
    message: String,
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let (status, kind) = match self.0.current_context() {
            KernelError::InvalidInput => (StatusCode::BAD_REQUEST, "invalid_input"),
            KernelError::OutOfStock => (StatusCode::BAD_REQUEST, "out_of_stock"),
            KernelError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            KernelError::Timeout | KernelError::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {:?}", self.0);
        }
        let message = self.0.current_context().to_string();
        (status, Json(ErrorResponse { error: kind, message })).into_response()
    }
}
