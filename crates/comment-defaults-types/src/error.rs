//! Error type shared by the core crate and the adapters

use axum::{
	Json,
	http::StatusCode,
	response::{IntoResponse, Response},
};

pub type ClResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	Unauthorized,
	DbError,
	ConfigError(String),
	ValidationError(String),

	// externals
	Io(std::io::Error),
	Json(serde_json::Error),
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::Json(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::DbError => write!(f, "database error"),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
			Error::Json(err) => write!(f, "json error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

#[derive(serde::Serialize)]
struct ErrorBody<'a> {
	code: &'a str,
	message: String,
}

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let (status, code) = match &self {
			Error::NotFound => (StatusCode::NOT_FOUND, "E-CORE-NOTFOUND"),
			Error::PermissionDenied => (StatusCode::FORBIDDEN, "E-AUTH-NOPERM"),
			Error::Unauthorized => (StatusCode::UNAUTHORIZED, "E-AUTH-UNAUTH"),
			Error::Json(_) => (StatusCode::BAD_REQUEST, "E-CORE-PARSE"),
			Error::ValidationError(_) => (StatusCode::BAD_REQUEST, "E-VAL-INVALID"),
			Error::DbError => (StatusCode::INTERNAL_SERVER_ERROR, "E-CORE-DBERR"),
			Error::ConfigError(_) | Error::Io(_) => {
				(StatusCode::INTERNAL_SERVER_ERROR, "E-CORE-INTERNAL")
			}
		};

		// Internal details stay in the log
		let message = if status.is_server_error() {
			tracing::error!("Request failed: {}", self);
			"internal server error".to_string()
		} else {
			self.to_string()
		};

		(status, Json(ErrorBody { code, message })).into_response()
	}
}


// vim: ts=4
