use axum::extract::Json;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::Debug;

pub const LOGIN_PATH: &str = "/users/sign_in";

const UNAUTHENTICATED: i32 = 100;
const NOT_FOUND: i32 = 101;
const FORBIDDEN: i32 = 102;
const VALIDATION_FAILED: i32 = 103;
const CONFLICT: i32 = 104;
const INVALID_CONFIG: i32 = 105;
const MALFORMED_BODY: i32 = 106;

/// Postgres SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
    pub details: Vec<String>,
}

impl Error {
    fn new(code: i32, message: &str) -> Self {
        Self {
            code,
            message: message.into(),
            details: vec![],
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.code {
            UNAUTHENTICATED => StatusCode::FOUND,
            NOT_FOUND => StatusCode::NOT_FOUND,
            FORBIDDEN => StatusCode::FORBIDDEN,
            VALIDATION_FAILED => StatusCode::UNPROCESSABLE_ENTITY,
            CONFLICT => StatusCode::CONFLICT,
            1..=99 => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn is_unauthenticated_error(&self) -> bool {
        self.code == UNAUTHENTICATED
    }

    pub fn is_not_found_error(&self) -> bool {
        self.code == NOT_FOUND
    }

    pub fn is_forbidden_error(&self) -> bool {
        self.code == FORBIDDEN
    }

    pub fn is_validation_error(&self) -> bool {
        self.code == VALIDATION_FAILED
    }

    pub fn is_conflict_error(&self) -> bool {
        self.code == CONFLICT
    }

    /// JSON body shared by every error response.
    pub fn body(&self) -> serde_json::Value {
        let message = match self.code {
            1..=99 => "Internal Server Error",
            _ => self.message.as_str(),
        };

        let mut body = json!({
            "code": self.code,
            "error": message,
        });

        if !self.details.is_empty() {
            body["details"] = json!(self.details);
        }

        body
    }
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return conflict_error();
            }
        }

        database_error(err)
    }
}

impl From<oso::OsoError> for Error {
    fn from(err: oso::OsoError) -> Self {
        authorizor_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.is_unauthenticated_error() {
            return (StatusCode::FOUND, [(header::LOCATION, LOGIN_PATH)]).into_response();
        }

        if self.code < 100 {
            tracing::error!(code = self.code, message = %self.message, "request failed");
        }

        (self.status(), Json(self.body())).into_response()
    }
}

pub fn unauthenticated_error() -> Error {
    Error::new(UNAUTHENTICATED, "you need to sign in before continuing")
}

pub fn not_found_error() -> Error {
    Error::new(NOT_FOUND, "place not found")
}

pub fn forbidden_error() -> Error {
    Error::new(FORBIDDEN, "place belongs to another user")
}

pub fn validation_error(details: Vec<String>) -> Error {
    Error {
        details,
        ..Error::new(VALIDATION_FAILED, "validation failed")
    }
}

pub fn conflict_error() -> Error {
    Error::new(CONFLICT, "place already exists")
}

pub fn invalid_config_error(key: &str) -> Error {
    Error {
        details: vec![format!("{} is malformed", key)],
        ..Error::new(INVALID_CONFIG, "invalid configuration")
    }
}

pub fn malformed_body_error(detail: String) -> Error {
    Error {
        details: vec![detail],
        ..Error::new(MALFORMED_BODY, "malformed request body")
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error::new(1, "environment variable error")
}

pub fn database_error<T: Debug>(err: T) -> Error {
    Error::new(2, &format!("database error: {:?}", err))
}

pub fn authorizor_error<T: Debug>(err: T) -> Error {
    Error::new(3, &format!("authorizor error: {:?}", err))
}

pub fn unexpected_error() -> Error {
    Error::new(5, "unexpected error")
}
