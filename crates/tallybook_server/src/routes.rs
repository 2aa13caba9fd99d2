//! Request routing and response mapping.
//!
//! ## Routes
//! - `GET /health`
//! - `GET|POST /api/expenses`
//! - `GET /api/expenses/monthly-report`
//! - `GET /api/expenses/compare?month1=YYYY-MM&month2=YYYY-MM`
//! - `GET /api/expenses/recurring?months=N` (default 3)
//! - `GET /api/expenses/tags?months=N` (default 2)
//! - `GET|PUT|DELETE /api/expenses/{id}`
//! - `GET|POST /api/todos`
//! - `GET|PUT|DELETE /api/todos/{id}`
//!
//! Routing is synchronous and socket-free so it can be driven directly.
//! Path segments are percent-decoded before matching, so `{id}` is the
//! decoded record id.

use crate::state::AppState;
use bytes::Bytes;
use hyper::{Method, StatusCode};
use log::error;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tallybook_core::{core_version, ExpenseDraft, ExpensePatch, ServiceError, TodoDraft, TodoPatch};

/// Status and JSON body produced for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl ApiResponse {
    fn json<T: Serialize>(status: StatusCode, value: &T) -> Result<Self, ApiError> {
        let body = serde_json::to_vec(value).map_err(|err| {
            error!("event=http_encode module=server status=error error={err}");
            ApiError::Internal
        })?;
        Ok(Self {
            status,
            body: Bytes::from(body),
        })
    }

    fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: Bytes::new(),
        }
    }
}

/// Boundary-level failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    MethodNotAllowed,
    Internal,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) => message,
            Self::MethodNotAllowed => "method not allowed",
            Self::Internal => "internal server error",
        }
    }

    fn into_response(self) -> ApiResponse {
        let body = serde_json::json!({ "error": self.message() });
        ApiResponse {
            status: self.status(),
            body: Bytes::from(body.to_string()),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::InvalidRequest(message) => Self::BadRequest(message),
            err @ ServiceError::NotFound { .. } => Self::NotFound(err.to_string()),
            ServiceError::Storage(err) => {
                error!("event=http_request module=server status=error error_code=storage error={err}");
                Self::Internal
            }
        }
    }
}

type ApiResult = Result<ApiResponse, ApiError>;

#[derive(Debug, Default, Deserialize)]
struct ReportQuery {
    month1: Option<String>,
    month2: Option<String>,
    months: Option<String>,
}

/// Routes one request against the shared state.
pub fn dispatch(
    state: &AppState,
    method: &Method,
    path: &str,
    query: Option<&str>,
    body: &[u8],
) -> ApiResponse {
    let result = decode_segments(path).and_then(|decoded| {
        let segments: Vec<&str> = decoded.iter().map(|part| part.as_ref()).collect();
        route(state, method, path, &segments, query, body)
    });

    result.unwrap_or_else(ApiError::into_response)
}

fn decode_segments(path: &str) -> Result<Vec<Cow<'_, str>>, ApiError> {
    path.split('/')
        .filter(|part| !part.is_empty())
        .map(|part| {
            urlencoding::decode(part)
                .map_err(|_| ApiError::BadRequest("path is not valid UTF-8".to_string()))
        })
        .collect()
}

fn route(
    state: &AppState,
    method: &Method,
    path: &str,
    segments: &[&str],
    query: Option<&str>,
    body: &[u8],
) -> ApiResult {
    match segments {
        ["health"] => match *method {
            Method::GET => health(),
            _ => Err(ApiError::MethodNotAllowed),
        },
        ["api", "expenses", rest @ ..] => expense_routes(state, method, rest, query, body),
        ["api", "todos", rest @ ..] => todo_routes(state, method, rest, body),
        _ => Err(ApiError::NotFound(format!("no route for `{path}`"))),
    }
}

fn health() -> ApiResult {
    ApiResponse::json(
        StatusCode::OK,
        &serde_json::json!({ "status": "ok", "version": core_version() }),
    )
}

fn expense_routes(
    state: &AppState,
    method: &Method,
    rest: &[&str],
    query: Option<&str>,
    body: &[u8],
) -> ApiResult {
    let service = &state.expenses;
    match (method, rest) {
        (&Method::GET, []) => ApiResponse::json(StatusCode::OK, &service.list_expenses()),
        (&Method::POST, []) => {
            let draft: ExpenseDraft = parse_body(body)?;
            ApiResponse::json(StatusCode::CREATED, &service.create_expense(draft)?)
        }
        (&Method::GET, ["monthly-report"]) => {
            ApiResponse::json(StatusCode::OK, &service.monthly_report())
        }
        (&Method::GET, ["compare"]) => {
            let params = parse_query(query)?;
            let comparison =
                service.compare_months(params.month1.as_deref(), params.month2.as_deref())?;
            ApiResponse::json(StatusCode::OK, &comparison)
        }
        (&Method::GET, ["recurring"]) => {
            let params = parse_query(query)?;
            ApiResponse::json(
                StatusCode::OK,
                &service.recurring_expenses(params.months.as_deref())?,
            )
        }
        (&Method::GET, ["tags"]) => {
            let params = parse_query(query)?;
            ApiResponse::json(StatusCode::OK, &service.expense_tags(params.months.as_deref())?)
        }
        (&Method::GET, [id]) => ApiResponse::json(StatusCode::OK, &service.get_expense(id)?),
        (&Method::PUT, [id]) => {
            let patch: ExpensePatch = parse_body(body)?;
            ApiResponse::json(StatusCode::OK, &service.update_expense(id, patch)?)
        }
        (&Method::DELETE, [id]) => {
            service.delete_expense(id)?;
            Ok(ApiResponse::no_content())
        }
        (_, [] | [_]) => Err(ApiError::MethodNotAllowed),
        _ => Err(ApiError::NotFound("no such expense route".to_string())),
    }
}

fn todo_routes(state: &AppState, method: &Method, rest: &[&str], body: &[u8]) -> ApiResult {
    let service = &state.todos;
    match (method, rest) {
        (&Method::GET, []) => ApiResponse::json(StatusCode::OK, &service.list_todos()),
        (&Method::POST, []) => {
            let draft: TodoDraft = parse_body(body)?;
            ApiResponse::json(StatusCode::CREATED, &service.create_todo(draft)?)
        }
        (&Method::GET, [id]) => ApiResponse::json(StatusCode::OK, &service.get_todo(id)?),
        (&Method::PUT, [id]) => {
            let patch: TodoPatch = parse_body(body)?;
            ApiResponse::json(StatusCode::OK, &service.update_todo(id, patch)?)
        }
        (&Method::DELETE, [id]) => {
            service.delete_todo(id)?;
            Ok(ApiResponse::no_content())
        }
        (_, [] | [_]) => Err(ApiError::MethodNotAllowed),
        _ => Err(ApiError::NotFound("no such todo route".to_string())),
    }
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|err| ApiError::BadRequest(format!("invalid JSON body: {err}")))
}

fn parse_query(query: Option<&str>) -> Result<ReportQuery, ApiError> {
    serde_urlencoded::from_str(query.unwrap_or(""))
        .map_err(|err| ApiError::BadRequest(format!("invalid query string: {err}")))
}
