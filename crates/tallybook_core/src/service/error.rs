//! Error taxonomy shared by all services.

use crate::model::expense::ExpenseValidationError;
use crate::model::todo::TodoValidationError;
use crate::report::period::ReportParamError;
use crate::repo::record_store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case level failure.
#[derive(Debug)]
pub enum ServiceError {
    /// Missing or malformed caller input. Never worth retrying.
    InvalidRequest(String),
    /// No record in the collection carries the requested id.
    NotFound { kind: &'static str, id: String },
    /// Persistence failure while saving a collection.
    Storage(StoreError),
}

impl ServiceError {
    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest(message) => write!(f, "{message}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value)
    }
}

impl From<ExpenseValidationError> for ServiceError {
    fn from(value: ExpenseValidationError) -> Self {
        Self::InvalidRequest(value.to_string())
    }
}

impl From<TodoValidationError> for ServiceError {
    fn from(value: TodoValidationError) -> Self {
        Self::InvalidRequest(value.to_string())
    }
}

impl From<ReportParamError> for ServiceError {
    fn from(value: ReportParamError) -> Self {
        Self::InvalidRequest(value.to_string())
    }
}
