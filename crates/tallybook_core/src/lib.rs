//! Core domain logic for Tallybook.
//! This crate is the single source of truth for record rules and reports.

pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogSettings};
pub use model::expense::{
    AmountInput, Expense, ExpenseDraft, ExpensePatch, ExpenseValidationError,
};
pub use model::todo::{Todo, TodoDraft, TodoPatch, TodoValidationError};
pub use model::RecordId;
pub use report::aggregate::{
    compare_months, monthly_report, recurring_expenses, ComparedMonth, MonthComparison,
    MonthlyBucket, MonthlyReport,
};
pub use report::period::{MonthKey, ReportParamError};
pub use report::tags::extract_tags;
pub use report::template::{ExpenseTemplate, TemplateKey};
pub use repo::json_file::JsonFileStore;
pub use repo::memory::MemoryStore;
pub use repo::record_store::{RecordStore, StoreError, StoreResult};
pub use service::error::{ServiceError, ServiceResult};
pub use service::expense_service::{local_today, Clock, ExpenseService};
pub use service::todo_service::TodoService;

/// File name of the expense collection inside a data directory.
pub const EXPENSES_FILE_NAME: &str = "expenses.json";
/// File name of the todo collection inside a data directory.
pub const TODOS_FILE_NAME: &str = "todos.json";

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
