//! Expense use-case service.
//!
//! # Responsibility
//! - CRUD over the expense collection.
//! - Parameter parsing and dispatch for the four expense reports.
//!
//! # Invariants
//! - Updates and deletes fail with `NotFound` before anything is saved.
//! - Reports read one snapshot per call and never write.
//! - Window reports evaluate "today" through the injected clock.

use super::error::{ServiceError, ServiceResult};
use crate::model::expense::{Expense, ExpenseDraft, ExpensePatch};
use crate::report::aggregate::{compare_months, monthly_report, recurring_expenses};
use crate::report::aggregate::{MonthComparison, MonthlyReport};
use crate::report::period::{
    parse_month_param, parse_window_months, DEFAULT_RECURRING_WINDOW_MONTHS,
    DEFAULT_TAG_WINDOW_MONTHS,
};
use crate::report::tags::extract_tags;
use crate::report::template::ExpenseTemplate;
use crate::repo::record_store::RecordStore;
use chrono::{Local, NaiveDate};
use log::{info, warn};

const RECORD_KIND: &str = "expense";

/// Source of the current calendar date for window reports.
pub type Clock = fn() -> NaiveDate;

/// Current date in the process-local time zone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Service facade over an expense store.
pub struct ExpenseService<S: RecordStore<Expense>> {
    store: S,
    clock: Clock,
}

impl<S: RecordStore<Expense>> ExpenseService<S> {
    /// Creates a service using the local-date clock.
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: local_today,
        }
    }

    /// Replaces the clock used by window reports.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn list_expenses(&self) -> Vec<Expense> {
        self.store.load()
    }

    pub fn get_expense(&self, id: &str) -> ServiceResult<Expense> {
        self.store
            .load()
            .into_iter()
            .find(|expense| expense.id == id)
            .ok_or_else(|| ServiceError::not_found(RECORD_KIND, id))
    }

    /// Validates and appends a new expense.
    pub fn create_expense(&self, draft: ExpenseDraft) -> ServiceResult<Expense> {
        let expense = Expense::from_draft(draft).inspect_err(|_| {
            warn!("event=expense_create module=service status=rejected error_code=invalid_input");
        })?;

        let mut expenses = self.store.load();
        expenses.push(expense.clone());
        self.store.save(&expenses)?;

        info!(
            "event=expense_create module=service status=ok id={} total_records={}",
            expense.id,
            expenses.len()
        );
        Ok(expense)
    }

    /// Merges `patch` into the expense with `id`.
    pub fn update_expense(&self, id: &str, patch: ExpensePatch) -> ServiceResult<Expense> {
        let mut expenses = self.store.load();
        let expense = expenses
            .iter_mut()
            .find(|expense| expense.id == id)
            .ok_or_else(|| ServiceError::not_found(RECORD_KIND, id))?;

        expense.apply_patch(patch)?;
        let updated = expense.clone();
        self.store.save(&expenses)?;

        info!("event=expense_update module=service status=ok id={id}");
        Ok(updated)
    }

    pub fn delete_expense(&self, id: &str) -> ServiceResult<()> {
        let mut expenses = self.store.load();
        let before = expenses.len();
        expenses.retain(|expense| expense.id != id);
        if expenses.len() == before {
            return Err(ServiceError::not_found(RECORD_KIND, id));
        }

        self.store.save(&expenses)?;
        info!("event=expense_delete module=service status=ok id={id}");
        Ok(())
    }

    pub fn monthly_report(&self) -> MonthlyReport {
        monthly_report(&self.store.load())
    }

    /// Compares two `YYYY-MM` months given as raw query values.
    pub fn compare_months(
        &self,
        month1: Option<&str>,
        month2: Option<&str>,
    ) -> ServiceResult<MonthComparison> {
        let month1 = parse_month_param("month1", month1)?;
        let month2 = parse_month_param("month2", month2)?;
        Ok(compare_months(&self.store.load(), &month1, &month2))
    }

    /// Recurring templates over a trailing window (default 3 months).
    pub fn recurring_expenses(&self, months: Option<&str>) -> ServiceResult<Vec<ExpenseTemplate>> {
        let months = parse_window_months(months, DEFAULT_RECURRING_WINDOW_MONTHS)?;
        Ok(recurring_expenses(&self.store.load(), months, (self.clock)()))
    }

    /// Distinct recent templates over a trailing window (default 2 months).
    pub fn expense_tags(&self, months: Option<&str>) -> ServiceResult<Vec<ExpenseTemplate>> {
        let months = parse_window_months(months, DEFAULT_TAG_WINDOW_MONTHS)?;
        Ok(extract_tags(&self.store.load(), months, (self.clock)()))
    }
}
