//! Shared per-process service state.

use std::path::Path;
use tallybook_core::{
    Clock, Expense, ExpenseService, JsonFileStore, Todo, TodoService, EXPENSES_FILE_NAME,
    TODOS_FILE_NAME,
};

/// Services for both collections, each backed by its own JSON file.
pub struct AppState {
    pub expenses: ExpenseService<JsonFileStore<Expense>>,
    pub todos: TodoService<JsonFileStore<Todo>>,
}

impl AppState {
    /// Opens the two collections under `data_dir`.
    ///
    /// Files are created lazily on first save.
    pub fn open(data_dir: &Path) -> Self {
        Self {
            expenses: ExpenseService::new(JsonFileStore::new(data_dir.join(EXPENSES_FILE_NAME))),
            todos: TodoService::new(JsonFileStore::new(data_dir.join(TODOS_FILE_NAME))),
        }
    }

    /// Replaces the clock used by window reports.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.expenses = self.expenses.with_clock(clock);
        self
    }
}
