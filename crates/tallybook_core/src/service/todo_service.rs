//! Todo use-case service.
//!
//! # Invariants
//! - Creation order is preserved; new todos are appended.
//! - Updates never change `id` or `created_at`.

use super::error::{ServiceError, ServiceResult};
use crate::model::todo::{Todo, TodoDraft, TodoPatch};
use crate::repo::record_store::RecordStore;
use log::info;

const RECORD_KIND: &str = "todo";

/// Service facade over a todo store.
pub struct TodoService<S: RecordStore<Todo>> {
    store: S,
}

impl<S: RecordStore<Todo>> TodoService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn list_todos(&self) -> Vec<Todo> {
        self.store.load()
    }

    pub fn get_todo(&self, id: &str) -> ServiceResult<Todo> {
        self.store
            .load()
            .into_iter()
            .find(|todo| todo.id == id)
            .ok_or_else(|| ServiceError::not_found(RECORD_KIND, id))
    }

    pub fn create_todo(&self, draft: TodoDraft) -> ServiceResult<Todo> {
        let todo = Todo::from_draft(draft)?;
        let mut todos = self.store.load();
        todos.push(todo.clone());
        self.store.save(&todos)?;

        info!(
            "event=todo_create module=service status=ok id={} total_records={}",
            todo.id,
            todos.len()
        );
        Ok(todo)
    }

    pub fn update_todo(&self, id: &str, patch: TodoPatch) -> ServiceResult<Todo> {
        let mut todos = self.store.load();
        let todo = todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or_else(|| ServiceError::not_found(RECORD_KIND, id))?;

        todo.apply_patch(patch);
        let updated = todo.clone();
        self.store.save(&todos)?;

        info!("event=todo_update module=service status=ok id={id}");
        Ok(updated)
    }

    pub fn delete_todo(&self, id: &str) -> ServiceResult<()> {
        let mut todos = self.store.load();
        let before = todos.len();
        todos.retain(|todo| todo.id != id);
        if todos.len() == before {
            return Err(ServiceError::not_found(RECORD_KIND, id));
        }

        self.store.save(&todos)?;
        info!("event=todo_delete module=service status=ok id={id}");
        Ok(())
    }
}
