//! The authoritative todo collection.
//!
//! `TodoStore` owns the ordered list of todos and the active view filter.
//! Every mutation goes through a [`Command`]; the plain operations
//! (`add`, `edit`, `remove`, ...) treat a rejected command as a no-op, while
//! [`TodoOperations`](crate::TodoOperations) surfaces the rejection as an
//! error for callers that need to report it.

use crate::commands::{
    AddTodo, Command, CommandContext, DropTodo, EditTodo, RemoveTodo, ReorderTodos, SetFilter,
    ToggleTodo,
};
use crate::drag::{resolve_drag, DragAction, DropTarget};
use crate::filter::{StatusFilter, TodoFilter};
use crate::{NewTodo, Todo, TodoId, TodoUpdate};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use todo_core::TodoResult;

#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    todos: Vec<Todo>,
    filter: StatusFilter,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded data. Entries with a blank title or
    /// repeating an earlier id are dropped.
    pub fn from_parts(todos: Vec<Todo>, filter: StatusFilter) -> Self {
        let mut seen = HashSet::new();
        let todos = todos
            .into_iter()
            .filter(|todo| {
                if todo.title.trim().is_empty() {
                    tracing::warn!(id = %todo.id, "Dropping todo with blank title");
                    return false;
                }
                let fresh = seen.insert(todo.id.clone());
                if !fresh {
                    tracing::warn!(id = %todo.id, "Dropping todo with duplicate id");
                }
                fresh
            })
            .collect();
        Self { todos, filter }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    /// The todos matching the active filter, in master order.
    pub fn filtered_view(&self) -> Vec<&Todo> {
        self.filter.apply(&self.todos)
    }

    pub fn execute(&mut self, command: &dyn Command) -> TodoResult<()> {
        tracing::debug!("Executing: {}", command.description());
        let mut context = CommandContext {
            todos: &mut self.todos,
            filter: &mut self.filter,
        };
        command.execute(&mut context)
    }

    /// Append a new todo; `None` when the title is blank.
    pub fn add(&mut self, fields: NewTodo) -> Option<TodoId> {
        let command = self.add_command(fields);
        let id = command.id.clone();
        self.apply(&command).then_some(id)
    }

    pub fn edit(&mut self, id: &TodoId, updates: TodoUpdate) -> bool {
        self.apply(&EditTodo {
            id: id.clone(),
            updates,
        })
    }

    pub fn remove(&mut self, id: &TodoId) -> bool {
        self.apply(&RemoveTodo { id: id.clone() })
    }

    /// Flip completion; the active filter follows the new state. Returns the
    /// new `completed` value.
    pub fn toggle_complete(&mut self, id: &TodoId) -> Option<bool> {
        if !self.apply(&ToggleTodo { id: id.clone() }) {
            return None;
        }
        self.get(id).map(|todo| todo.completed)
    }

    /// Reorder within the filtered view; out-of-bounds indices are rejected.
    pub fn reorder(&mut self, source: usize, target: usize) -> bool {
        self.apply(&ReorderTodos { source, target })
    }

    pub fn set_completed_by_drop(&mut self, id: &TodoId, completed: bool) -> bool {
        self.apply(&DropTodo {
            id: id.clone(),
            completed,
        })
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.apply(&SetFilter { filter });
    }

    /// Resolve a finished drag against the current view and apply it.
    pub fn apply_drag(&mut self, active: &TodoId, over: &DropTarget) -> Option<DragAction> {
        let action = resolve_drag(&self.todos, self.filter, active, over)?;
        let applied = match &action {
            DragAction::Reorder { source, target } => self.reorder(*source, *target),
            DragAction::Drop { id, completed } => self.set_completed_by_drop(id, *completed),
        };
        applied.then_some(action)
    }

    pub(crate) fn add_command(&self, fields: NewTodo) -> AddTodo {
        AddTodo {
            id: self.fresh_id(),
            fields,
            created_at: self.next_created_at(),
        }
    }

    fn apply(&mut self, command: &dyn Command) -> bool {
        match self.execute(command) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("Ignored '{}': {}", command.description(), e);
                false
            }
        }
    }

    fn fresh_id(&self) -> TodoId {
        loop {
            let id = TodoId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    // Never earlier than the newest existing entry, even if the clock steps back.
    fn next_created_at(&self) -> DateTime<Utc> {
        let now = Utc::now();
        self.todos
            .iter()
            .map(|todo| todo.created_at)
            .max()
            .map_or(now, |latest| latest.max(now))
    }
}
