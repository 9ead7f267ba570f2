use super::{Command, CommandContext};
use crate::filter::{StatusFilter, TodoFilter};
use crate::reorder::reorder_within_view;
use crate::{NewTodo, Todo, TodoId, TodoUpdate};
use chrono::{DateTime, Utc};
use todo_core::{TodoError, TodoResult};

/// Append a new pending todo.
pub struct AddTodo {
    pub id: TodoId,
    pub fields: NewTodo,
    pub created_at: DateTime<Utc>,
}

impl Command for AddTodo {
    fn execute(&self, context: &mut CommandContext) -> TodoResult<()> {
        if context.todos.iter().any(|todo| todo.id == self.id) {
            return Err(TodoError::Internal(format!("Duplicate todo id {}", self.id)));
        }
        let todo = Todo::new(self.id.clone(), self.fields.clone(), self.created_at)
            .ok_or_else(|| TodoError::Validation("Title must not be blank".to_string()))?;
        context.todos.push(todo);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Add todo: '{}'", self.fields.title.trim())
    }
}

/// Merge a partial update into an existing todo.
pub struct EditTodo {
    pub id: TodoId,
    pub updates: TodoUpdate,
}

impl Command for EditTodo {
    fn execute(&self, context: &mut CommandContext) -> TodoResult<()> {
        context.find_mut(&self.id)?.update(self.updates.clone());
        Ok(())
    }

    fn description(&self) -> String {
        format!("Edit todo {}", self.id)
    }
}

pub struct RemoveTodo {
    pub id: TodoId,
}

impl Command for RemoveTodo {
    fn execute(&self, context: &mut CommandContext) -> TodoResult<()> {
        let pos = context
            .todos
            .iter()
            .position(|todo| todo.id == self.id)
            .ok_or_else(|| TodoError::NotFound(self.id.to_string()))?;
        context.todos.remove(pos);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Remove todo {}", self.id)
    }
}

/// Flip completion and switch the active filter to the todo's new state.
pub struct ToggleTodo {
    pub id: TodoId,
}

impl Command for ToggleTodo {
    fn execute(&self, context: &mut CommandContext) -> TodoResult<()> {
        let completed = context.find_mut(&self.id)?.toggle();
        *context.filter = StatusFilter::for_completion(completed);
        Ok(())
    }

    fn description(&self) -> String {
        format!("Toggle todo {}", self.id)
    }
}

/// Move an entry within the current filtered view.
pub struct ReorderTodos {
    pub source: usize,
    pub target: usize,
}

impl Command for ReorderTodos {
    fn execute(&self, context: &mut CommandContext) -> TodoResult<()> {
        let filter = *context.filter;
        if reorder_within_view(context.todos, &filter, self.source, self.target) {
            return Ok(());
        }
        let len = filter.apply(context.todos).len();
        let index = if self.source >= len {
            self.source
        } else {
            self.target
        };
        Err(TodoError::InvalidIndex { index, len })
    }

    fn description(&self) -> String {
        format!("Reorder todo {} -> {}", self.source, self.target)
    }
}

/// Set completion from a drop zone and follow it with the filter.
pub struct DropTodo {
    pub id: TodoId,
    pub completed: bool,
}

impl Command for DropTodo {
    fn execute(&self, context: &mut CommandContext) -> TodoResult<()> {
        context.find_mut(&self.id)?.completed = self.completed;
        *context.filter = StatusFilter::for_completion(self.completed);
        Ok(())
    }

    fn description(&self) -> String {
        let zone = if self.completed { "completed" } else { "pending" };
        format!("Drop todo {} into {}", self.id, zone)
    }
}
