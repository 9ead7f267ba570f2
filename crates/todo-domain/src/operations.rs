use crate::commands::{DropTodo, EditTodo, RemoveTodo, ReorderTodos, SetFilter, ToggleTodo};
use crate::drag::{resolve_drag, DragAction, DropTarget, DropZone};
use crate::{NewTodo, StatusFilter, Todo, TodoId, TodoStore, TodoUpdate};
use todo_core::{TodoError, TodoResult};

/// Store operations that report why a request was rejected.
///
/// The no-op variants on [`TodoStore`] suit an interactive view; front ends
/// that need to tell the user what went wrong use these instead.
pub trait TodoOperations {
    fn create_todo(&mut self, fields: NewTodo) -> TodoResult<Todo>;
    fn list_todos(&self) -> TodoResult<Vec<Todo>>;
    fn get_todo(&self, id: &TodoId) -> TodoResult<Option<Todo>>;
    fn update_todo(&mut self, id: &TodoId, updates: TodoUpdate) -> TodoResult<Todo>;
    fn delete_todo(&mut self, id: &TodoId) -> TodoResult<()>;
    fn toggle_todo(&mut self, id: &TodoId) -> TodoResult<Todo>;
    fn reorder_todos(&mut self, source: usize, target: usize) -> TodoResult<Vec<Todo>>;
    fn drop_todo(&mut self, id: &TodoId, zone: DropZone) -> TodoResult<Todo>;
    fn drag_todo(&mut self, id: &TodoId, over: &DropTarget) -> TodoResult<Option<DragAction>>;
    fn change_filter(&mut self, filter: StatusFilter) -> TodoResult<Vec<Todo>>;
}

impl TodoStore {
    fn require(&self, id: &TodoId) -> TodoResult<Todo> {
        self.get(id)
            .cloned()
            .ok_or_else(|| TodoError::NotFound(id.to_string()))
    }

    fn view_snapshot(&self) -> Vec<Todo> {
        self.filtered_view().into_iter().cloned().collect()
    }
}

impl TodoOperations for TodoStore {
    fn create_todo(&mut self, fields: NewTodo) -> TodoResult<Todo> {
        let command = self.add_command(fields);
        self.execute(&command)?;
        self.require(&command.id)
    }

    fn list_todos(&self) -> TodoResult<Vec<Todo>> {
        Ok(self.view_snapshot())
    }

    fn get_todo(&self, id: &TodoId) -> TodoResult<Option<Todo>> {
        Ok(self.get(id).cloned())
    }

    fn update_todo(&mut self, id: &TodoId, updates: TodoUpdate) -> TodoResult<Todo> {
        self.execute(&EditTodo {
            id: id.clone(),
            updates,
        })?;
        self.require(id)
    }

    fn delete_todo(&mut self, id: &TodoId) -> TodoResult<()> {
        self.execute(&RemoveTodo { id: id.clone() })
    }

    fn toggle_todo(&mut self, id: &TodoId) -> TodoResult<Todo> {
        self.execute(&ToggleTodo { id: id.clone() })?;
        self.require(id)
    }

    fn reorder_todos(&mut self, source: usize, target: usize) -> TodoResult<Vec<Todo>> {
        self.execute(&ReorderTodos { source, target })?;
        Ok(self.view_snapshot())
    }

    fn drop_todo(&mut self, id: &TodoId, zone: DropZone) -> TodoResult<Todo> {
        self.execute(&DropTodo {
            id: id.clone(),
            completed: zone.is_completed(),
        })?;
        self.require(id)
    }

    fn drag_todo(&mut self, id: &TodoId, over: &DropTarget) -> TodoResult<Option<DragAction>> {
        self.require(id)?;
        if let DropTarget::Item(over_id) = over {
            self.require(over_id)?;
        }
        let Some(action) = resolve_drag(self.todos(), self.filter(), id, over) else {
            return Ok(None);
        };
        match &action {
            DragAction::Reorder { source, target } => self.execute(&ReorderTodos {
                source: *source,
                target: *target,
            })?,
            DragAction::Drop { id, completed } => self.execute(&DropTodo {
                id: id.clone(),
                completed: *completed,
            })?,
        }
        Ok(Some(action))
    }

    fn change_filter(&mut self, filter: StatusFilter) -> TodoResult<Vec<Todo>> {
        self.execute(&SetFilter { filter })?;
        Ok(self.view_snapshot())
    }
}
