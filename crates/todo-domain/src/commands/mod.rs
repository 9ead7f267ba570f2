use crate::{StatusFilter, Todo};
use todo_core::TodoResult;

pub mod todo_commands;
pub mod view_commands;

pub use todo_commands::*;
pub use view_commands::*;

/// Trait for commands that mutate the store.
///
/// A command that returns an error must leave the context untouched, so a
/// rejected command is a no-op.
pub trait Command: Send + Sync {
    fn execute(&self, context: &mut CommandContext) -> TodoResult<()>;

    fn description(&self) -> String;
}

/// Mutable view of the store handed to commands.
pub struct CommandContext<'a> {
    pub todos: &'a mut Vec<Todo>,
    pub filter: &'a mut StatusFilter,
}

impl CommandContext<'_> {
    pub(crate) fn find_mut(&mut self, id: &crate::TodoId) -> TodoResult<&mut Todo> {
        self.todos
            .iter_mut()
            .find(|todo| &todo.id == id)
            .ok_or_else(|| todo_core::TodoError::NotFound(id.to_string()))
    }
}
