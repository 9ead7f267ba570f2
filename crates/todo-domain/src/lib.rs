pub mod commands;
pub mod drag;
pub mod editable;
pub mod field_update;
pub mod filter;
pub mod operations;
pub mod preferences;
pub mod reorder;
pub mod snapshot;
pub mod store;
pub mod todo;

pub use drag::{resolve_drag, DragAction, DropTarget, DropZone};
pub use editable::{DraftField, FieldError, TodoDraft, ValidationErrors};
pub use field_update::FieldUpdate;
pub use filter::{OverdueFilter, StatusFilter, TodoFilter};
pub use operations::TodoOperations;
pub use preferences::{ThemePreference, ThemeSource};
pub use reorder::reorder_within_view;
pub use snapshot::Snapshot;
pub use store::TodoStore;
pub use todo::{NewTodo, Todo, TodoId, TodoUpdate};
