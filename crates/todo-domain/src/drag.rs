//! Drag-and-drop resolution.
//!
//! Todos are rendered in two drop zones, pending and completed. A drag ends
//! over either a zone or another todo; dropping inside the item's own zone
//! reorders, crossing zones changes the completion state.

use crate::filter::{StatusFilter, TodoFilter};
use crate::{Todo, TodoId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropZone {
    Pending,
    Completed,
}

impl DropZone {
    pub fn of(todo: &Todo) -> Self {
        if todo.completed {
            DropZone::Completed
        } else {
            DropZone::Pending
        }
    }

    pub fn is_completed(self) -> bool {
        matches!(self, DropZone::Completed)
    }
}

impl fmt::Display for DropZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropZone::Pending => f.write_str("pending"),
            DropZone::Completed => f.write_str("completed"),
        }
    }
}

impl FromStr for DropZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(DropZone::Pending),
            "completed" | "done" => Ok(DropZone::Completed),
            _ => Err(format!(
                "Invalid zone '{}'. Valid values: pending, completed",
                s
            )),
        }
    }
}

/// Where a drag ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Zone(DropZone),
    Item(TodoId),
}

impl FromStr for DropTarget {
    type Err = String;

    /// Zone names parse as zones, anything else as a todo id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Drop target must not be empty".to_string());
        }
        Ok(s.parse::<DropZone>()
            .map(DropTarget::Zone)
            .unwrap_or_else(|_| DropTarget::Item(TodoId::from(s))))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DragAction {
    Reorder { source: usize, target: usize },
    Drop { id: TodoId, completed: bool },
}

/// Decide what a finished drag means. `None` when nothing should change.
pub fn resolve_drag(
    todos: &[Todo],
    filter: StatusFilter,
    active: &TodoId,
    over: &DropTarget,
) -> Option<DragAction> {
    let dragged = todos.iter().find(|todo| &todo.id == active)?;
    let from_zone = DropZone::of(dragged);

    let to_zone = match over {
        DropTarget::Zone(zone) => *zone,
        DropTarget::Item(over_id) => {
            let over_todo = todos.iter().find(|todo| &todo.id == over_id)?;
            let zone = DropZone::of(over_todo);
            if zone == from_zone {
                if over_id == active {
                    return None;
                }
                let view = filter.apply(todos);
                let source = view.iter().position(|todo| &todo.id == active)?;
                let target = view.iter().position(|todo| &todo.id == over_id)?;
                return Some(DragAction::Reorder { source, target });
            }
            zone
        }
    };

    if to_zone == from_zone {
        return None;
    }
    Some(DragAction::Drop {
        id: active.clone(),
        completed: to_zone.is_completed(),
    })
}
