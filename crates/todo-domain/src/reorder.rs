//! Reordering inside a filtered view.
//!
//! Indices coming from the view layer address the filtered subsequence, not
//! the master collection. The move is applied to that subsequence and the
//! master order is rebuilt from it: the reordered view first, then every
//! entry outside the view in its previous relative order.

use crate::filter::TodoFilter;
use crate::Todo;
use std::collections::HashSet;

/// Move the view entry at `source` to `target` and rebuild `todos`.
///
/// Returns `false` and leaves `todos` untouched when either index is out of
/// bounds for the filtered subsequence.
pub fn reorder_within_view<F>(
    todos: &mut Vec<Todo>,
    filter: &F,
    source: usize,
    target: usize,
) -> bool
where
    F: TodoFilter + ?Sized,
{
    let mut view: Vec<usize> = todos
        .iter()
        .enumerate()
        .filter(|(_, todo)| filter.matches(todo))
        .map(|(index, _)| index)
        .collect();

    if source >= view.len() || target >= view.len() {
        return false;
    }

    let moved = view.remove(source);
    view.insert(target, moved);

    let in_view: HashSet<usize> = view.iter().copied().collect();
    let order: Vec<usize> = view
        .into_iter()
        .chain((0..todos.len()).filter(|index| !in_view.contains(index)))
        .collect();

    let mut slots: Vec<Option<Todo>> = std::mem::take(todos).into_iter().map(Some).collect();
    *todos = order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect();
    true
}
