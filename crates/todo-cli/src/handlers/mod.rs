pub mod arrange;
pub mod todo;
pub mod view;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use todo_domain::Todo;

/// A todo as printed by the CLI, with its derived overdue flag.
#[derive(Serialize)]
pub struct TodoView<'a> {
    #[serde(flatten)]
    pub todo: &'a Todo,
    pub overdue: bool,
}

impl<'a> TodoView<'a> {
    pub fn new(todo: &'a Todo, today: NaiveDate) -> Self {
        Self {
            todo,
            overdue: todo.is_overdue(today),
        }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn views<'a>(todos: impl IntoIterator<Item = &'a Todo>) -> Vec<TodoView<'a>> {
    let today = today();
    todos
        .into_iter()
        .map(|todo| TodoView::new(todo, today))
        .collect()
}
