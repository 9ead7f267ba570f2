use crate::Todo;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trait for selecting todos.
pub trait TodoFilter {
    /// Returns true if the todo belongs to the filtered view.
    fn matches(&self, todo: &Todo) -> bool;

    /// The ordered subsequence of `todos` matching this filter.
    fn apply<'a>(&self, todos: &'a [Todo]) -> Vec<&'a Todo> {
        todos.iter().filter(|todo| self.matches(todo)).collect()
    }
}

/// The active view selector: `all`, `pending` or `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    /// The filter showing todos in the given completion state.
    pub fn for_completion(completed: bool) -> Self {
        if completed {
            StatusFilter::Completed
        } else {
            StatusFilter::Pending
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Completed => "completed",
        }
    }
}

impl TodoFilter for StatusFilter {
    fn matches(&self, todo: &Todo) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !todo.completed,
            StatusFilter::Completed => todo.completed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "completed" | "done" => Ok(StatusFilter::Completed),
            _ => Err(format!(
                "Invalid filter '{}'. Valid values: all, pending, completed",
                s
            )),
        }
    }
}

/// Pending todos whose due date is before `today`.
pub struct OverdueFilter {
    today: NaiveDate,
}

impl OverdueFilter {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl TodoFilter for OverdueFilter {
    fn matches(&self, todo: &Todo) -> bool {
        todo.is_overdue(self.today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NewTodo, TodoId};
    use chrono::Utc;

    fn todo(id: &str, completed: bool) -> Todo {
        let mut todo = Todo::new(TodoId::from(id), NewTodo::titled(id), Utc::now()).unwrap();
        todo.completed = completed;
        todo
    }

    #[test]
    fn test_status_filter_views() {
        let todos = vec![todo("a", false), todo("b", true), todo("c", false)];

        let ids = |filter: StatusFilter| -> Vec<String> {
            filter
                .apply(&todos)
                .iter()
                .map(|t| t.id.to_string())
                .collect()
        };

        assert_eq!(ids(StatusFilter::All), vec!["a", "b", "c"]);
        assert_eq!(ids(StatusFilter::Pending), vec!["a", "c"]);
        assert_eq!(ids(StatusFilter::Completed), vec!["b"]);
    }

    #[test]
    fn test_parse_status_filter() {
        assert_eq!("Pending".parse::<StatusFilter>(), Ok(StatusFilter::Pending));
        assert_eq!("done".parse::<StatusFilter>(), Ok(StatusFilter::Completed));
        assert_eq!(" all ".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert!("archived".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_for_completion() {
        assert_eq!(StatusFilter::for_completion(true), StatusFilter::Completed);
        assert_eq!(StatusFilter::for_completion(false), StatusFilter::Pending);
    }

    #[test]
    fn test_overdue_filter() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut late = todo("late", false);
        late.due_date = NaiveDate::from_ymd_opt(2024, 2, 1);
        let mut done = todo("done", true);
        done.due_date = NaiveDate::from_ymd_opt(2024, 2, 1);
        let undated = todo("undated", false);

        let filter = OverdueFilter::new(today);
        assert!(filter.matches(&late));
        assert!(!filter.matches(&done));
        assert!(!filter.matches(&undated));
    }
}
