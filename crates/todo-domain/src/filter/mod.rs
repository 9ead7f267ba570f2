//! Todo filtering.
//!
//! `StatusFilter` is the view selector driving the filtered subsequence;
//! the `TodoFilter` trait lets other predicates share the same call sites.

pub mod todo_filter;

pub use todo_filter::{OverdueFilter, StatusFilter, TodoFilter};
