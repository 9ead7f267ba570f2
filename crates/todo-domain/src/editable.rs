//! Form drafts for adding and editing todos.
//!
//! A `TodoDraft` holds raw form input. It is validated field by field and
//! then turned into a `NewTodo` or a `TodoUpdate`; validation problems are
//! returned to the caller as messages, never raised.

use crate::{FieldUpdate, NewTodo, Todo, TodoUpdate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use todo_core::{Editable, TodoError};

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Title,
    Description,
    DueDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: DraftField,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn for_field(&self, field: DraftField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn push(&mut self, field: DraftField, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl From<ValidationErrors> for TodoError {
    fn from(errors: ValidationErrors) -> Self {
        TodoError::Validation(errors.to_string())
    }
}

/// Raw form input. Empty strings mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
}

impl TodoDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(DraftField::Title, "Title is required");
        } else if title.chars().count() > TITLE_MAX_CHARS {
            errors.push(
                DraftField::Title,
                format!("Title must be at most {} characters", TITLE_MAX_CHARS),
            );
        }

        if self.description.trim().chars().count() > DESCRIPTION_MAX_CHARS {
            errors.push(
                DraftField::Description,
                format!(
                    "Description must be at most {} characters",
                    DESCRIPTION_MAX_CHARS
                ),
            );
        }

        if parse_due_date(&self.due_date).is_err() {
            errors.push(
                DraftField::DueDate,
                format!("Invalid due date '{}'. Expected YYYY-MM-DD", self.due_date.trim()),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn into_new_todo(self) -> Result<NewTodo, ValidationErrors> {
        self.validate()?;
        Ok(NewTodo {
            title: self.title.trim().to_string(),
            description: non_empty(&self.description),
            due_date: parse_due_date(&self.due_date).ok().flatten(),
        })
    }

    /// Full-form update: every field is written, blank optional fields clear.
    pub fn into_update(self) -> Result<TodoUpdate, ValidationErrors> {
        self.validate()?;
        let due_date = match parse_due_date(&self.due_date).ok().flatten() {
            Some(date) => FieldUpdate::Set(date),
            None => FieldUpdate::Clear,
        };
        Ok(TodoUpdate {
            title: Some(self.title.trim().to_string()),
            description: FieldUpdate::from_input(Some(self.description.as_str())),
            due_date,
        })
    }
}

impl Editable<Todo> for TodoDraft {
    fn from_entity(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone().unwrap_or_default(),
            due_date: todo
                .due_date
                .map(|d| d.format(DUE_DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    /// Invalid drafts leave the todo as it was, like a form that refuses to save.
    fn apply_to(self, todo: &mut Todo) {
        if let Ok(update) = self.into_update() {
            todo.update(update);
        }
    }
}

/// Blank input is `Ok(None)`.
pub fn parse_due_date(input: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, DUE_DATE_FORMAT).map(Some)
}

fn non_empty(input: &str) -> Option<String> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TodoId;
    use chrono::Utc;

    fn draft(title: &str, description: &str, due_date: &str) -> TodoDraft {
        TodoDraft {
            title: title.to_string(),
            description: description.to_string(),
            due_date: due_date.to_string(),
        }
    }

    #[test]
    fn test_valid_draft_becomes_new_todo() {
        let fields = draft(" Pay rent ", "  ", "2025-02-01").into_new_todo().unwrap();
        assert_eq!(fields.title, "Pay rent");
        assert_eq!(fields.description, None);
        assert_eq!(fields.due_date, NaiveDate::from_ymd_opt(2025, 2, 1));
    }

    #[test]
    fn test_field_level_errors() {
        let long_description = "x".repeat(DESCRIPTION_MAX_CHARS + 1);
        let errors = draft("   ", &long_description, "01/02/2025")
            .validate()
            .unwrap_err();

        assert_eq!(errors.errors().len(), 3);
        assert_eq!(errors.for_field(DraftField::Title), Some("Title is required"));
        assert!(errors.for_field(DraftField::Description).is_some());
        assert!(errors
            .for_field(DraftField::DueDate)
            .unwrap()
            .contains("01/02/2025"));
    }

    #[test]
    fn test_title_length_limit_counts_chars() {
        let at_limit = "é".repeat(TITLE_MAX_CHARS);
        assert!(draft(&at_limit, "", "").validate().is_ok());

        let over = "é".repeat(TITLE_MAX_CHARS + 1);
        let errors = draft(&over, "", "").validate().unwrap_err();
        assert!(errors.for_field(DraftField::Title).is_some());
    }

    #[test]
    fn test_edit_form_roundtrip_clears_blank_fields() {
        let mut todo = Todo::new(
            TodoId::from("1"),
            NewTodo {
                title: "Dentist".to_string(),
                description: Some("Bring card".to_string()),
                due_date: NaiveDate::from_ymd_opt(2025, 5, 4),
            },
            Utc::now(),
        )
        .unwrap();

        let mut form = TodoDraft::from_entity(&todo);
        assert_eq!(form.due_date, "2025-05-04");
        assert_eq!(form.description, "Bring card");

        form.title = "Dentist appointment".to_string();
        form.description.clear();
        form.due_date.clear();
        form.apply_to(&mut todo);

        assert_eq!(todo.title, "Dentist appointment");
        assert!(todo.description.is_none());
        assert!(todo.due_date.is_none());
    }

    #[test]
    fn test_invalid_form_does_not_save() {
        let mut todo =
            Todo::new(TodoId::from("1"), NewTodo::titled("Keep me"), Utc::now()).unwrap();
        let mut form = TodoDraft::from_entity(&todo);
        form.title = " ".to_string();
        form.apply_to(&mut todo);
        assert_eq!(todo.title, "Keep me");
    }

    #[test]
    fn test_validation_errors_convert_to_todo_error() {
        let errors = draft("", "", "").validate().unwrap_err();
        let err: TodoError = errors.into();
        assert_eq!(err.to_string(), "Validation error: Title is required");
    }
}
