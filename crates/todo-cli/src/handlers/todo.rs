use super::{today, views, TodoView};
use crate::cli::{AddArgs, EditArgs, ListArgs, TodoAction};
use crate::context::CliContext;
use crate::output;
use serde::Serialize;
use todo_core::{Editable, TodoError};
use todo_domain::{
    OverdueFilter, StatusFilter, Todo, TodoDraft, TodoFilter, TodoId, TodoOperations,
};

#[derive(Serialize)]
struct Listing<'a> {
    filter: StatusFilter,
    items: Vec<TodoView<'a>>,
    count: usize,
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    all: Option<Vec<TodoView<'a>>>,
}

#[derive(Serialize)]
struct Toggled<'a> {
    todo: TodoView<'a>,
    filter: StatusFilter,
}

pub async fn handle(ctx: &mut CliContext, action: TodoAction) -> anyhow::Result<()> {
    match action {
        TodoAction::Add(args) => {
            let fields =
                output::or_exit(build_draft(args).into_new_todo().map_err(TodoError::from));
            let todo = output::or_exit(ctx.store.create_todo(fields));
            ctx.save().await?;
            output::output_success(TodoView::new(&todo, today()))
        }
        TodoAction::List(args) => list(ctx, args),
        TodoAction::Get { id } => {
            let id = TodoId::from(id);
            match output::or_exit(ctx.store.get_todo(&id)) {
                Some(todo) => output::output_success(TodoView::new(&todo, today())),
                None => not_found(&id),
            }
        }
        TodoAction::Edit(args) => {
            let id = TodoId::from(args.id.clone());
            let current =
                output::or_exit(ctx.store.get_todo(&id)).unwrap_or_else(|| not_found(&id));

            let updates = output::or_exit(
                edit_draft(&current, args)
                    .into_update()
                    .map_err(TodoError::from),
            );
            let todo = output::or_exit(ctx.store.update_todo(&id, updates));
            ctx.save().await?;
            output::output_success(TodoView::new(&todo, today()))
        }
        TodoAction::Remove { id } => {
            let id = TodoId::from(id);
            output::or_exit(ctx.store.delete_todo(&id));
            ctx.save().await?;
            output::output_success(serde_json::json!({ "removed": id }))
        }
        TodoAction::Toggle { id } => {
            let todo = output::or_exit(ctx.store.toggle_todo(&TodoId::from(id)));
            ctx.save().await?;
            output::output_success(Toggled {
                todo: TodoView::new(&todo, today()),
                filter: ctx.store.filter(),
            })
        }
    }
}

fn list(ctx: &CliContext, args: ListArgs) -> anyhow::Result<()> {
    let mut listed: Vec<Todo> = match args.filter {
        Some(filter) => filter.apply(ctx.store.todos()).into_iter().cloned().collect(),
        None => output::or_exit(ctx.store.list_todos()),
    };
    if args.overdue {
        let overdue = OverdueFilter::new(today());
        listed.retain(|todo| overdue.matches(todo));
    }

    let items = views(&listed);
    output::output_success(Listing {
        filter: args.filter.unwrap_or_else(|| ctx.store.filter()),
        count: items.len(),
        items,
        total: ctx.store.len(),
        all: args.all.then(|| views(ctx.store.todos())),
    })
}

fn not_found(id: &TodoId) -> ! {
    output::output_error(&TodoError::NotFound(id.to_string()).to_string())
}

fn build_draft(args: AddArgs) -> TodoDraft {
    TodoDraft {
        title: args.title,
        description: args.description.unwrap_or_default(),
        due_date: args.due_date.unwrap_or_default(),
    }
}

/// The edit form: start from the stored todo, overlay what was given.
fn edit_draft(current: &Todo, args: EditArgs) -> TodoDraft {
    let mut draft = TodoDraft::from_entity(current);
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }
    if let Some(due_date) = args.due_date {
        draft.due_date = due_date;
    }
    if args.clear_description {
        draft.description.clear();
    }
    if args.clear_due_date {
        draft.due_date.clear();
    }
    draft
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use todo_domain::NewTodo;

    fn edit_args(id: &str) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            title: None,
            description: None,
            due_date: None,
            clear_description: false,
            clear_due_date: false,
        }
    }

    fn stored() -> Todo {
        let fields = NewTodo {
            title: "Buy milk".to_string(),
            description: Some("2 litres".to_string()),
            due_date: NaiveDate::from_ymd_opt(2026, 3, 1),
        };
        Todo::new(TodoId::from("1"), fields, Utc::now()).unwrap()
    }

    #[test]
    fn test_edit_draft_keeps_untouched_fields() {
        let mut args = edit_args("1");
        args.title = Some("Buy oat milk".to_string());

        let draft = edit_draft(&stored(), args);
        assert_eq!(draft.title, "Buy oat milk");
        assert_eq!(draft.description, "2 litres");
        assert_eq!(draft.due_date, "2026-03-01");
    }

    #[test]
    fn test_edit_draft_clears() {
        let mut args = edit_args("1");
        args.clear_description = true;
        args.clear_due_date = true;

        let updates = edit_draft(&stored(), args).into_update().unwrap();
        let mut todo = stored();
        todo.update(updates);
        assert_eq!(todo.description, None);
        assert_eq!(todo.due_date, None);
        assert_eq!(todo.title, "Buy milk");
    }

    #[test]
    fn test_add_draft_rejects_bad_due_date() {
        let draft = build_draft(AddArgs {
            title: "Pay rent".to_string(),
            description: None,
            due_date: Some("03/01/2026".to_string()),
        });
        assert!(draft.into_new_todo().is_err());
    }
}
