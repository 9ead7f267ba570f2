use super::{today, views, TodoView};
use crate::cli::ArrangeAction;
use crate::context::CliContext;
use crate::output;
use serde::Serialize;
use todo_domain::{DragAction, StatusFilter, TodoId, TodoOperations};

#[derive(Serialize)]
struct Dropped<'a> {
    todo: TodoView<'a>,
    filter: StatusFilter,
}

#[derive(Serialize)]
struct Dragged<'a> {
    action: Option<DragAction>,
    filter: StatusFilter,
    items: Vec<TodoView<'a>>,
}

pub async fn handle(ctx: &mut CliContext, action: ArrangeAction) -> anyhow::Result<()> {
    match action {
        ArrangeAction::Reorder { from, to } => {
            let view = output::or_exit(ctx.store.reorder_todos(from, to));
            ctx.save().await?;
            output::output_list(views(&view))
        }
        ArrangeAction::Drop { id, zone } => {
            let todo = output::or_exit(ctx.store.drop_todo(&TodoId::from(id), zone));
            ctx.save().await?;
            output::output_success(Dropped {
                todo: TodoView::new(&todo, today()),
                filter: ctx.store.filter(),
            })
        }
        ArrangeAction::Drag { id, over } => {
            let action = output::or_exit(ctx.store.drag_todo(&TodoId::from(id), &over));
            if action.is_some() {
                ctx.save().await?;
            } else {
                tracing::debug!("Drag resolved to no change");
            }
            output::output_success(Dragged {
                action,
                filter: ctx.store.filter(),
                items: views(ctx.store.filtered_view()),
            })
        }
    }
}
