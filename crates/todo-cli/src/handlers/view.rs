use super::views;
use crate::cli::{FilterAction, ThemeAction};
use crate::context::CliContext;
use crate::output;
use serde::Serialize;
use todo_domain::{StatusFilter, ThemeSource, TodoOperations};

#[derive(Serialize)]
struct FilterState {
    filter: StatusFilter,
    count: usize,
    total: usize,
}

#[derive(Serialize)]
struct ThemeState {
    dark: bool,
    source: ThemeSource,
}

pub async fn handle_filter(ctx: &mut CliContext, action: FilterAction) -> anyhow::Result<()> {
    match action {
        FilterAction::Show => output::output_success(FilterState {
            filter: ctx.store.filter(),
            count: ctx.store.filtered_view().len(),
            total: ctx.store.len(),
        }),
        FilterAction::Set { filter } => {
            let view = output::or_exit(ctx.store.change_filter(filter));
            ctx.save().await?;
            output::output_success(serde_json::json!({
                "filter": filter,
                "items": views(&view),
                "count": view.len(),
            }))
        }
    }
}

pub async fn handle_theme(ctx: &mut CliContext, action: ThemeAction) -> anyhow::Result<()> {
    match action {
        ThemeAction::Show => {}
        ThemeAction::Toggle => {
            let dark = ctx.theme.toggle();
            tracing::debug!("Dark mode toggled to {}", dark);
            ctx.save().await?;
        }
        ThemeAction::Set { dark } => {
            ctx.theme.set(dark);
            ctx.save().await?;
        }
    }
    output::output_success(ThemeState {
        dark: ctx.theme.is_dark(),
        source: ctx.theme.source(),
    })
}
