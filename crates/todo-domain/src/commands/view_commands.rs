use super::{Command, CommandContext};
use crate::filter::StatusFilter;
use todo_core::TodoResult;

pub struct SetFilter {
    pub filter: StatusFilter,
}

impl Command for SetFilter {
    fn execute(&self, context: &mut CommandContext) -> TodoResult<()> {
        *context.filter = self.filter;
        Ok(())
    }

    fn description(&self) -> String {
        format!("Show {} todos", self.filter)
    }
}
