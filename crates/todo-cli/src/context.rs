use std::path::Path;
use todo_core::{AppConfig, TodoResult};
use todo_domain::{Snapshot, ThemePreference, TodoStore};
use todo_persistence::{JsonFileStore, StateRepository};

pub struct CliContext {
    pub store: TodoStore,
    pub theme: ThemePreference,
    repository: StateRepository<JsonFileStore>,
}

impl CliContext {
    /// Never fails: unreadable state starts empty.
    pub async fn load(file_path: &Path, config: &AppConfig) -> Self {
        let repository = StateRepository::new(JsonFileStore::new(file_path));
        let snapshot = repository.load().await;
        let theme = snapshot.theme(config.prefer_dark);

        tracing::debug!(
            "Loaded {} todos from {}",
            snapshot.todos.len(),
            file_path.display()
        );

        Self {
            store: snapshot.into_store(),
            theme,
            repository,
        }
    }

    pub async fn save(&self) -> TodoResult<()> {
        let snapshot = Snapshot::capture(&self.store, &self.theme);
        if let Some(metadata) = self.repository.save(&snapshot).await? {
            tracing::debug!(
                "Saved {} todos to {} at {}",
                snapshot.todos.len(),
                self.repository.store().path().display(),
                metadata.saved_at
            );
        }
        Ok(())
    }
}
