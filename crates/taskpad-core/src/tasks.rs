//! Task list controller.
//!
//! The in-memory list is a full replica of server state at the last refresh:
//! every successful mutation is followed by a full re-fetch instead of a
//! local patch, so the visible set always reflects one consistent server
//! snapshot. A failed mutation leaves the list untouched; only the next
//! successful refresh changes it.

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::models::{Task, TaskPatch};
use crate::session::SessionManager;

/// In-memory replica of the current user's task collection.
///
/// Every operation requires an authenticated session and goes through the
/// service client; the credential store is never touched from here.
pub struct TaskList {
    client: ApiClient,
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            tasks: Vec::new(),
        }
    }

    /// The collection as of the last successful refresh, in service order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Replaces the whole list with the service's current view.
    ///
    /// # Errors
    /// `Error::InvalidSession` while anonymous; `Error::Request` on a failed
    /// fetch (the list keeps its prior contents).
    pub async fn refresh(&mut self, session: &SessionManager) -> Result<()> {
        let credentials = session.credentials()?;
        self.tasks = self.client.list_tasks(credentials).await?;
        Ok(())
    }

    /// Creates a task, then re-fetches the list.
    ///
    /// Empty or whitespace-only titles are rejected locally, without a
    /// network call.
    pub async fn add(&mut self, session: &SessionManager, title: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }

        let credentials = session.credentials()?;
        self.client.create_task(credentials, title).await?;
        self.refresh(session).await
    }

    /// Flips `completed` on the given task, carrying the title through
    /// unchanged, then re-fetches the list.
    pub async fn toggle(&mut self, session: &SessionManager, task: &Task) -> Result<()> {
        let credentials = session.credentials()?;
        let patch = TaskPatch::toggle_of(task);
        self.client.update_task(credentials, task.id, &patch).await?;
        self.refresh(session).await
    }

    /// Deletes a task by id, then re-fetches the list.
    pub async fn remove(&mut self, session: &SessionManager, id: i64) -> Result<()> {
        let credentials = session.credentials()?;
        self.client.delete_task(credentials, id).await?;
        self.refresh(session).await
    }
}
