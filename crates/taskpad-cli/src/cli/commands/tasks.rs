//! Task command handlers.

use anyhow::{Context, Result};
use taskpad_core::api::ApiClient;
use taskpad_core::session::SessionManager;
use taskpad_core::tasks::TaskList;

fn ensure_authenticated(session: &SessionManager) -> Result<()> {
    anyhow::ensure!(
        session.is_authenticated(),
        "Not logged in. Run `taskpad login <username>` first."
    );
    Ok(())
}

/// Restores the session and returns a freshly refreshed list.
async fn open(session: &mut SessionManager, client: ApiClient) -> Result<TaskList> {
    session.bootstrap().await.context("restore session")?;
    ensure_authenticated(session)?;

    let mut list = TaskList::new(client);
    list.refresh(session).await.context("fetch tasks")?;
    Ok(list)
}

pub async fn list(session: &mut SessionManager, client: ApiClient) -> Result<()> {
    let list = open(session, client).await?;
    if list.tasks().is_empty() {
        println!("No tasks.");
    } else {
        for task in list.tasks() {
            let mark = if task.completed { "x" } else { " " };
            println!("[{}] {:>4}  {}", mark, task.id, task.title);
        }
    }
    Ok(())
}

pub async fn add(session: &mut SessionManager, client: ApiClient, title: &str) -> Result<()> {
    session.bootstrap().await.context("restore session")?;
    ensure_authenticated(session)?;

    let mut list = TaskList::new(client);
    list.add(session, title).await.context("add task")?;
    println!(
        "Added '{}' ({} task(s) total)",
        title.trim(),
        list.tasks().len()
    );
    Ok(())
}

pub async fn toggle(session: &mut SessionManager, client: ApiClient, id: i64) -> Result<()> {
    let mut list = open(session, client).await?;
    let task = list
        .get(id)
        .cloned()
        .with_context(|| format!("no task with id {id}"))?;

    list.toggle(session, &task).await.context("toggle task")?;

    let state = if task.completed { "open" } else { "done" };
    println!("Marked task {id} as {state}");
    Ok(())
}

pub async fn remove(session: &mut SessionManager, client: ApiClient, id: i64) -> Result<()> {
    session.bootstrap().await.context("restore session")?;
    ensure_authenticated(session)?;

    let mut list = TaskList::new(client);
    list.remove(session, id).await.context("remove task")?;
    println!("Removed task {id}");
    Ok(())
}
