// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Task record inspection commands

use crate::cli::args::TasksArgs;
use crate::error::Result;
use crate::tasks::{format_task_list, TaskStore, UserId};

/// Render one user's tasks the way the bot shows them
pub fn render_tasks(store: &TaskStore, user: UserId) -> Result<String> {
    let tasks = store.try_load(user)?;
    if tasks.is_empty() {
        return Ok(format!("No tasks found for user {}.", user));
    }
    Ok(format_task_list(&tasks))
}

/// Render the users that have records, one per line with task counts
pub fn render_users(store: &TaskStore) -> Result<String> {
    let users = store.list_users()?;
    if users.is_empty() {
        return Ok(format!(
            "No task records in {}.",
            store.data_dir().display()
        ));
    }

    let mut out = String::new();
    for user in users {
        let tasks = store.load(user);
        let done = tasks.iter().filter(|t| t.is_done()).count();
        out.push_str(&format!("{}\t{} tasks ({} done)\n", user, tasks.len(), done));
    }
    Ok(out)
}

/// Execute the tasks command
pub fn execute_tasks(args: &TasksArgs, store: &TaskStore) -> Result<()> {
    print!("{}", ensure_trailing_newline(render_tasks(store, UserId(args.user_id))?));
    Ok(())
}

/// Execute the users command
pub fn execute_users(store: &TaskStore) -> Result<()> {
    print!("{}", ensure_trailing_newline(render_users(store)?));
    Ok(())
}

fn ensure_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::Task;
    use tempfile::TempDir;

    #[test]
    fn test_render_tasks_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = TaskStore::new(temp_dir.path());

        assert_eq!(
            render_tasks(&store, UserId(5)).unwrap(),
            "No tasks found for user 5."
        );
    }

    #[test]
    fn test_render_tasks() {
        let temp_dir = TempDir::new().unwrap();
        let store = TaskStore::new(temp_dir.path());
        store.save(UserId(5), &[Task::new("Buy milk")]);

        assert_eq!(
            render_tasks(&store, UserId(5)).unwrap(),
            "Your Tasks:\n1. Buy milk (pending)\n"
        );
    }

    #[test]
    fn test_render_tasks_reports_corrupt_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = TaskStore::new(temp_dir.path());
        std::fs::write(store.record_path(UserId(5)), "[").unwrap();

        assert!(render_tasks(&store, UserId(5)).is_err());
    }

    #[test]
    fn test_render_users() {
        let temp_dir = TempDir::new().unwrap();
        let store = TaskStore::new(temp_dir.path());
        let mut done = Task::new("b");
        done.complete();
        store.save(UserId(2), &[Task::new("a"), done]);
        store.save(UserId(1), &[Task::new("c")]);

        assert_eq!(
            render_users(&store).unwrap(),
            "1\t1 tasks (0 done)\n2\t2 tasks (1 done)\n"
        );
    }

    #[test]
    fn test_render_users_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = TaskStore::new(temp_dir.path());
        assert!(render_users(&store).unwrap().starts_with("No task records"));
    }

    #[test]
    fn test_ensure_trailing_newline() {
        assert_eq!(ensure_trailing_newline("a".to_string()), "a\n");
        assert_eq!(ensure_trailing_newline("a\n".to_string()), "a\n");
    }
}
