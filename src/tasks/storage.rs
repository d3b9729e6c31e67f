// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Task storage
//!
//! Stores one JSON record per user in a flat directory. Every save rewrites
//! the whole record; reads of a missing record yield an empty collection.
//!
//! ## Storage Location
//!
//! Records live at `<data_dir>/<user_id>.json`:
//!
//! ```json
//! {
//!   "tasks": [
//!     { "text": "Buy milk", "status": "pending" }
//!   ]
//! }
//! ```
//!
//! Writes go through a temp file and a rename so a crash never leaves a
//! half-written record. Within one process, `update` serialises
//! load → mutate → save per user; separate processes writing the same
//! record still race and the last write wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Result, TaskbotError};

use super::schema::{Task, TaskRecord, UserId};

/// File-per-user task storage
pub struct TaskStore {
    /// Directory holding the per-user records
    data_dir: PathBuf,
    /// One lock per user, held across read-modify-write cycles
    locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl TaskStore {
    /// Create a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// A directory that cannot be created is logged rather than returned:
    /// the bot keeps running and each later save reports its own failure.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        if let Err(e) = std::fs::create_dir_all(&data_dir) {
            tracing::error!(
                path = %data_dir.display(),
                error = %e,
                "failed to create task data directory"
            );
        }

        Self {
            data_dir,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Directory holding the records
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the record for a user
    pub fn record_path(&self, user: UserId) -> PathBuf {
        self.data_dir.join(format!("{}.json", user))
    }

    fn temp_path(&self, user: UserId) -> PathBuf {
        self.data_dir.join(format!("{}.json.tmp", user))
    }

    /// Run `f` while holding the user's lock, then drop the lock entry if no
    /// one else is waiting on it.
    fn with_user_lock<R>(&self, user: UserId, f: impl FnOnce() -> R) -> R {
        let lock = {
            let mut locks = lock_or_recover(&self.locks);
            locks.entry(user).or_default().clone()
        };

        let outcome = {
            let _guard = lock_or_recover(&lock);
            f()
        };

        let mut locks = lock_or_recover(&self.locks);
        // Only the map and `lock` hold it.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&user);
        }
        outcome
    }

    #[cfg(test)]
    fn tracked_locks(&self) -> usize {
        lock_or_recover(&self.locks).len()
    }

    /// Load a user's tasks, surfacing I/O and parse errors
    pub fn try_load(&self, user: UserId) -> Result<Vec<Task>> {
        let path = self.record_path(user);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&path)?;
        let record: TaskRecord = serde_json::from_str(&content).map_err(|e| {
            TaskbotError::Storage(format!(
                "Failed to parse task record {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(record.tasks)
    }

    /// Load a user's tasks.
    ///
    /// Never fails: an unreadable or corrupt record is logged and treated as
    /// an empty collection.
    pub fn load(&self, user: UserId) -> Vec<Task> {
        match self.try_load(user) {
            Ok(tasks) => tasks,
            Err(e) => {
                tracing::warn!(user = %user, error = %e, "error loading tasks");
                Vec::new()
            }
        }
    }

    fn write_record(&self, user: UserId, tasks: &[Task]) -> Result<()> {
        let record = TaskRecord {
            tasks: tasks.to_vec(),
        };
        let content = serde_json::to_string_pretty(&record)?;

        let temp_path = self.temp_path(user);
        std::fs::write(&temp_path, content)?;
        std::fs::rename(&temp_path, self.record_path(user))?;

        Ok(())
    }

    /// Overwrite a user's record, surfacing errors
    pub fn try_save(&self, user: UserId, tasks: &[Task]) -> Result<()> {
        self.with_user_lock(user, || self.write_record(user, tasks))
    }

    /// Overwrite a user's record. Failures are logged, not returned.
    pub fn save(&self, user: UserId, tasks: &[Task]) {
        if let Err(e) = self.try_save(user, tasks) {
            tracing::error!(user = %user, error = %e, "error saving tasks");
        }
    }

    /// Load, mutate, and save a user's tasks while holding that user's lock.
    ///
    /// The collection is written back only when `f` returns `Ok`. A failed
    /// save is logged; the closure's result is returned either way.
    pub fn update<T, E>(
        &self,
        user: UserId,
        f: impl FnOnce(&mut Vec<Task>) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E> {
        self.with_user_lock(user, || -> std::result::Result<T, E> {
            let mut tasks = self.load(user);
            let outcome = f(&mut tasks)?;

            if let Err(e) = self.write_record(user, &tasks) {
                tracing::error!(user = %user, error = %e, "error saving tasks");
            }

            Ok(outcome)
        })
    }

    /// User ids that currently have a record, in ascending order
    pub fn list_users(&self) -> Result<Vec<UserId>> {
        let mut users = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<u64>().ok())
            {
                users.push(UserId(id));
            }
        }
        users.sort();
        Ok(users)
    }
}

fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("task store lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}
