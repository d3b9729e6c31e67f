// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Per-user task lists
//!
//! Each user owns an ordered list of short tasks. The list is persisted as a
//! single JSON record and addressed positionally: "task 3" means whatever sits
//! at index 2 when the list was last read.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use taskbot::tasks::{Task, TaskStore, UserId};
//!
//! let store = TaskStore::new("/var/lib/taskbot/user_data");
//!
//! store.update(UserId(42), |tasks| {
//!     tasks.push(Task::new("Buy milk"));
//!     Ok::<_, ()>(())
//! })?;
//!
//! for (i, task) in store.load(UserId(42)).iter().enumerate() {
//!     println!("{}", task.display_line(i));
//! }
//! ```

pub mod schema;
pub mod storage;

pub use schema::{
    format_task_list, validate_task_text, Task, TaskRecord, TaskStatus, TaskTextError, UserId,
    DEFAULT_MAX_TASK_LEN,
};
pub use storage::TaskStore;
