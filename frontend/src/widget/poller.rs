//! Handle to the running status timer.

use crate::runtime::Cancel;

/// Repeating status timer bound to one task.
///
/// Dropping the handle without calling [`PollHandle::cancel`] leaves the
/// browser timer to gloo's `Drop`, which also clears it.
pub struct PollHandle<T: Cancel> {
    task_id: String,
    timer: T,
}

impl<T: Cancel> PollHandle<T> {
    pub fn new(task_id: impl Into<String>, timer: T) -> Self {
        Self {
            task_id: task_id.into(),
            timer,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn cancel(self) {
        self.timer.cancel();
    }
}
