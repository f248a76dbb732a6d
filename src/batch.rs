use std::thread;

use crate::error::{Result, ToolError};

/// Runs `task` for every item on its own scoped thread and waits for all of
/// them. Results keep the order of `items`; the first failure in that order
/// is returned. Work already done by other tasks is not undone.
pub fn run_all<I, T, F>(items: &[I], label: impl Fn(&I) -> String, task: F) -> Result<Vec<T>>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> Result<T> + Sync,
{
    let task = &task;
    thread::scope(|scope| {
        let handles: Vec<_> = items
            .iter()
            .map(|item| (item, scope.spawn(move || task(item))))
            .collect();

        handles
            .into_iter()
            .map(|(item, handle)| {
                handle
                    .join()
                    .map_err(|_| ToolError::TaskPanicked(label(item)))?
            })
            .collect()
    })
}
