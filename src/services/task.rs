//! Background task runner service
//!
//! Network calls must not block the render loop, so each one runs on a
//! worker thread and reports its single result over an mpsc channel. The
//! app polls runners on `Action::Tick`.
//!
//! Spawning a new task replaces the previous receiver, so the result of a
//! superseded request is dropped instead of applied - a slow earlier search
//! can never overwrite a later one.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Runs one background task at a time and hands back its result.
pub struct TaskRunner<T> {
    receiver: Option<Receiver<T>>,
}

impl<T> Default for TaskRunner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskRunner<T> {
    pub fn new() -> Self {
        Self { receiver: None }
    }

    /// Spawn `task` on a worker thread, replacing any task in flight.
    pub fn spawn<F>(&mut self, task: F)
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(task());
        });
        self.receiver = Some(rx);
    }

    /// Poll for the task's result.
    ///
    /// Returns `Some` exactly once per spawned task. A worker that died
    /// without sending (panic) ends the task with no result, which also
    /// clears `is_running` - loading flags derived from it cannot wedge.
    pub fn poll(&mut self) -> Option<T> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(value) => {
                self.receiver = None;
                Some(value)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.receiver = None;
                None
            }
        }
    }

    /// Whether a task is still in flight
    pub fn is_running(&self) -> bool {
        self.receiver.is_some()
    }

    /// Drop any in-flight task's channel; its result will be discarded
    pub fn clear(&mut self) {
        self.receiver = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn poll_until<T: Send + 'static>(runner: &mut TaskRunner<T>) -> Option<T> {
        for _ in 0..100 {
            if let Some(value) = runner.poll() {
                return Some(value);
            }
            thread::sleep(Duration::from_millis(10));
        }
        None
    }

    #[test]
    fn test_task_delivers_result_once() {
        let mut runner = TaskRunner::new();
        runner.spawn(|| 42);
        assert!(runner.is_running());

        assert_eq!(poll_until(&mut runner), Some(42));
        assert!(!runner.is_running());
        assert_eq!(runner.poll(), None);
    }

    #[test]
    fn test_new_spawn_supersedes_previous_task() {
        let mut runner = TaskRunner::new();
        runner.spawn(|| {
            thread::sleep(Duration::from_millis(50));
            "slow"
        });
        runner.spawn(|| "fast");

        assert_eq!(poll_until(&mut runner), Some("fast"));
        // the superseded result never surfaces
        thread::sleep(Duration::from_millis(100));
        assert_eq!(runner.poll(), None);
    }

    #[test]
    fn test_panicked_worker_clears_running_flag() {
        let mut runner: TaskRunner<i32> = TaskRunner::new();
        runner.spawn(|| panic!("worker died"));

        for _ in 0..100 {
            runner.poll();
            if !runner.is_running() {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("runner never settled");
    }
}
