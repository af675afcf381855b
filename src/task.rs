//! Polling background tasks from the UI frame loop.

use futures::FutureExt;
use tokio::task::{JoinError, JoinHandle};

/// Outcome of checking an optional task handle once
pub enum PollResult<T> {
    /// Nothing was running
    NoTask,
    /// Still running; poll again next frame
    Pending,
    /// Finished. The handle has been taken out of the slot.
    Complete(Result<T, JoinError>),
}

/// Take the task's output if it has finished, leaving the slot empty.
///
/// Never blocks: a running task is left in place and reported as `Pending`.
/// The frame loop runs outside any task, so the handle is polled unconstrained
/// to keep tokio's cooperative budget from refusing a finished result.
pub fn poll_task<T>(slot: &mut Option<JoinHandle<T>>) -> PollResult<T> {
    let Some(handle) = slot.as_mut() else {
        return PollResult::NoTask;
    };

    if !handle.is_finished() {
        return PollResult::Pending;
    }

    let polled = tokio::task::unconstrained(handle).now_or_never();
    match polled {
        Some(result) => {
            *slot = None;
            PollResult::Complete(result)
        }
        None => {
            // Handle stays in the slot; next frame tries again
            tracing::warn!("Finished task did not yield its output");
            PollResult::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[test]
    fn test_empty_slot() {
        let mut slot: Option<JoinHandle<()>> = None;
        assert!(matches!(poll_task(&mut slot), PollResult::NoTask));
    }

    #[tokio::test]
    async fn test_pending_then_complete() {
        let (tx, rx) = oneshot::channel::<u32>();
        let mut slot = Some(tokio::spawn(async move { rx.await.unwrap_or(0) }));

        assert!(matches!(poll_task(&mut slot), PollResult::Pending));
        assert!(slot.is_some());

        tx.send(7).unwrap();
        let result = loop {
            match poll_task(&mut slot) {
                PollResult::Complete(result) => break result,
                PollResult::Pending => tokio::task::yield_now().await,
                PollResult::NoTask => panic!("task vanished"),
            }
        };

        assert_eq!(result.unwrap(), 7);
        assert!(slot.is_none());
        assert!(matches!(poll_task(&mut slot), PollResult::NoTask));
    }

    #[tokio::test]
    async fn test_panicking_task_reports_join_error() {
        let mut slot = Some(tokio::spawn(async {
            if true {
                panic!("boom");
            }
        }));

        let result: Result<(), JoinError> = loop {
            match poll_task(&mut slot) {
                PollResult::Complete(result) => break result,
                _ => tokio::task::yield_now().await,
            }
        };
        assert!(result.unwrap_err().is_panic());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_many_completions_without_awaiting() {
        // Polled from a blocking loop like the egui frame loop, never yielding
        for round in 0..300u32 {
            let mut slot = Some(tokio::spawn(async move { round }));
            let value = loop {
                match poll_task(&mut slot) {
                    PollResult::Complete(result) => break result.unwrap(),
                    PollResult::Pending => std::thread::sleep(Duration::from_millis(1)),
                    PollResult::NoTask => panic!("round {}: handle was dropped", round),
                }
            };
            assert_eq!(value, round);
            assert!(slot.is_none());
        }
    }
}
