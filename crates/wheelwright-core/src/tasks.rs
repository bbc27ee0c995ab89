//! Bounded fan-out over independent tasks.
//!
//! Tasks run across a fixed pool of worker threads and may complete in any
//! order; a single task's failure never aborts its siblings. The caller
//! receives successes and failure traces partitioned by outcome. No
//! cancellation or timeout propagation between tasks.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::thread;

/// A unit of work for [`run_parallel`].
pub type Task<T> = Box<dyn FnOnce() -> anyhow::Result<T> + Send>;

/// Execute `tasks` across at most `max_workers` threads (defaulting to the
/// logical CPU count) and partition the outcomes.
///
/// Returns `(results, failures)`: values returned by successful tasks in
/// completion order, and rendered error chains for the failed ones.
pub fn run_parallel<T: Send>(
    tasks: Vec<Task<T>>,
    max_workers: Option<usize>,
) -> (Vec<T>, Vec<String>) {
    let workers = max_workers
        .unwrap_or_else(num_cpus::get)
        .clamp(1, tasks.len().max(1));

    let queue = Mutex::new(tasks.into_iter().collect::<VecDeque<_>>());
    let results = Mutex::new(Vec::new());
    let failures = Mutex::new(Vec::new());

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                loop {
                    let task = lock(&queue).pop_front();
                    let Some(task) = task else { break };
                    match task() {
                        Ok(value) => lock(&results).push(value),
                        Err(err) => lock(&failures).push(format!("{err:#}")),
                    }
                }
            });
        }
    });

    (
        results.into_inner().unwrap_or_else(PoisonError::into_inner),
        failures.into_inner().unwrap_or_else(PoisonError::into_inner),
    )
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn partitions_successes_and_failures() {
        let tasks: Vec<Task<i32>> = vec![
            Box::new(|| Ok(1)),
            Box::new(|| anyhow::bail!("boom")),
            Box::new(|| Ok(3)),
        ];

        let (mut results, failures) = run_parallel(tasks, None);
        results.sort_unstable();
        assert_eq!(results, vec![1, 3]);
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("boom"));
    }

    #[test]
    fn one_failure_does_not_abort_siblings() {
        static COMPLETED: AtomicUsize = AtomicUsize::new(0);

        let tasks: Vec<Task<()>> = (0..8)
            .map(|i| -> Task<()> {
                Box::new(move || {
                    if i == 0 {
                        anyhow::bail!("first task fails");
                    }
                    COMPLETED.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                })
            })
            .collect();

        let (results, failures) = run_parallel(tasks, Some(2));
        assert_eq!(results.len(), 7);
        assert_eq!(failures.len(), 1);
        assert_eq!(COMPLETED.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn single_worker_drains_the_queue() {
        let tasks: Vec<Task<usize>> = (0..5).map(|i| -> Task<usize> { Box::new(move || Ok(i)) }).collect();
        let (mut results, failures) = run_parallel(tasks, Some(1));
        results.sort_unstable();
        assert_eq!(results, vec![0, 1, 2, 3, 4]);
        assert!(failures.is_empty());
    }

    #[test]
    fn empty_task_list_is_fine() {
        let (results, failures) = run_parallel(Vec::<Task<()>>::new(), None);
        assert!(results.is_empty());
        assert!(failures.is_empty());
    }

    #[test]
    fn failure_traces_include_context_chain() {
        use anyhow::Context as _;
        let tasks: Vec<Task<()>> = vec![Box::new(|| {
            Err(anyhow::anyhow!("root cause")).context("while probing host")
        })];
        let (_, failures) = run_parallel(tasks, None);
        assert!(failures[0].contains("while probing host"));
        assert!(failures[0].contains("root cause"));
    }
}
