use kanal::{bounded, SendError};
use num_bigint::BigUint;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::sync::Arc;
use std::thread;
use tokio::sync::{AcquireError, Semaphore};
use tokio::task::{self, JoinError, JoinHandle};
use tracing::debug;

use crate::combinations::{count, count_combinations, CombinationCounter, StructuralError};
use crate::fibonacci::FibonacciTable;

/// Result of counting one message of a batch.
pub type Outcome = Result<BigUint, StructuralError>;

/// Failures of the batch machinery itself, as opposed to malformed messages.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Tokio Join error: {0:?}")]
    TokioJoin(#[from] JoinError),
    #[error("Std Join error: {0:?}")]
    StdJoin(String),
    #[error("Acquire error: {0:?}")]
    Acquire(#[from] AcquireError),
    #[error("Send error: {0:?}")]
    Send(#[from] SendError),
}

/// Counts every message in order on the current thread, sharing one Fibonacci table.
///
/// # Example
/// ```
/// use decode_combinations::batch::count_batch;
/// use num_bigint::BigUint;
/// let outcomes = count_batch(&["12", "30"]);
/// assert_eq!(outcomes[0], Ok(BigUint::from(2u32)));
/// assert!(outcomes[1].is_err());
/// ```
pub fn count_batch<M: AsRef<[u8]>>(messages: &[M]) -> Vec<Outcome> {
    let mut counter = CombinationCounter::new();
    messages
        .iter()
        .map(|message| counter.count(message.as_ref()))
        .collect()
}

// Each rayon worker builds its own table the first time it picks up a message
pub fn count_batch_rayon<M: AsRef<[u8]> + Sync>(messages: &[M]) -> Vec<Outcome> {
    messages
        .par_iter()
        .map_init(FibonacciTable::new, |table, message| {
            count_combinations(message.as_ref(), table)
        })
        .collect()
}

// Splits the batch into one chunk per worker thread; chunks come back over a kanal channel
// and are put back into input order
pub fn count_batch_kanal(
    messages: Vec<Vec<u8>>,
    workers: usize,
) -> Result<Vec<Outcome>, BatchError> {
    let total = messages.len();
    let chunk_size = total.div_ceil(workers.max(1)).max(1);

    // Capacity covers every chunk, so no sender ever blocks
    let (sender, receiver) = bounded::<(usize, Vec<Outcome>)>(total / chunk_size + 1);

    let mut handles = Vec::new();
    let mut remaining = messages.into_iter();
    let mut start = 0;

    while start < total {
        let chunk: Vec<Vec<u8>> = remaining.by_ref().take(chunk_size).collect();
        let len = chunk.len();

        let sender = sender.clone();
        let handle = thread::spawn(move || -> Result<(), BatchError> {
            let mut counter = CombinationCounter::new();
            let outcomes = chunk.iter().map(|message| counter.count(message)).collect();

            sender.send((start, outcomes))?;

            Ok(())
        });

        handles.push(handle);
        start += len;
    }

    // Drop the sender to allow the receiver to exit after all threads finish
    drop(sender);

    for handle in handles {
        handle
            .join()
            .map_err(|e| BatchError::StdJoin(format!("Thread panicked: {:?}", e)))??;
    }

    let mut results = Vec::new();
    for (start, outcomes) in receiver {
        results.push((start, outcomes));
    }

    results.sort_by_key(|(start, _)| *start);
    debug!(chunks = results.len(), total, "kanal batch finished");

    Ok(results
        .into_iter()
        .flat_map(|(_, outcomes)| outcomes)
        .collect())
}

/// Counts each message in its own blocking task, with at most `max_concurrent` running at once.
///
/// Every task builds a fresh Fibonacci table, so no table is ever shared between threads.
pub async fn count_batch_tokio(
    messages: Vec<Vec<u8>>,
    max_concurrent: usize,
) -> Result<Vec<Outcome>, BatchError> {
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));

    let mut tasks = Vec::with_capacity(messages.len());

    for message in messages {
        let semaphore = Arc::clone(&semaphore);

        let task: JoinHandle<Result<Outcome, BatchError>> = task::spawn(async move {
            // Acquire a semaphore permit to control concurrency
            let _permit = semaphore.acquire().await?;

            let outcome = task::spawn_blocking(move || count(&message)).await?;

            Ok(outcome)
        });

        tasks.push(task);
    }

    // Awaiting in spawn order keeps the results in input order
    let mut results = Vec::with_capacity(tasks.len());
    for task in tasks {
        results.push(task.await??);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages() -> Vec<Vec<u8>> {
        vec![
            b"1".to_vec(),
            b"226".to_vec(),
            b"30".to_vec(),
            b"11106".to_vec(),
            "1".repeat(120).into_bytes(),
            b"27".to_vec(),
            Vec::new(),
            b"2611055971756562".to_vec(),
        ]
    }

    #[test]
    fn sequential_keeps_order() {
        let outcomes = count_batch(&messages());
        assert_eq!(outcomes.len(), 8);
        assert_eq!(outcomes[0], Ok(BigUint::from(1u32)));
        assert_eq!(outcomes[1], Ok(BigUint::from(3u32)));
        assert!(matches!(
            outcomes[2],
            Err(StructuralError::InvalidZeroAttachment { position: 1, .. })
        ));
        assert_eq!(outcomes[3], Ok(BigUint::from(2u32)));
        assert_eq!(outcomes[4], Ok(FibonacciTable::new().fib(121).clone()));
        assert_eq!(outcomes[5], Ok(BigUint::from(1u32)));
        assert_eq!(outcomes[6], Err(StructuralError::Empty));
        assert_eq!(outcomes[7], Ok(BigUint::from(4u32)));
    }

    #[test]
    fn rayon_matches_sequential() {
        let input = messages();
        assert_eq!(count_batch_rayon(&input), count_batch(&input));
    }

    #[test]
    fn kanal_matches_sequential() {
        let input = messages();
        let expected = count_batch(&input);
        for workers in [0, 1, 3, 8, 20] {
            let outcomes = count_batch_kanal(input.clone(), workers).unwrap();
            assert_eq!(outcomes, expected, "workers = {workers}");
        }
    }

    #[test]
    fn kanal_empty_batch() {
        assert!(count_batch_kanal(Vec::new(), 4).unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn tokio_matches_sequential() {
        let input = messages();
        let expected = count_batch(&input);
        let outcomes = count_batch_tokio(input, 3).await.unwrap();
        assert_eq!(outcomes, expected);
    }

    #[tokio::test]
    async fn tokio_zero_concurrency_still_runs() {
        let outcomes = count_batch_tokio(vec![b"12".to_vec()], 0).await.unwrap();
        assert_eq!(outcomes, vec![Ok(BigUint::from(2u32))]);
    }
}
