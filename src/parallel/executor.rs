//! Parallel line executor
//!
//! Uses Rayon for work-stealing parallelism with a bounded pool.

use rayon::prelude::*;
use tracing::{debug, warn};

/// Configuration for parallel execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Maximum number of worker threads (default: num_cpus)
    pub max_parallelism: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            max_parallelism: num_cpus::get(),
        }
    }
}

impl ParallelConfig {
    pub fn with_parallelism(max_parallelism: usize) -> Self {
        Self {
            max_parallelism: max_parallelism.max(1),
        }
    }
}

/// Apply `process` to every line on a thread pool
///
/// Results come back in the same order as `lines`, so the output is
/// indistinguishable from a sequential `lines.iter().map(..)`.
///
/// # Example
/// ```ignore
/// let lengths = process_lines_parallel(&["a", "bb"], |line| line.len(), &ParallelConfig::default());
/// assert_eq!(lengths, vec![1, 2]);
/// ```
pub fn process_lines_parallel<T, F>(lines: &[&str], process: F, config: &ParallelConfig) -> Vec<T>
where
    T: Send,
    F: Fn(&str) -> T + Send + Sync,
{
    // Empty or single line - no parallelism needed
    if lines.len() <= 1 {
        return lines.iter().map(|line| process(*line)).collect();
    }

    let threads = config.max_parallelism.clamp(1, lines.len());
    let pool = match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool,
        Err(err) => {
            warn!(error = %err, "failed to create thread pool, running sequentially");
            return lines.iter().map(|line| process(*line)).collect();
        }
    };

    debug!(threads, lines = lines.len(), "processing lines in parallel");
    pool.install(|| lines.par_iter().map(|line| process(*line)).collect())
}
