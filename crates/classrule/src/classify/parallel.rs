//! Scatter/gather classification on rayon.
//!
//! Records are split into contiguous chunks, each chunk is classified with the
//! same engine as the sequential path, and the partial results are
//! concatenated in chunk order. Nothing is shared mutably between workers.

use super::{Classification, RuleEngine};
use crate::error::{ClassruleError, EvalError, Result};
use crate::model::{ClassRule, Record};
use rayon::prelude::*;

/// Chunks per worker thread, so uneven chunks still balance.
const CHUNKS_PER_THREAD: usize = 4;

/// Parallel [`classify`](super::classify) on the current rayon pool. The
/// output is identical to the sequential one.
pub fn classify_parallel(
    records: &[Record],
    classes: &[ClassRule],
) -> std::result::Result<Classification, EvalError> {
    if records.is_empty() {
        return Ok(Classification::new());
    }

    let size = chunk_size(records.len(), rayon::current_num_threads());
    log::debug!(
        "classifying {} record(s) in chunks of {} on {} thread(s)",
        records.len(),
        size,
        rayon::current_num_threads()
    );

    let engine = RuleEngine::new(classes);
    let parts = records
        .par_chunks(size)
        .map(|chunk| engine.classify_batch(chunk))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut result = Classification::new();
    for part in parts {
        result.append(part);
    }
    Ok(result)
}

/// Run [`classify_parallel`] on a dedicated pool of `threads` workers.
/// `0` uses the global rayon pool.
pub fn classify_with_threads(
    records: &[Record],
    classes: &[ClassRule],
    threads: usize,
) -> Result<Classification> {
    if threads == 0 {
        return Ok(classify_parallel(records, classes)?);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| ClassruleError::Config(format!("Failed to build thread pool: {}", e)))?;
    Ok(pool.install(|| classify_parallel(records, classes))?)
}

fn chunk_size(len: usize, threads: usize) -> usize {
    let chunks = threads.max(1) * CHUNKS_PER_THREAD;
    ((len + chunks - 1) / chunks).max(1)
}
