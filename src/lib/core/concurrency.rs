use log::warn;

use crate::core::errors::{Result, ScreenError};

/// Validate and normalize a requested worker count.
///
/// Zero workers is rejected outright. Requesting more workers than available
/// CPUs is allowed but logged, since oversubscription rarely helps for
/// I/O-bound BAM traversal.
pub fn determine_allowed_cpus(desired: usize) -> Result<usize> {
    if desired == 0 {
        Err(ScreenError::InvalidArgument(
            "Number of workers must be at least 1.".to_string(),
        ))
    } else if desired > num_cpus::get() {
        warn!(
            "Specified more workers than available CPUs, using {}",
            desired
        );
        Ok(desired)
    } else {
        Ok(desired)
    }
}

/// Build a scoped Rayon pool with the validated worker count.
///
/// Batch assembly runs inside its own pool instead of the global one so that
/// the worker count stays an explicit per-call argument.
pub fn worker_pool(workers: usize) -> Result<rayon::ThreadPool> {
    let workers = determine_allowed_cpus(workers)?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;
    Ok(pool)
}
