//! Rayon thread pool configuration for per-champion analysis.
//!
//! Champions are independent units of work, so the pipeline fans them out
//! across workers. Use [WorkerPool::install] to bound the thread count, or rely
//! on Rayon's default (all CPU cores).

use rayon::ThreadPoolBuilder;

/// Configures how many worker threads process champions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use the global Rayon pool.
    pub workers: usize,
}

impl WorkerPool {
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Run `f` on a pool with this worker count. Falls back to the global pool
    /// when `workers` is 0 or a dedicated pool cannot be built.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return f();
        }
        match ThreadPoolBuilder::new().num_threads(self.workers).build() {
            Ok(pool) => pool.install(f),
            Err(err) => {
                tracing::warn!(workers = self.workers, %err, "falling back to global rayon pool");
                f()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn install_runs_parallel_work_on_sized_pool() {
        let pool = WorkerPool::with_workers(2);
        let threads = pool.install(rayon::current_num_threads);
        assert_eq!(threads, 2);
        let total: u64 = pool.install(|| (1..=100u64).into_par_iter().sum());
        assert_eq!(total, 5050);
    }

    #[test]
    fn default_pool_uses_global_threads() {
        let total: u64 = WorkerPool::default().install(|| (1..=10u64).into_par_iter().sum());
        assert_eq!(total, 55);
    }
}
