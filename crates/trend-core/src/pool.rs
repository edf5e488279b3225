// File: crates/trend-core/src/pool.rs
// Summary: Bounded worker pool for fit/sample requests; results come back as one-shot handles.

use std::any::Any;
use std::sync::mpsc;

use tracing::error;

use crate::engine::{fit_trend_line, TrendLine};
use crate::error::Result;
use crate::sampler::SamplerOptions;
use crate::series::Series;
use crate::trendline::TrendLineSpec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoolConfig {
    /// Worker threads; 0 picks the available parallelism.
    pub threads: usize,
    pub sampler: SamplerOptions,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self { threads: 0, sampler: SamplerOptions::default() }
    }
}

/// Result of a submitted job, delivered once.
pub struct Pending<T> {
    rx: mpsc::Receiver<T>,
}

impl<T> Pending<T> {
    /// Block until the job finishes. `None` if the job panicked.
    pub fn wait(self) -> Option<T> {
        self.rx.recv().ok()
    }

    /// Take the result if it is ready, without blocking.
    pub fn try_take(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }
}

/// Fixed-size pool running independent fit and sampling jobs.
///
/// Jobs share no mutable state; whoever collects the [`Pending`] handles is
/// the single writer of the resulting display data.
pub struct TrendPool {
    pool: rayon::ThreadPool,
    sampler: SamplerOptions,
}

impl TrendPool {
    pub fn new(config: PoolConfig) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .thread_name(|i| format!("trend-worker-{i}"))
            // a panicking job drops its sender; the worker and its siblings keep running
            .panic_handler(log_panic)
            .build()?;
        Ok(Self { pool, sampler: config.sampler })
    }

    pub fn threads(&self) -> usize { self.pool.current_num_threads() }

    pub fn sampler(&self) -> SamplerOptions { self.sampler }

    pub fn submit<T, F>(&self, job: F) -> Pending<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        self.pool.spawn(move || {
            // receiver may be gone if the caller lost interest
            let _ = tx.send(job());
        });
        Pending { rx }
    }

    /// One fit request as a unit of work.
    pub fn fit(&self, series: Series, spec: TrendLineSpec) -> Pending<Result<Option<TrendLine>>> {
        self.submit(move || fit_trend_line(&series, &spec))
    }
}

fn log_panic(payload: Box<dyn Any + Send>) {
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    error!(panic = message, "pool job panicked");
}
