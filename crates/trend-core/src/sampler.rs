// File: crates/trend-core/src/sampler.rs
// Summary: Discretizes a continuous function over an interval, leaving gaps at
// domain errors and vertical asymptotes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::DomainError;
use crate::predict::PredictionFunction;

pub const DEFAULT_STEPS: usize = 1400;
pub const DEFAULT_JUMP_THRESHOLD: f64 = 0.1;

/// Something the sampler can evaluate.
pub trait Function {
    fn eval(&self, x: f64) -> Result<f64, DomainError>;
}

impl<F> Function for F
where
    F: Fn(f64) -> f64,
{
    fn eval(&self, x: f64) -> Result<f64, DomainError> {
        Ok(self(x))
    }
}

impl Function for PredictionFunction {
    fn eval(&self, x: f64) -> Result<f64, DomainError> {
        self.try_evaluate(x)
    }
}

/// Adapter for closures that report their own domain errors.
#[derive(Clone, Copy, Debug)]
pub struct Fallible<F>(pub F);

impl<F> Function for Fallible<F>
where
    F: Fn(f64) -> Result<f64, DomainError>,
{
    fn eval(&self, x: f64) -> Result<f64, DomainError> {
        (self.0)(x)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplerOptions {
    /// Number of intervals; `steps + 1` points are evaluated.
    pub steps: usize,
    /// Largest accepted |f(x) − f(previous x)| before a point counts as a jump.
    pub jump_threshold: f64,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self { steps: DEFAULT_STEPS, jump_threshold: DEFAULT_JUMP_THRESHOLD }
    }
}

/// Shared cancellation flag checked between sampler iterations.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self { Self::default() }

    pub fn cancel(&self) { self.0.store(true, Ordering::Relaxed); }

    pub fn is_cancelled(&self) -> bool { self.0.load(Ordering::Relaxed) }
}

/// Sample `f` over `[start, end]` with the default options.
pub fn sample_function<F: Function + ?Sized>(f: &F, start: f64, end: f64) -> Samples<'_, F> {
    Samples::new(f, start, end, SamplerOptions::default())
}

pub fn sample_function_with<F: Function + ?Sized>(f: &F, start: f64, end: f64, opts: SamplerOptions) -> Samples<'_, F> {
    Samples::new(f, start, end, opts)
}

/// Lazy, finite sequence of accepted `(x, f(x))` points.
///
/// Evaluation is pure, so [`Samples::restart`] (or cloning a fresh sequence)
/// reproduces the same points.
pub struct Samples<'a, F: ?Sized> {
    f: &'a F,
    start: f64,
    end: f64,
    dx: f64,
    last_step: usize,
    opts: SamplerOptions,
    cancel: Option<CancelToken>,
    next_step: usize,
    previous: Option<f64>,
    skipped: usize,
    done: bool,
}

impl<F: ?Sized> Clone for Samples<'_, F> {
    fn clone(&self) -> Self {
        Self {
            f: self.f,
            start: self.start,
            end: self.end,
            dx: self.dx,
            last_step: self.last_step,
            opts: self.opts,
            cancel: self.cancel.clone(),
            next_step: self.next_step,
            previous: self.previous,
            skipped: self.skipped,
            done: self.done,
        }
    }
}

impl<'a, F: Function + ?Sized> Samples<'a, F> {
    fn new(f: &'a F, start: f64, end: f64, opts: SamplerOptions) -> Self {
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        let (dx, last_step) = if end > start && opts.steps > 0 {
            ((end - start) / opts.steps as f64, opts.steps)
        } else {
            (0.0, 0)
        };
        // jump reference starts one step before the interval
        let previous = if dx > 0.0 { f.eval(start - dx).ok() } else { None };
        Self {
            f,
            start,
            end,
            dx,
            last_step,
            opts,
            cancel: None,
            next_step: 0,
            previous,
            skipped: 0,
            done: false,
        }
    }

    /// Stop early once `token` is cancelled.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// A fresh sequence over the same interval and options.
    pub fn restart(&self) -> Self {
        let mut fresh = Self::new(self.f, self.start, self.end, self.opts);
        fresh.cancel = self.cancel.clone();
        fresh
    }

    /// Points rejected or skipped so far.
    pub fn skipped(&self) -> usize { self.skipped }

    /// Split the remaining points into maximal runs of consecutive steps;
    /// every gap in the output marks a domain error or a discontinuity.
    pub fn runs(mut self) -> Vec<Vec<(f64, f64)>> {
        let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
        let mut last: Option<usize> = None;
        while let Some((step, point)) = self.next_indexed() {
            match (last, runs.last_mut()) {
                (Some(prev), Some(run)) if prev + 1 == step => run.push(point),
                _ => runs.push(vec![point]),
            }
            last = Some(step);
        }
        runs
    }

    fn next_indexed(&mut self) -> Option<(usize, (f64, f64))> {
        while !self.done {
            if self.next_step > self.last_step || self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                self.finish();
                return None;
            }
            let step = self.next_step;
            self.next_step += 1;
            let x = if step == self.last_step { self.end } else { self.start + self.dx * step as f64 };

            let fx = match self.f.eval(x) {
                Ok(v) => v,
                Err(e) => {
                    trace!(x, error = %e, "sample skipped");
                    self.skipped += 1;
                    continue;
                }
            };
            let jumped = match self.previous {
                Some(prev) => (fx - prev).abs() > self.opts.jump_threshold,
                None => false,
            };
            self.previous = Some(fx);
            if !fx.is_finite() || jumped {
                trace!(x, fx, "discontinuity");
                self.skipped += 1;
                continue;
            }
            return Some((step, (x, fx)));
        }
        None
    }

    fn finish(&mut self) {
        if !self.done {
            self.done = true;
            debug!(steps = self.last_step, skipped = self.skipped, "function sampled");
        }
    }
}

impl<F: Function + ?Sized> Iterator for Samples<'_, F> {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_indexed().map(|(_, point)| point)
    }
}
