// src/cache.rs
//
// Single-slot, time-bounded memo around the pipeline.
//
// - `get()` serves the cached dataset while it is younger than the TTL and
//   runs the pipeline otherwise.
// - `refresh()` always runs the pipeline.
// - A failed run never clears the slot: the old dataset stays readable through
//   `current()` and the error is handed back to the caller.
// - A failure is memoized for one TTL window too: `get()` hands back the same
//   error without fetching until the window ends or `refresh()` is called.

use std::sync::Arc;
use std::time::Duration;

use chrono::{ DateTime, TimeDelta, Utc };

use crate::{
    error::PipelineError,
    model::Dataset,
    pipeline::{ self, Source },
    progress::Progress,
};

/// Time source for freshness checks.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> { Utc::now() }
}

pub struct DatasetCache<S: Source, C: Clock = SystemClock> {
    source: S,
    clock: C,
    ttl: Duration,
    slot: Option<Arc<Dataset>>,
    last_error: Option<PipelineError>,
    failed_at: Option<DateTime<Utc>>,
}

impl<S: Source> DatasetCache<S, SystemClock> {
    pub fn new(source: S, ttl: Duration) -> Self {
        Self::with_clock(source, SystemClock, ttl)
    }
}

impl<S: Source, C: Clock> DatasetCache<S, C> {
    pub fn with_clock(source: S, clock: C, ttl: Duration) -> Self {
        Self { source, clock, ttl, slot: None, last_error: None, failed_at: None }
    }

    pub fn ttl(&self) -> Duration { self.ttl }
    pub fn set_ttl(&mut self, ttl: Duration) { self.ttl = ttl; }

    /// Whatever is in the slot, fresh or stale.
    pub fn current(&self) -> Option<Arc<Dataset>> { self.slot.clone() }

    /// Error of the most recent run; cleared by the next successful one.
    pub fn last_error(&self) -> Option<&PipelineError> { self.last_error.as_ref() }

    /// Age of the cached dataset, `None` when empty.
    pub fn age(&self) -> Option<TimeDelta> {
        self.slot.as_ref().map(|ds| self.clock.now() - ds.fetched_at())
    }

    pub fn is_fresh(&self) -> bool {
        self.age().is_some_and(|age| self.within_ttl(age))
    }

    /// Error of a run that failed inside the current TTL window.
    fn recent_failure(&self) -> Option<&PipelineError> {
        let at = self.failed_at?;
        if self.within_ttl(self.clock.now() - at) { self.last_error.as_ref() } else { None }
    }

    fn within_ttl(&self, age: TimeDelta) -> bool {
        let Ok(ttl) = TimeDelta::from_std(self.ttl) else { return true };
        age < ttl
    }

    /// Memoized accessor: no network call while the slot is fresh.
    pub fn get(&mut self) -> Result<Arc<Dataset>, PipelineError> {
        self.get_with(None)
    }

    pub fn get_with(&mut self, progress: Option<&mut dyn Progress>) -> Result<Arc<Dataset>, PipelineError> {
        if self.is_fresh() {
            if let Some(ds) = &self.slot {
                logd!("Cache: hit (age={}s)", self.age().map(|a| a.num_seconds()).unwrap_or(0));
                return Ok(Arc::clone(ds));
            }
        }
        if let Some(e) = self.recent_failure() {
            logd!("Cache: last run failed inside the TTL window, not fetching");
            return Err(e.clone());
        }
        logd!("Cache: {}", if self.slot.is_some() { "expired" } else { "empty" });
        self.run(progress)
    }

    /// Forced run regardless of freshness.
    pub fn refresh(&mut self) -> Result<Arc<Dataset>, PipelineError> {
        self.refresh_with(None)
    }

    pub fn refresh_with(&mut self, progress: Option<&mut dyn Progress>) -> Result<Arc<Dataset>, PipelineError> {
        logf!("Cache: forced refresh");
        self.run(progress)
    }

    fn run(&mut self, progress: Option<&mut dyn Progress>) -> Result<Arc<Dataset>, PipelineError> {
        match pipeline::run(&self.source, self.clock.now(), progress) {
            Ok(ds) => {
                let ds = Arc::new(ds);
                self.slot = Some(Arc::clone(&ds));
                self.last_error = None;
                self.failed_at = None;
                Ok(ds)
            }
            Err(e) => {
                if self.slot.is_some() {
                    logf!("Cache: keeping stale dataset after failed run");
                }
                self.last_error = Some(e.clone());
                self.failed_at = Some(self.clock.now());
                Err(e)
            }
        }
    }
}
