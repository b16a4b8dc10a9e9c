// src/progress.rs
/// Lightweight progress reporting for a pipeline run.
/// Frontends (GUI/CLI) implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of stages.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one stage (fetch, extract, normalize) completes.
    fn stage_done(&mut self, _stage: &str) {}

    /// Called at the end of a successful run.
    fn finish(&mut self) {}
}

/// Prints status lines to stderr (CLI).
pub struct StderrProgress {
    done: usize,
    total: usize,
}

impl StderrProgress {
    pub fn new() -> Self { Self { done: 0, total: 0 } }
}

impl Default for StderrProgress {
    fn default() -> Self { Self::new() }
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn log(&mut self, msg: &str) { eprintln!("{msg}"); }
    fn stage_done(&mut self, stage: &str) {
        self.done += 1;
        eprintln!("  {stage} ok ({}/{})", self.done, self.total);
    }
}
