// src/gui/progress.rs
use crate::progress::Progress;

/// Writes pipeline stage messages into the app's status line.
pub struct GuiProgress<'a> {
    status: &'a mut String,
    done: usize,
    total: usize,
}

impl<'a> GuiProgress<'a> {
    pub fn new(status: &'a mut String) -> Self {
        Self { status, done: 0, total: 0 }
    }
}

impl Progress for GuiProgress<'_> {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        *self.status = s!(msg);
    }
    fn stage_done(&mut self, stage: &str) {
        self.done += 1;
        *self.status = format!("{stage} done ({}/{})", self.done, self.total);
    }
    fn finish(&mut self) {
        *self.status = s!("Fetch complete");
    }
}
