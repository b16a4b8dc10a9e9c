// src/gui/actions/refresh.rs
//
// Runs the pipeline on the UI thread. Both paths go through the cache:
// `load` is the memoized read (page load, filter edits), `refresh` is the
// "Refresh Data" button.

use crate::{
    gui::{ app::App, progress::GuiProgress },
    progress::Progress,
};

pub fn load(app: &mut App) {
    if app.cache.is_fresh() {
        if let Some(ds) = app.cache.current() {
            app.set_dataset(ds);
            return;
        }
    }
    run(app, false);
}

pub fn refresh(app: &mut App) {
    logf!("UI: Refresh Data clicked");
    run(app, true);
}

fn run(app: &mut App, force: bool) {
    let res = {
        let mut progress = GuiProgress::new(&mut app.status);
        let p: &mut dyn Progress = &mut progress;
        if force {
            app.cache.refresh_with(Some(p))
        } else {
            app.cache.get_with(Some(p))
        }
    };

    match res {
        Ok(ds) => {
            let msg = match ds.dropped().count() {
                0 => format!("Loaded {} companies", ds.len()),
                n => format!("Loaded {} companies ({n} rows skipped)", ds.len()),
            };
            app.set_dataset(ds);
            app.status(msg);
        }
        Err(e) => {
            loge!("Refresh: {e}");
            // The cache kept whatever it had; keep showing it
            if let Some(stale) = app.cache.current() {
                app.set_dataset(stale);
                app.status(format!("Refresh failed: {e}. Showing previously loaded data."));
            } else {
                app.status(format!("Could not load data: {e}"));
            }
        }
    }
}
