// src/gui/actions/copy.rs
use eframe::egui;

use crate::{ csv::records_to_string, gui::app::App };
use super::visible_records;

pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    let Some(records) = visible_records(app) else {
        app.status("Nothing to copy (no data loaded)");
        logd!("Copy: Clicked, but there's no dataset");
        return;
    };
    if records.is_empty() {
        app.status("Nothing to copy");
        logd!("Copy: Clicked, but the view is empty");
        return;
    }

    let export = &app.state.options.export;
    match records_to_string(&records, export.format, export.include_headers) {
        Ok(txt) => {
            logf!("Copy: rows={} format={:?}", records.len(), export.format);
            ui_ctx.copy_text(txt);
            app.status(format!("Copied {} rows to clipboard", records.len()));
        }
        Err(e) => {
            loge!("Copy: Error: {e}");
            app.status(format!("Copy error: {e}"));
        }
    }
}
