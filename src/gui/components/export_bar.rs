// src/gui/components/export_bar.rs

use eframe::egui;

use crate::{
    config::options::ExportFormat,
    gui::{ actions, app::App },
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    {
        let export = &mut app.state.options.export;

        // --- Format + Include headers ---
        let prev_fmt = export.format;
        ui.horizontal(|ui| {
            ui.label("Format:");
            ui.selectable_value(&mut export.format, ExportFormat::Csv, "CSV");
            ui.selectable_value(&mut export.format, ExportFormat::Tsv, "TSV");
            ui.selectable_value(&mut export.format, ExportFormat::Json, "JSON");

            ui.separator();

            let before_headers = export.include_headers;
            // JSON always carries field names
            ui.add_enabled_ui(export.format != ExportFormat::Json, |ui| {
                ui.checkbox(&mut export.include_headers, "Include headers");
            });
            if export.include_headers != before_headers {
                logf!("UI: Include_headers → {}", export.include_headers);
            }
        });
        if export.format != prev_fmt {
            logf!("UI: Export format → {:?}", export.format);
        }
    }

    // --- Output field ---
    ui.horizontal(|ui| {
        ui.label("Output:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.out_path_text)
                .font(egui::TextStyle::Monospace)
                .hint_text("folder/ or folder/file.csv"))
            .on_hover_text("End with a slash to keep the generated, timestamped file name")
            .changed()
        {
            app.out_path_dirty = true;
            logd!("UI: out_path_text changed (dirty=true) → {}", app.out_path_text);
        }
    });

    // --- Actions (Copy / Export / Open folder) ---
    ui.horizontal(|ui| {
        let rows = app.row_ix.len();

        if ui.button("Copy").on_hover_text(format!("Copy {rows} rows to the clipboard")).clicked() {
            let ctx = ui.ctx().clone();
            actions::copy::copy(app, &ctx);
        }
        if ui.button("Export").on_hover_text(format!("Write {rows} rows to a file")).clicked() {
            actions::export::export(app);
        }
        if ui.button("Open folder").clicked() {
            actions::export::open_output_folder(app);
        }
    });
}
