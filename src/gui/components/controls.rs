// src/gui/components/controls.rs
//
// Left panel: refresh, data freshness, and the filter/sort controls.
// Any change goes through `actions::refresh::load`, so an expired cache is
// refetched on the next interaction. After a failed fetch the cache hands back
// the same error until the TTL ends or "Refresh Data" is clicked.

use chrono::TimeDelta;
use eframe::egui::{ self, Color32, RichText };

use crate::{
    gui::{ actions, app::App },
    model::Column,
    normalize::parse_currency,
    view::SortDir,
};

fn fmt_age(age: TimeDelta) -> String {
    let secs = age.num_seconds().max(0);
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3599 => format!("{} min", secs / 60),
        _ => format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60),
    }
}

/// Empty → no bound; unparseable → `Err` (query left as is).
fn parse_bound(text: &str) -> Result<Option<f64>, ()> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_currency(text).map(Some).ok_or(())
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.heading("Controls");

    if ui.button("Refresh Data").clicked() {
        actions::refresh::refresh(app);
    }

    if let Some(ds) = app.dataset.clone() {
        ui.label(format!("Fetched {} UTC", ds.fetched_at().format("%Y-%m-%d %H:%M:%S")));
        if let Some(age) = app.cache.age() {
            let fresh = app.cache.is_fresh();
            ui.label(format!("Age: {}{}", fmt_age(age), if fresh { "" } else { " (stale)" }));
        }
        if !ds.dropped().is_empty() {
            ui.label(format!("{} rows skipped while parsing", ds.dropped().count()))
                .on_hover_text(
                    ds.dropped()
                        .rows
                        .iter()
                        .map(|(pos, e)| format!("row {pos}: {e}"))
                        .collect::<Vec<_>>()
                        .join("\n"),
                );
        }
    } else {
        ui.label("No data loaded");
    }
    if let Some(e) = app.cache.last_error() {
        ui.label(RichText::new(format!("Last refresh failed: {e}")).color(Color32::from_rgb(0xDC, 0x61, 0x49)));
    }

    ui.separator();

    let mut changed = false;

    // --- Industry multi-select (empty = all) ---
    ui.label(RichText::new("Industry").strong());
    ui.horizontal(|ui| {
        if ui.button("All").clicked() {
            app.state.gui.query.industries.clear();
            changed = true;
        }
        let selected = app.state.gui.query.industries.len();
        ui.label(if selected == 0 { s!("showing all") } else { format!("{selected} selected") });
    });

    egui::ScrollArea::vertical()
        .id_salt("industry_scroll")
        .max_height(220.0)
        .show(ui, |ui| {
            for ind in &app.industries {
                let sel = &mut app.state.gui.query.industries;
                let mut on = sel.contains(ind);
                if ui.checkbox(&mut on, ind.as_str()).changed() {
                    if on { sel.push(ind.clone()); } else { sel.retain(|i| i != ind); }
                    changed = true;
                }
            }
        });

    ui.separator();

    // --- Revenue range ---
    ui.label(RichText::new("Revenue (USD millions)").strong());
    let mut bad_bound = false;
    ui.horizontal(|ui| {
        ui.label("Min");
        if ui.add(egui::TextEdit::singleline(&mut app.min_revenue_text).desired_width(80.0)).changed() {
            match parse_bound(&app.min_revenue_text) {
                Ok(v) => { app.state.gui.query.revenue_min = v; changed = true; }
                Err(()) => bad_bound = true,
            }
        }
    });
    ui.horizontal(|ui| {
        ui.label("Max");
        if ui.add(egui::TextEdit::singleline(&mut app.max_revenue_text).desired_width(80.0)).changed() {
            match parse_bound(&app.max_revenue_text) {
                Ok(v) => { app.state.gui.query.revenue_max = v; changed = true; }
                Err(()) => bad_bound = true,
            }
        }
    });
    if bad_bound
        || parse_bound(&app.min_revenue_text).is_err()
        || parse_bound(&app.max_revenue_text).is_err()
    {
        ui.label(RichText::new("Enter a number, e.g. 100000").small().color(Color32::YELLOW));
    }

    ui.separator();

    // --- Sort ---
    ui.label(RichText::new("Sort").strong());
    let query = &mut app.state.gui.query;
    let mut sort_col = query.sort.map(|(c, _)| c);
    let mut dir = query.sort.map(|(_, d)| d).unwrap_or_default();
    let label = sort_col.map(|c| c.header()).unwrap_or("Source order");

    egui::ComboBox::from_id_salt("sort_col")
        .selected_text(label)
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut sort_col, None, "Source order");
            for col in Column::ALL {
                ui.selectable_value(&mut sort_col, Some(col), col.header());
            }
        });
    ui.horizontal(|ui| {
        ui.radio_value(&mut dir, SortDir::Asc, "Ascending");
        ui.radio_value(&mut dir, SortDir::Desc, "Descending");
    });

    let new_sort = sort_col.map(|c| (c, dir));
    if new_sort != query.sort {
        logf!("UI: Sort → {:?}", new_sort);
        query.sort = new_sort;
        changed = true;
    }

    if changed {
        logd!("UI: Query → {:?}", app.state.gui.query);
        actions::refresh::load(app);
    }
}
