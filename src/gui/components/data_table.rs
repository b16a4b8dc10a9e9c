// src/gui/components/data_table.rs
//
// Draws the live table from `app.row_ix`. Clicking a header sorts by that
// column; clicking it again flips the direction.

use eframe::egui::{ self, Align, Layout, RichText, TextWrapMode, Sense, CursorIcon };
use egui_extras::{ Column as TableColumn, TableBuilder };

use crate::{ gui::app::App, model::Column, view::SortDir };

fn preferred_width(col: Column) -> f32 {
    match col {
        Column::Rank          => 50.0,
        Column::Name          => 220.0,
        Column::Industry      => 180.0,
        Column::Revenue       => 150.0,
        Column::RevenueGrowth => 120.0,
        Column::Employees     => 110.0,
        Column::Headquarters  => 200.0,
    }
}

fn growth_color(v: f64) -> egui::Color32 {
    if v < 0.0 {
        egui::Color32::from_rgb(0xDC, 0x61, 0x49)
    } else {
        egui::Color32::from_rgb(0x4C, 0xAF, 0x50)
    }
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let Some(ds) = app.dataset.clone() else {
        ui.label("No data yet. Use \"Refresh Data\" to fetch the table.");
        return;
    };

    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
    }

    let current_sort = app.state.gui.query.sort;
    let mut clicked: Option<Column> = None;

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .min_scrolled_height(0.0)
        .max_scroll_height(f32::INFINITY);
    for col in Column::ALL {
        table = table.column(TableColumn::initial(preferred_width(col)).resizable(true).clip(true).at_least(30.0));
    }

    table
        .header(24.0, |mut header| {
            for col in Column::ALL {
                header.col(|ui| {
                    ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                    let arrow = match current_sort {
                        Some((c, SortDir::Asc)) if c == col => " ▲",
                        Some((c, SortDir::Desc)) if c == col => " ▼",
                        _ => "",
                    };
                    let text = RichText::new(join!(col.header(), arrow)).strong();
                    let resp = ui
                        .add(egui::Label::new(text).selectable(false).sense(Sense::click()))
                        .on_hover_cursor(CursorIcon::PointingHand);
                    if resp.clicked() {
                        clicked = Some(col);
                    }
                });
            }
        })
        .body(|body| {
            let recs = ds.records();
            body.rows(20.0, app.row_ix.len(), |mut row| {
                let Some(rec) = app.row_ix.get(row.index()).and_then(|&ix| recs.get(ix)) else { return };
                for col in Column::ALL {
                    row.col(|ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                        let mut rt = RichText::new(display_cell(rec, col));
                        if col == Column::RevenueGrowth {
                            if let Some(v) = rec.revenue_growth_pct {
                                rt = rt.color(growth_color(v));
                            }
                        }
                        if col.is_numeric() {
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| { ui.label(rt); });
                        } else {
                            ui.with_layout(Layout::left_to_right(Align::Center), |ui| { ui.label(rt); });
                        }
                    });
                }
            });
        });

    if let Some(col) = clicked {
        let next = match current_sort {
            Some((c, dir)) if c == col => (col, dir.flip()),
            // numbers read best largest-first, text A→Z
            _ if col.is_numeric() && col != Column::Rank => (col, SortDir::Desc),
            _ => (col, SortDir::Asc),
        };
        logf!("UI: Header sort → {:?}", next);
        app.state.gui.query.sort = Some(next);
        app.rebuild_view();
    }
}

/// Table text: thousands separators and a % sign where they help reading.
fn display_cell(rec: &crate::model::CompanyRecord, col: Column) -> String {
    match col {
        Column::Revenue => join!("$", &super::fmt_thousands(rec.revenue_usd_millions.round() as u64)),
        Column::Employees => rec.employees.map(super::fmt_thousands).unwrap_or_default(),
        Column::RevenueGrowth => rec.revenue_growth_pct.map(|v| format!("{v:+.1}%")).unwrap_or_default(),
        other => rec.cell(other),
    }
}
