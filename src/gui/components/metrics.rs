// src/gui/components/metrics.rs
//
// Summary row over the current (filtered) view.

use eframe::egui::{ self, RichText };

use crate::{ gui::app::App, view::Summary };
use super::fmt_thousands;

fn metric(ui: &mut egui::Ui, label: &str, value: String) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(label).small());
            ui.label(RichText::new(value).heading().strong());
        });
    });
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let summary = app.view().map(|v| v.summary()).unwrap_or_default();
    let Summary { companies, total_revenue, total_employees, industries } = summary;

    ui.horizontal(|ui| {
        metric(ui, "Total Companies", fmt_thousands(companies as u64));
        metric(ui, "Total Revenue (USD millions)", join!("$", &fmt_thousands(total_revenue.round() as u64)));
        metric(ui, "Total Employees", fmt_thousands(total_employees));
        metric(ui, "Industries", fmt_thousands(industries as u64));
    });
}
