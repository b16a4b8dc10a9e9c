// src/gui/components/charts.rs
//! Bar charts over the current view, drawn with egui_plot.
//!
//! Categories go on the vertical axis (horizontal bars) so long company and
//! industry names stay readable. Bar `i` sits at y = i, and the axis
//! formatter maps integer marks back to labels.

use eframe::egui::{ self, Color32 };
use egui_plot::{ Bar, BarChart, Plot };

use crate::{
    config::{ consts::CHART_TOP_N, state::ViewTab },
    gui::app::App,
    view::{ industry_counts, top_by_employees, top_by_revenue },
};
use super::fmt_thousands;

struct Series {
    labels: Vec<String>,
    values: Vec<f64>,
    value_label: &'static str,
    color: Color32,
}

fn series_for(app: &App, tab: ViewTab) -> Option<Series> {
    let view = app.view()?;
    let s = match tab {
        ViewTab::TopRevenue => {
            let top = top_by_revenue(&view, CHART_TOP_N);
            Series {
                labels: top.iter().map(|r| r.name.clone()).collect(),
                values: top.iter().map(|r| r.revenue_usd_millions).collect(),
                value_label: "Revenue (USD millions)",
                color: Color32::from_rgb(0x1F, 0x77, 0xB4),
            }
        }
        ViewTab::Employees => {
            let top = top_by_employees(&view, CHART_TOP_N);
            Series {
                labels: top.iter().map(|r| r.name.clone()).collect(),
                values: top.iter().map(|r| r.employees.unwrap_or(0) as f64).collect(),
                value_label: "Employees",
                color: Color32::from_rgb(0x2C, 0xA0, 0x2C),
            }
        }
        ViewTab::Industries => {
            let counts = industry_counts(&view);
            Series {
                labels: counts.iter().map(|(name, _)| name.clone()).collect(),
                values: counts.iter().map(|&(_, n)| n as f64).collect(),
                value_label: "Companies",
                color: Color32::from_rgb(0xFF, 0x7F, 0x0E),
            }
        }
        ViewTab::Table => return None,
    };
    Some(s)
}

pub fn draw(ui: &mut egui::Ui, app: &App, tab: ViewTab) {
    let Some(series) = series_for(app, tab) else {
        ui.label("No data yet.");
        return;
    };
    if series.values.is_empty() {
        ui.label("Nothing matches the current filters.");
        return;
    }

    ui.heading(tab.title());

    // Largest on top: plot y grows upwards, so reverse the order
    let n = series.labels.len();
    let bars: Vec<Bar> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            Bar::new((n - 1 - i) as f64, v)
                .name(series.labels[i].as_str())
                .width(0.7)
                .fill(series.color)
        })
        .collect();

    let value_label = series.value_label;
    let chart = BarChart::new(value_label, bars)
        .horizontal()
        .color(series.color)
        .element_formatter(Box::new(move |bar: &Bar, _chart: &BarChart| {
            format!("{}\n{}: {}", bar.name, value_label, fmt_thousands(bar.value.round() as u64))
        }));

    let labels = series.labels;
    Plot::new(("bar_chart", tab.title()))
        .height(ui.available_height().max(200.0))
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show_grid([true, false])
        .x_axis_label(value_label)
        .y_axis_min_width(160.0)
        .y_axis_formatter(move |mark, _range| {
            let v = mark.value;
            if v.fract() != 0.0 || v < 0.0 {
                return s!();
            }
            let pos = v as usize;
            if pos >= n { return s!(); }
            labels.get(n - 1 - pos).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
