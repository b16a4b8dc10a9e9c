// src/gui/components/tabs.rs

use eframe::egui;
use crate::{ config::state::ViewTab, gui::app::App };

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        let cur = app.state.gui.tab;
        for tab in ViewTab::ALL {
            let selected = tab == cur;
            if ui.selectable_label(selected, tab.title()).clicked() && !selected {
                logf!("UI: Tab switch {:?} → {:?}", cur, tab);
                app.state.gui.tab = tab;
            }
        }
    });
}
