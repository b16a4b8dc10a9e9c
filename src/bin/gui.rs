// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use eframe::egui::ViewportBuilder;
use revenue_scrape::{ config::state::GuiState, gui };

fn main() {
    let size = GuiState::default();
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([size.window_w as f32, size.window_h as f32])
            .with_title("US Companies by Revenue"),
        ..Default::default()
    };

    if let Err(e) = gui::run(options) {
        eprintln!("GUI failed: {e}");
        std::process::exit(1);
    }
}
