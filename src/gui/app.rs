// src/gui/app.rs
use std::{ error::Error, sync::Arc };

use eframe::egui;

use crate::{
    cache::DatasetCache,
    config::state::AppState,
    model::Dataset,
    pipeline::HttpSource,
    view::{ self, RecordView },
};

use super::{ actions, components };

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "US Companies by Revenue",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // memoized pipeline; owns the only dataset slot
    pub cache: DatasetCache<HttpSource>,

    // dataset currently on screen (may be stale after a failed refresh)
    pub dataset: Option<Arc<Dataset>>,

    // filter choices derived from `dataset`
    pub industries: Vec<String>,

    // indices into `dataset` for the current query (table, charts, export)
    pub row_ix: Vec<usize>,

    // revenue range text fields (parsed into the query on edit)
    pub min_revenue_text: String,
    pub max_revenue_text: String,

    // output text field UX (we map this <-> ExportOptions)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    pub status: String,

    // first `get()` happens on the first frame, after the window is up
    pub initial_load_done: bool,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let cache = DatasetCache::new(HttpSource::new(&state.options.fetch), state.options.cache.ttl);
        let out_path_text = format!(
            "{}{}",
            state.options.export.dir().display(),
            std::path::MAIN_SEPARATOR
        );

        logf!(
            "Init: source={} ttl={}s",
            state.options.fetch.url,
            state.options.cache.ttl.as_secs()
        );

        Self {
            state,
            cache,
            dataset: None,
            industries: Vec::new(),
            row_ix: Vec::new(),
            min_revenue_text: s!(),
            max_revenue_text: s!(),
            out_path_text,
            out_path_dirty: false,
            status: s!("Loading…"),
            initial_load_done: false,
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn status<T: Into<String>>(&mut self, msg: T) {
        self.status = msg.into();
    }

    /// Swap in a new dataset and recompute everything derived from it.
    pub fn set_dataset(&mut self, ds: Arc<Dataset>) {
        let same = self.dataset.as_ref().is_some_and(|cur| Arc::ptr_eq(cur, &ds));
        if !same {
            self.industries = view::industries(&ds);
            // Forget selections that no longer exist
            let known = &self.industries;
            self.state.gui.query.industries.retain(|i| known.contains(i));
            self.dataset = Some(ds);
        }
        self.rebuild_view();
    }

    /// Recompute `row_ix` from the current query.
    pub fn rebuild_view(&mut self) {
        self.row_ix = match &self.dataset {
            Some(ds) => view::select(ds, &self.state.gui.query),
            None => Vec::new(),
        };
        logd!("View: rebuilt rows={}", self.row_ix.len());
    }

    /// Projection of the current dataset through the current query.
    pub fn view(&self) -> Option<RecordView<'_>> {
        self.dataset
            .as_deref()
            .map(|ds| RecordView::from_indices(ds, self.row_ix.clone()))
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.initial_load_done {
            self.initial_load_done = true;
            actions::refresh::load(self);
        }

        egui::SidePanel::left("controls")
            .resizable(false)
            .min_width(240.0)
            .show(ctx, |ui| {
                components::controls::draw(ui, self);
            });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::metrics::draw(ui, self);

            ui.separator();

            components::export_bar::draw(ui, self);

            ui.separator();

            components::tabs::draw(ui, self);

            ui.separator();

            match self.state.gui.tab {
                crate::config::state::ViewTab::Table => components::data_table::draw(ui, self),
                tab => components::charts::draw(ui, self, tab),
            }
        });
    }
}
