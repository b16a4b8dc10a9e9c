// src/config/state.rs
use super::options::AppOptions;
use crate::view::ViewQuery;

/// Which visualization the central panel shows under the metrics row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewTab {
    #[default]
    Table,
    TopRevenue,
    Industries,
    Employees,
}

impl ViewTab {
    pub const ALL: [ViewTab; 4] = [
        ViewTab::Table,
        ViewTab::TopRevenue,
        ViewTab::Industries,
        ViewTab::Employees,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ViewTab::Table      => "Company Data",
            ViewTab::TopRevenue => "Top Companies by Revenue",
            ViewTab::Industries => "Industry Distribution",
            ViewTab::Employees  => "Employee Count",
        }
    }
}

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Filter + sort applied to the live table, charts and exports
    pub query: ViewQuery,

    pub window_w: u32,
    pub window_h: u32,

    /// Active tab under the metrics row
    pub tab: ViewTab,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            query: ViewQuery::default(),
            window_w: 1280,
            window_h: 800,
            tab: ViewTab::default(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
