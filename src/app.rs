use std::path::Path;

use eframe::egui::{self, ScrollArea, Ui};

use crate::present::{Presenter, present_dashboard, present_search};
use crate::state::AppState;
use crate::ui::panels;
use crate::ui::presenter::EguiPresenter;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct CompanyExplorerApp {
    pub state: AppState,
}

impl CompanyExplorerApp {
    /// Start with `dataset` loaded, if given. A load failure is shown in the
    /// top bar and the app starts empty.
    pub fn new(dataset: Option<&Path>) -> Self {
        let mut state = AppState::default();
        if let Some(path) = dataset {
            if state.open(path).is_err() {
                log::warn!("Starting without a dataset");
            }
        }
        Self { state }
    }
}

impl eframe::App for CompanyExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: dashboard + search ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    dashboard_page(ui, &mut self.state);
                });
        });
    }
}

fn dashboard_page(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Top 2000 Global Companies Explorer");
    ui.label(
        "Global ranking of the top 2000 largest companies in the world based on revenue, \
         profits, assets, and market value, as of 2020.",
    );
    ui.separator();

    let (Some(dataset), Some(dashboard)) = (&state.dataset, &state.dashboard) else {
        let mut presenter = EguiPresenter::new(ui, &state.color_map);
        match &state.status_message {
            Some(msg) => presenter.render_error(msg),
            None => presenter.render_note("Open a file to explore companies  (File → Open…)"),
        }
        return;
    };

    present_dashboard(
        dataset,
        dashboard,
        &mut EguiPresenter::new(ui, &state.color_map),
    );

    ui.add_space(12.0);
    ui.separator();
    panels::search_box(ui, state);

    if let Some(dataset) = &state.dataset {
        present_search(
            dataset,
            &state.search_query,
            &state.search_outcome,
            &mut EguiPresenter::new(ui, &state.color_map),
        );
    }
}
