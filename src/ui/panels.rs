use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::search::SearchMode;
use crate::state::{AppState, TOP_N_BOUNDS};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            continent_selector(ui, state);
            ui.separator();
            country_selector(ui, state);
            ui.separator();
            top_n_slider(ui, state);
            ui.separator();
            market_value_sliders(ui, state);
        });
}

fn continent_selector(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Select a Continent");

    let mut chosen: Option<String> = None;
    egui::ComboBox::from_id_salt("continent")
        .selected_text(state.continent.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &state.continent_options {
                if ui
                    .selectable_label(state.continent == *option, option.as_str())
                    .clicked()
                {
                    chosen = Some(option.clone());
                }
            }
        });

    if let Some(continent) = chosen {
        state.set_continent(&continent);
    }
}

fn country_selector(ui: &mut Ui, state: &mut AppState) {
    let header_text = format!(
        "Select Country/Countries  ({}/{})",
        state.selected_countries.len(),
        state.country_options.len()
    );

    let mut toggled: Option<String> = None;
    let mut clear = false;

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt("countries")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if ui.small_button("Clear").clicked() {
                clear = true;
            }
            for country in &state.country_options {
                let mut checked = state.selected_countries.contains(country);
                if ui.checkbox(&mut checked, country.as_str()).changed() {
                    toggled = Some(country.clone());
                }
            }
        });

    if clear {
        state.clear_countries();
    } else if let Some(country) = toggled {
        state.toggle_country(&country);
    }
}

fn top_n_slider(ui: &mut Ui, state: &mut AppState) {
    ui.strong("How many top companies to display?");
    let mut n = state.top_n;
    if ui.add(Slider::new(&mut n, TOP_N_BOUNDS)).changed() {
        if let Err(e) = state.set_top_n(n) {
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}

fn market_value_sliders(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Select Market Value Range (in $B)");

    let (min_bound, max_bound) = state.market_value_bounds;
    let mut low = state.market_value_range.low();
    let mut high = state.market_value_range.high();

    let low_changed = ui
        .add(Slider::new(&mut low, min_bound..=max_bound).integer().text("from"))
        .changed();
    let high_changed = ui
        .add(Slider::new(&mut high, min_bound..=max_bound).integer().text("to"))
        .changed();

    if !(low_changed || high_changed) {
        return;
    }
    // Dragging one handle past the other pushes it along.
    if low_changed && low > high {
        high = low;
    } else if high_changed && high < low {
        low = high;
    }
    if let Err(e) = state.set_market_value_range(low, high) {
        state.status_message = Some(format!("Error: {e}"));
    }
}

// ---------------------------------------------------------------------------
// Search box
// ---------------------------------------------------------------------------

/// Company name search input. Re-runs the search on every edit.
pub fn search_box(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Search for a Company by Name");
        let edited = ui.text_edit_singleline(&mut state.search_query).changed();

        let mut pattern = state.search_mode == SearchMode::Pattern;
        let toggled = ui
            .checkbox(&mut pattern, "regex")
            .on_hover_text("Treat the query as a regular expression")
            .changed();
        if toggled {
            state.search_mode = if pattern {
                SearchMode::Pattern
            } else {
                SearchMode::Substring
            };
        }

        if edited || toggled {
            state.run_search();
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.dataset.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                if state.reload().is_err() {
                    log::debug!("Reload failed; keeping the previous dataset");
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let selected = state
                .dashboard
                .as_ref()
                .map(|d| d.high_value.len())
                .unwrap_or_default();
            ui.label(format!(
                "{} companies loaded, {selected} in selection",
                ds.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open company data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if state.open(&path).is_ok() {
            log::info!("Opened {}", path.display());
        }
    }
}
