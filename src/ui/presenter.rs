use eframe::egui::{Color32, RichText, Ui};

use super::{plot, table};
use crate::color::ColorMap;
use crate::data::model::CompanyRecord;
use crate::data::region::RegionView;
use crate::present::{BarChartData, MapPoint, PieChartData, Presenter, TableColumn};

const WARNING_COLOR: Color32 = Color32::from_rgb(230, 160, 0);

// ---------------------------------------------------------------------------
// egui-backed Presenter
// ---------------------------------------------------------------------------

/// Draws presenter calls into an egui `Ui`, top to bottom.
pub struct EguiPresenter<'a> {
    ui: &'a mut Ui,
    colors: &'a ColorMap,
    /// Tables drawn so far, used to give each its own id.
    tables: usize,
}

impl<'a> EguiPresenter<'a> {
    pub fn new(ui: &'a mut Ui, colors: &'a ColorMap) -> Self {
        EguiPresenter {
            ui,
            colors,
            tables: 0,
        }
    }
}

impl Presenter for EguiPresenter<'_> {
    fn render_heading(&mut self, text: &str) {
        self.ui.add_space(12.0);
        self.ui.heading(text);
    }

    fn render_note(&mut self, text: &str) {
        self.ui.label(text);
    }

    fn render_table(&mut self, rows: &[&CompanyRecord], columns: &[TableColumn]) {
        table::company_table(self.ui, ("company_table", self.tables), rows, columns);
        self.tables += 1;
    }

    fn render_bar_chart(&mut self, chart: &BarChartData) {
        plot::bar_chart(self.ui, chart);
    }

    fn render_pie_chart(&mut self, chart: &PieChartData) {
        plot::pie_chart(self.ui, chart);
    }

    fn render_map(&mut self, points: &[MapPoint], view: RegionView) {
        plot::company_map(self.ui, points, view, self.colors);
    }

    fn render_warning(&mut self, message: &str) {
        self.ui
            .label(RichText::new(format!("⚠ {message}")).color(WARNING_COLOR));
    }

    fn render_error(&mut self, message: &str) {
        self.ui.label(RichText::new(message).color(Color32::RED));
    }
}
