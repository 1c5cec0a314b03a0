use crate::dashboard::Dashboard;
use crate::data::model::{
    COL_COMPANY, COL_CONTINENT, COL_COUNTRY, COL_GLOBAL_RANK, COL_MARKET_VALUE, COL_PROFITS,
    COL_SALES, CompanyDataset, CompanyRecord,
};
use crate::data::region::RegionView;
use crate::data::search::SearchOutcome;

// ---------------------------------------------------------------------------
// Render payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableColumn {
    GlobalRank,
    Company,
    Country,
    Continent,
    Sales,
    Profits,
    MarketValue,
}

impl TableColumn {
    pub fn header(self) -> &'static str {
        match self {
            TableColumn::GlobalRank => COL_GLOBAL_RANK,
            TableColumn::Company => COL_COMPANY,
            TableColumn::Country => COL_COUNTRY,
            TableColumn::Continent => COL_CONTINENT,
            TableColumn::Sales => COL_SALES,
            TableColumn::Profits => COL_PROFITS,
            TableColumn::MarketValue => COL_MARKET_VALUE,
        }
    }

    pub fn cell(self, rec: &CompanyRecord) -> String {
        match self {
            TableColumn::GlobalRank => rec.global_rank.to_string(),
            TableColumn::Company => rec.company.clone(),
            TableColumn::Country => rec.country.clone(),
            TableColumn::Continent => rec.continent.clone(),
            TableColumn::Sales => rec.sales.to_string(),
            TableColumn::Profits => rec.profits.to_string(),
            TableColumn::MarketValue => rec.market_value.to_string(),
        }
    }

    /// Right-align numbers.
    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            TableColumn::Company | TableColumn::Country | TableColumn::Continent
        )
    }
}

pub const HIGH_VALUE_COLUMNS: [TableColumn; 5] = [
    TableColumn::GlobalRank,
    TableColumn::Company,
    TableColumn::Country,
    TableColumn::MarketValue,
    TableColumn::Profits,
];

pub const SEARCH_COLUMNS: [TableColumn; 7] = [
    TableColumn::GlobalRank,
    TableColumn::Company,
    TableColumn::Country,
    TableColumn::Continent,
    TableColumn::Sales,
    TableColumn::Profits,
    TableColumn::MarketValue,
];

#[derive(Debug, Clone, PartialEq)]
pub struct BarChartData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series_label: String,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub continent: String,
    pub tooltip: String,
}

impl MapPoint {
    pub fn from_record(rec: &CompanyRecord) -> Self {
        MapPoint {
            latitude: rec.latitude,
            longitude: rec.longitude,
            continent: rec.continent.clone(),
            tooltip: format!(
                "Company: {}\nCountry: {}\nMarket Value: {} B",
                rec.company, rec.country, rec.market_value
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Presenter – the display surface
// ---------------------------------------------------------------------------

/// Something that can show computed results. The data layer never draws;
/// it hands finished rows and series to a `Presenter`.
pub trait Presenter {
    fn render_heading(&mut self, text: &str);
    fn render_note(&mut self, text: &str);
    fn render_table(&mut self, rows: &[&CompanyRecord], columns: &[TableColumn]);
    fn render_bar_chart(&mut self, chart: &BarChartData);
    fn render_pie_chart(&mut self, chart: &PieChartData);
    fn render_map(&mut self, points: &[MapPoint], view: RegionView);
    fn render_warning(&mut self, message: &str);
    fn render_error(&mut self, message: &str);
}

/// Emit the dashboard sections in page order.
pub fn present_dashboard(
    dataset: &CompanyDataset,
    dashboard: &Dashboard,
    presenter: &mut impl Presenter,
) {
    let n = dashboard.top_n;
    let (max_mv, min_mv) = dashboard.market_extremes;
    presenter.render_note(&format!(
        "Max Market Value: ${max_mv:?}B | Min Market Value: ${min_mv:?}B"
    ));

    presenter.render_heading("High Market Value Companies");
    let rows: Vec<&CompanyRecord> = dashboard.table.records(dataset).collect();
    presenter.render_table(&rows, &HIGH_VALUE_COLUMNS);

    presenter.render_heading(&format!("Top {n} Most Profitable Companies"));
    let (categories, values) = dashboard
        .top_profit
        .records(dataset)
        .map(|rec| (rec.company.clone(), rec.profits))
        .unzip();
    presenter.render_bar_chart(&BarChartData {
        title: "Top Companies by Profit".to_string(),
        x_label: "Company".to_string(),
        y_label: "Profits ($Billion)".to_string(),
        series_label: "Profits ($B)".to_string(),
        categories,
        values,
    });

    presenter.render_heading(&format!("Market Value Distribution (Top {n})"));
    if let Some(pie) = &dashboard.pie {
        let (labels, values) = pie
            .records(dataset)
            .map(|rec| (rec.company.clone(), rec.market_value))
            .unzip();
        presenter.render_pie_chart(&PieChartData { labels, values });
    }

    presenter.render_heading("High Market Value Companies Map");
    let points: Vec<MapPoint> = dashboard
        .high_value
        .records(dataset)
        .map(MapPoint::from_record)
        .collect();
    presenter.render_map(&points, dashboard.region);
}

/// Show the outcome of a name search. Nothing is shown for an empty query.
pub fn present_search(
    dataset: &CompanyDataset,
    query: &str,
    outcome: &SearchOutcome,
    presenter: &mut impl Presenter,
) {
    if query.is_empty() {
        return;
    }
    match outcome {
        SearchOutcome::Idle => {}
        SearchOutcome::Success(view) if view.is_empty() => {
            presenter.render_warning("Company not found.");
        }
        SearchOutcome::Success(view) => {
            let rows: Vec<&CompanyRecord> = view.records(dataset).collect();
            presenter.render_table(&rows, &SEARCH_COLUMNS);
        }
        SearchOutcome::Failure(message) => {
            presenter.render_warning(&format!("Error: {message}"));
        }
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    /// Presenter that logs every call as a line of text.
    #[derive(Debug, Default)]
    pub struct RecordingPresenter {
        pub calls: Vec<String>,
    }

    impl Presenter for RecordingPresenter {
        fn render_heading(&mut self, text: &str) {
            self.calls.push(format!("heading {text}"));
        }

        fn render_note(&mut self, text: &str) {
            self.calls.push(format!("note {text}"));
        }

        fn render_table(&mut self, rows: &[&CompanyRecord], columns: &[TableColumn]) {
            let names: Vec<&str> = rows.iter().map(|r| r.company.as_str()).collect();
            self.calls
                .push(format!("table {}x{} {names:?}", rows.len(), columns.len()));
        }

        fn render_bar_chart(&mut self, chart: &BarChartData) {
            self.calls
                .push(format!("bar {:?} {:?}", chart.categories, chart.values));
        }

        fn render_pie_chart(&mut self, chart: &PieChartData) {
            self.calls
                .push(format!("pie {:?} {:?}", chart.labels, chart.values));
        }

        fn render_map(&mut self, points: &[MapPoint], view: RegionView) {
            self.calls
                .push(format!("map {} @ {},{} z{}", points.len(), view.latitude, view.longitude, view.zoom));
        }

        fn render_warning(&mut self, message: &str) {
            self.calls.push(format!("warning {message}"));
        }

        fn render_error(&mut self, message: &str) {
            self.calls.push(format!("error {message}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::recording::RecordingPresenter;
    use super::*;
    use crate::data::filter::{FilterCriteria, ValueRange};
    use crate::data::model::fixtures::{abc, mixed};
    use crate::data::search::{SearchMode, search_by_name};

    #[test]
    fn dashboard_sections_in_page_order() {
        let ds = abc();
        let criteria = FilterCriteria {
            continent: Some("Europe".to_string()),
            market_value_range: ValueRange::new(100.0, 500.0).unwrap(),
            ..FilterCriteria::default()
        };
        let dash = Dashboard::compute(&ds, &criteria, 1).unwrap();

        let mut p = RecordingPresenter::default();
        present_dashboard(&ds, &dash, &mut p);

        assert_eq!(
            p.calls,
            [
                "note Max Market Value: $600.0B | Min Market Value: $50.0B",
                "heading High Market Value Companies",
                "table 1x5 [\"C\"]",
                "heading Top 1 Most Profitable Companies",
                "bar [\"C\"] [20.0]",
                "heading Market Value Distribution (Top 1)",
                "pie [\"C\"] [300.0]",
                "heading High Market Value Companies Map",
                "map 1 @ 54,15 z3",
            ]
        );
    }

    #[test]
    fn empty_subset_skips_the_pie() {
        let ds = abc();
        let criteria = FilterCriteria {
            market_value_range: ValueRange::new(1000.0, 2000.0).unwrap(),
            ..FilterCriteria::default()
        };
        let dash = Dashboard::compute(&ds, &criteria, 10).unwrap();

        let mut p = RecordingPresenter::default();
        present_dashboard(&ds, &dash, &mut p);

        assert!(p.calls.iter().all(|c| !c.starts_with("pie")));
        assert!(p.calls.contains(&"table 0x5 []".to_string()));
        assert!(p.calls.contains(&"map 0 @ 20,0 z1.5".to_string()));
    }

    #[test]
    fn search_outcomes() {
        let ds = mixed();

        let mut p = RecordingPresenter::default();
        let found = SearchOutcome::from_result(search_by_name(&ds, "sony", SearchMode::Substring));
        present_search(&ds, "sony", &found, &mut p);
        assert_eq!(p.calls, ["table 1x7 [\"Sony\"]"]);

        let mut p = RecordingPresenter::default();
        let missing = SearchOutcome::from_result(search_by_name(&ds, "zzz", SearchMode::Substring));
        present_search(&ds, "zzz", &missing, &mut p);
        assert_eq!(p.calls, ["warning Company not found."]);

        let mut p = RecordingPresenter::default();
        let fault = SearchOutcome::from_result(search_by_name(&ds, "[", SearchMode::Pattern));
        present_search(&ds, "[", &fault, &mut p);
        assert_eq!(p.calls.len(), 1);
        assert!(p.calls[0].starts_with("warning Error: search failed"));

        let mut p = RecordingPresenter::default();
        present_search(&ds, "", &SearchOutcome::Idle, &mut p);
        assert!(p.calls.is_empty());
    }

    #[test]
    fn map_tooltip_names_company_country_and_value() {
        let ds = abc();
        let point = MapPoint::from_record(&ds.records[2]);
        assert_eq!(point.tooltip, "Company: C\nCountry: Germany\nMarket Value: 300 B");
        assert_eq!(point.continent, "Europe");
    }

    #[test]
    fn numeric_columns_are_flagged() {
        assert!(TableColumn::MarketValue.is_numeric());
        assert!(!TableColumn::Company.is_numeric());
        assert_eq!(TableColumn::Profits.cell(&abc().records[1]), "50");
    }
}
