use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotBounds, PlotPoint, Points, Polygon, Text};

use crate::color::{ColorMap, generate_palette};
use crate::data::region::RegionView;
use crate::present::{BarChartData, MapPoint, PieChartData};

const BAR_COLOR: Color32 = Color32::from_rgb(135, 206, 235);

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// One bar per category, labelled underneath.
pub fn bar_chart(ui: &mut Ui, chart: &BarChartData) {
    if chart.values.is_empty() {
        ui.weak("No companies to chart.");
        return;
    }

    let bars: Vec<Bar> = chart
        .categories
        .iter()
        .zip(&chart.values)
        .enumerate()
        .map(|(i, (name, &value))| Bar::new(i as f64, value).name(name).width(0.6))
        .collect();
    let floor = chart.values.iter().copied().fold(0.0, f64::min);

    ui.label(RichText::new(&chart.title).strong());
    Plot::new("profit_bar_chart")
        .height(320.0)
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name(&chart.series_label)
                    .color(BAR_COLOR),
            );
            for (i, name) in chart.categories.iter().enumerate() {
                plot_ui.text(
                    Text::new(PlotPoint::new(i as f64, floor), short_label(name))
                        .anchor(Align2::CENTER_TOP),
                );
            }
        });
}

/// Long company names are cut so neighbouring labels do not collide.
fn short_label(name: &str) -> String {
    const MAX: usize = 14;
    if name.chars().count() <= MAX {
        name.to_string()
    } else {
        let head: String = name.chars().take(MAX - 1).collect();
        format!("{head}…")
    }
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Angular extent of one pie slice, in radians, counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieSlice {
    pub start: f64,
    pub sweep: f64,
    pub fraction: f64,
}

impl PieSlice {
    pub fn mid_angle(&self) -> f64 {
        self.start + self.sweep / 2.0
    }

    /// Convex outlines covering the slice. Egui fills polygons as convex
    /// shapes, so slices wider than a quarter turn are split.
    pub fn outlines(&self) -> Vec<Vec<[f64; 2]>> {
        const MAX_CHUNK: f64 = FRAC_PI_2;
        const STEP: f64 = TAU / 180.0;

        let chunks = (self.sweep / MAX_CHUNK).ceil().max(1.0) as usize;
        let chunk_sweep = self.sweep / chunks as f64;

        (0..chunks)
            .map(|c| {
                let from = self.start + c as f64 * chunk_sweep;
                let steps = (chunk_sweep / STEP).ceil().max(1.0) as usize;
                let mut outline = Vec::with_capacity(steps + 2);
                outline.push([0.0, 0.0]);
                for s in 0..=steps {
                    let angle = from + chunk_sweep * s as f64 / steps as f64;
                    outline.push([angle.cos(), angle.sin()]);
                }
                outline
            })
            .collect()
    }
}

/// Split a unit circle proportionally to `values`, starting at 12 o'clock.
/// Negative values get no area; an all-zero input gives no slices.
pub fn pie_slices(values: &[f64]) -> Vec<PieSlice> {
    let total: f64 = values.iter().map(|v| v.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut start = FRAC_PI_2;
    values
        .iter()
        .map(|&v| {
            let fraction = v.max(0.0) / total;
            let slice = PieSlice {
                start,
                sweep: fraction * TAU,
                fraction,
            };
            start += slice.sweep;
            slice
        })
        .collect()
}

pub fn pie_chart(ui: &mut Ui, chart: &PieChartData) {
    let slices = pie_slices(&chart.values);
    if slices.is_empty() {
        ui.weak("Nothing to show.");
        return;
    }
    let colors = generate_palette(slices.len());

    Plot::new("market_value_pie")
        .height(360.0)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .include_x(-1.3)
        .include_x(1.3)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            for ((slice, label), color) in slices.iter().zip(&chart.labels).zip(&colors) {
                for outline in slice.outlines() {
                    plot_ui.polygon(
                        Polygon::new(outline)
                            .name(label)
                            .fill_color(*color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }
                if slice.fraction > 0.0 {
                    let (sin, cos) = slice.mid_angle().sin_cos();
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(0.65 * cos, 0.65 * sin),
                            format!("{:.1}%", slice.fraction * 100.0),
                        )
                        .color(Color32::BLACK),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Scatter of company locations in longitude/latitude space, framed by
/// `view` and coloured by continent. Hovering a point shows its tooltip.
pub fn company_map(ui: &mut Ui, points: &[MapPoint], view: RegionView, colors: &ColorMap) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (continent, color) in colors.legend_entries() {
            ui.label(RichText::new("●").color(color));
            ui.label(continent);
        }
    });

    let window = map_window(view);
    let ([lon_min, lat_min], [lon_max, lat_max]) = (window.min(), window.max());

    // The id changes with the view so a new continent resets pan and zoom.
    // With auto bounds off the initial (and double-click) frame is exactly
    // the included window, whatever the points span.
    Plot::new(("company_map", view.latitude.to_bits(), view.longitude.to_bits()))
        .height(420.0)
        .data_aspect(1.0)
        .include_x(lon_min)
        .include_x(lon_max)
        .include_y(lat_min)
        .include_y(lat_max)
        .auto_bounds(false)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{:.2}°, {:.2}°", value.y, value.x)
            } else {
                name.to_owned()
            }
        })
        .show(ui, |plot_ui| {
            for p in points {
                plot_ui.points(
                    Points::new(vec![[p.longitude, p.latitude]])
                        .radius(4.0)
                        .color(colors.color_for(&p.continent))
                        .name(&p.tooltip),
                );
            }
        });
}

/// Longitude/latitude window the map opens on for `view`.
pub fn map_window(view: RegionView) -> PlotBounds {
    let ([lon_min, lon_max], [lat_min, lat_max]) = view.bounds();
    PlotBounds::from_min_max([lon_min, lat_min], [lon_max, lat_max])
}
