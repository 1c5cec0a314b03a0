// ---------------------------------------------------------------------------
// Map camera per continent
// ---------------------------------------------------------------------------

/// Where the map is centred and how far it is zoomed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
}

impl RegionView {
    pub const WORLD: RegionView = RegionView::new(20.0, 0.0, 1.5);

    pub const fn new(latitude: f64, longitude: f64, zoom: f64) -> Self {
        RegionView {
            latitude,
            longitude,
            zoom,
        }
    }

    /// Visible `([lon_min, lon_max], [lat_min, lat_max])` window.
    ///
    /// Each zoom level halves the span; at zoom 0 the window covers twice
    /// the globe's width, so the world view still shows every longitude.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let lon_span = (720.0 / self.zoom.exp2()).min(360.0);
        let lat_span = (lon_span / 2.0).min(180.0);

        let lon_min = (self.longitude - lon_span / 2.0).clamp(-180.0, 180.0 - lon_span);
        let lat_min = (self.latitude - lat_span / 2.0).clamp(-90.0, 90.0 - lat_span);

        (
            [lon_min, lon_min + lon_span],
            [lat_min, lat_min + lat_span],
        )
    }
}

const CONTINENT_VIEWS: [(&str, RegionView); 6] = [
    ("Asia", RegionView::new(34.0, 100.0, 2.5)),
    ("Europe", RegionView::new(54.0, 15.0, 3.0)),
    ("North America", RegionView::new(40.0, -100.0, 3.0)),
    ("South America", RegionView::new(-15.0, -60.0, 3.0)),
    ("Africa", RegionView::new(0.0, 20.0, 3.0)),
    ("Oceania", RegionView::new(-25.0, 140.0, 3.0)),
];

/// Camera for `continent`; the world view for "All" or any unknown name.
pub fn region_view(continent: &str) -> RegionView {
    CONTINENT_VIEWS
        .iter()
        .find(|(name, _)| *name == continent)
        .map(|(_, view)| *view)
        .unwrap_or(RegionView::WORLD)
}
