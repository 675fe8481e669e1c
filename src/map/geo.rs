use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Initial view center (Washington, DC).
pub const MAP_CENTER: LatLng = LatLng::new(38.895111, -77.036667);

/// Fixed marker slots. Symbols are placed here in response order; the
/// positions carry no meaning about the symbols themselves.
pub const PRESET_POSITIONS: [LatLng; 5] = [
    LatLng::new(38.8945036, -77.0355398),
    LatLng::new(38.8991629, -77.0425136),
    LatLng::new(38.9088221, -77.0272914),
    LatLng::new(38.9135349, -77.0393075),
    LatLng::new(38.9169409, -77.0547570),
];

/// Axis-aligned lat/lng box used as the visible map extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// Smallest box holding `center` and every point, grown by `pad` on each side.
    pub fn around(center: LatLng, points: &[LatLng], pad: f64) -> Self {
        let mut b = Self {
            south: center.lat,
            west: center.lng,
            north: center.lat,
            east: center.lng,
        };
        for p in points {
            b.south = b.south.min(p.lat);
            b.north = b.north.max(p.lat);
            b.west = b.west.min(p.lng);
            b.east = b.east.max(p.lng);
        }
        b.south -= pad;
        b.west -= pad;
        b.north += pad;
        b.east += pad;
        b
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south && p.lat <= self.north && p.lng >= self.west && p.lng <= self.east
    }

    /// `[x, y]` bounds for a ratatui canvas, x = longitude, y = latitude.
    pub fn x_bounds(&self) -> [f64; 2] {
        [self.west, self.east]
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        [self.south, self.north]
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::around(MAP_CENTER, &PRESET_POSITIONS, 0.004)
    }
}
