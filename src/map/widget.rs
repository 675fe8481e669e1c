use crate::map::marker::{MapMarker, Popup};

/// Marker primitives the presenter needs from a map widget.
pub trait MapWidget {
    fn clear_markers(&mut self);
    fn add_marker(&mut self, marker: MapMarker);
    fn markers(&self) -> &[MapMarker];
}

/// In-memory marker layer backing the terminal map.
///
/// Popups are bound to markers but only shown once a marker is activated.
#[derive(Debug, Default, Clone)]
pub struct MarkerLayer {
    markers: Vec<MapMarker>,
    active: Option<usize>,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_popup(&self) -> Option<&Popup> {
        self.active
            .and_then(|i| self.markers.get(i))
            .map(|m| &m.popup)
    }

    pub fn activate(&mut self, index: usize) -> bool {
        if index < self.markers.len() {
            self.active = Some(index);
            true
        } else {
            false
        }
    }

    pub fn activate_next(&mut self) {
        if self.markers.is_empty() {
            return;
        }
        self.active = Some(match self.active {
            Some(i) => (i + 1) % self.markers.len(),
            None => 0,
        });
    }

    pub fn activate_prev(&mut self) {
        if self.markers.is_empty() {
            return;
        }
        let n = self.markers.len();
        self.active = Some(match self.active {
            Some(i) => (i + n - 1) % n,
            None => n - 1,
        });
    }

    pub fn dismiss_popup(&mut self) {
        self.active = None;
    }
}

impl MapWidget for MarkerLayer {
    fn clear_markers(&mut self) {
        self.markers.clear();
        self.active = None;
    }

    fn add_marker(&mut self, marker: MapMarker) {
        self.markers.push(marker);
    }

    fn markers(&self) -> &[MapMarker] {
        &self.markers
    }
}
