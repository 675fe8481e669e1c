use tracing::{info, warn};

use crate::map::geo::{LatLng, PRESET_POSITIONS};
use crate::map::marker::MapMarker;
use crate::map::widget::MapWidget;
use crate::symbols::SymbolSearchResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The service answered without a body.
    NoData,
    /// `hitscount` was below one.
    NoHits,
    /// Hits were reported but none of the needed symbols were present.
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Empty { reason: EmptyReason },
    Populated { rendered: usize, skipped: Vec<usize> },
}

impl RenderOutcome {
    pub fn rendered(&self) -> usize {
        match self {
            RenderOutcome::Empty { .. } => 0,
            RenderOutcome::Populated { rendered, .. } => *rendered,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RenderOutcome::Empty { .. })
    }
}

/// Owns the marker widget and turns search replies into markers.
///
/// Every call to [`render`](Self::render) clears first and then adds, so the
/// widget always ends up either empty or holding one full result set.
#[derive(Debug)]
pub struct MapPresenter<W> {
    widget: W,
    positions: Vec<LatLng>,
}

impl<W: MapWidget> MapPresenter<W> {
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            positions: PRESET_POSITIONS.to_vec(),
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn markers(&self) -> &[MapMarker] {
        self.widget.markers()
    }

    pub fn render(&mut self, response: Option<&SymbolSearchResponse>) -> RenderOutcome {
        self.widget.clear_markers();

        let Some(response) = response else {
            info!("No data returned from request");
            return RenderOutcome::Empty {
                reason: EmptyReason::NoData,
            };
        };
        if response.hit_count < 1 {
            info!(hits = response.hit_count, "No symbols returned for request");
            return RenderOutcome::Empty {
                reason: EmptyReason::NoHits,
            };
        }

        let wanted = usize::try_from(response.hit_count)
            .unwrap_or(usize::MAX)
            .min(self.positions.len());
        let mut rendered = 0;
        let mut skipped = Vec::new();
        for (i, position) in self.positions.iter().take(wanted).enumerate() {
            let Some(symbol) = response.symbols.get(i) else {
                warn!(
                    index = i,
                    hits = response.hit_count,
                    returned = response.symbols.len(),
                    "malformed response: hitscount exceeds returned symbols; skipping"
                );
                skipped.push(i);
                continue;
            };
            self.widget
                .add_marker(MapMarker::from_symbol(*position, symbol));
            rendered += 1;
        }

        if rendered == 0 {
            return RenderOutcome::Empty {
                reason: EmptyReason::Malformed,
            };
        }
        info!(rendered, skipped = skipped.len(), "rendered symbol markers");
        RenderOutcome::Populated { rendered, skipped }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogCapture;
    use crate::map::widget::MarkerLayer;
    use crate::symbols::Symbol;

    /// Widget that counts calls on top of a real layer.
    #[derive(Default)]
    struct RecordingWidget {
        layer: MarkerLayer,
        clears: usize,
        adds: usize,
    }

    impl MapWidget for RecordingWidget {
        fn clear_markers(&mut self) {
            self.clears += 1;
            self.layer.clear_markers();
        }
        fn add_marker(&mut self, marker: MapMarker) {
            self.adds += 1;
            self.layer.add_marker(marker);
        }
        fn markers(&self) -> &[MapMarker] {
            self.layer.markers()
        }
    }

    fn symbols(n: usize) -> Vec<Symbol> {
        (0..n)
            .map(|i| Symbol {
                id: i as i64 + 100,
                name: format!("symbol-{i}"),
                icon_url: format!("http://example.test/{i}.png"),
                contributor_name: "Ada".into(),
                ..Default::default()
            })
            .collect()
    }

    fn response(hits: i64, n: usize) -> SymbolSearchResponse {
        SymbolSearchResponse {
            hit_count: hits,
            symbols: symbols(n),
            ..Default::default()
        }
    }

    #[test]
    fn zero_hits_clears_previous_markers() {
        let mut p = MapPresenter::new(RecordingWidget::default());
        p.render(Some(&response(3, 3)));
        assert_eq!(p.markers().len(), 3);

        let outcome = p.render(Some(&response(0, 0)));
        assert_eq!(
            outcome,
            RenderOutcome::Empty {
                reason: EmptyReason::NoHits
            }
        );
        assert!(p.markers().is_empty());
        assert_eq!(p.widget().clears, 2);
    }

    #[test]
    fn absent_response_clears_and_stops() {
        let mut p = MapPresenter::new(MarkerLayer::new());
        p.render(Some(&response(2, 2)));
        let outcome = p.render(None);
        assert_eq!(
            outcome,
            RenderOutcome::Empty {
                reason: EmptyReason::NoData
            }
        );
        assert!(p.markers().is_empty());
    }

    #[test]
    fn caps_at_five_in_response_order() {
        let mut p = MapPresenter::new(MarkerLayer::new());
        let resp = response(7, 7);
        let outcome = p.render(Some(&resp));
        assert_eq!(outcome.rendered(), 5);
        let markers = p.markers();
        assert_eq!(markers.len(), 5);
        for (i, m) in markers.iter().enumerate() {
            assert_eq!(m.position, PRESET_POSITIONS[i]);
            assert_eq!(m.symbol_id, resp.symbols[i].id);
            assert_eq!(m.title, resp.symbols[i].name);
        }
    }

    #[test]
    fn fewer_hits_than_positions() {
        for hits in 1..5 {
            let mut p = MapPresenter::new(MarkerLayer::new());
            let outcome = p.render(Some(&response(hits, 25)));
            assert_eq!(outcome.rendered(), hits as usize);
            assert_eq!(p.markers().len(), hits as usize);
        }
    }

    #[test]
    fn render_twice_is_idempotent() {
        let mut p = MapPresenter::new(MarkerLayer::new());
        let resp = response(4, 4);
        p.render(Some(&resp));
        let first = p.markers().to_vec();
        p.render(Some(&resp));
        assert_eq!(p.markers(), first.as_slice());
    }

    #[test]
    fn hitscount_overstating_symbols_skips_missing() {
        let logs = LogCapture::start();
        let mut p = MapPresenter::new(RecordingWidget::default());
        let outcome = p.render(Some(&response(3, 1)));
        assert_eq!(
            outcome,
            RenderOutcome::Populated {
                rendered: 1,
                skipped: vec![1, 2]
            }
        );
        assert_eq!(p.markers().len(), 1);
        assert_eq!(p.markers()[0].position, PRESET_POSITIONS[0]);
        assert_eq!(p.widget().adds, 1);

        let skipped: Vec<_> = logs
            .contents()
            .lines()
            .filter(|l| l.contains("hitscount exceeds returned symbols"))
            .map(str::to_string)
            .collect();
        assert_eq!(skipped.len(), 2);
        assert!(skipped.iter().all(|l| l.contains("WARN")));
        assert!(skipped[0].contains("index=1"));
        assert!(skipped[1].contains("index=2"));
    }

    #[test]
    fn hits_with_no_symbols_is_malformed_empty() {
        let mut p = MapPresenter::new(MarkerLayer::new());
        let outcome = p.render(Some(&response(2, 0)));
        assert_eq!(
            outcome,
            RenderOutcome::Empty {
                reason: EmptyReason::Malformed
            }
        );
        assert!(outcome.is_empty());
        assert!(p.markers().is_empty());
    }

    #[test]
    fn empty_replies_are_logged_as_info() {
        let logs = LogCapture::start();
        let mut p = MapPresenter::new(MarkerLayer::new());

        p.render(Some(&response(0, 0)));
        let line = logs.line_with("No symbols returned for request").unwrap();
        assert!(line.contains("INFO"));
        assert!(line.contains("hits=0"));

        p.render(None);
        let line = logs.line_with("No data returned from request").unwrap();
        assert!(line.contains("INFO"));
    }
}
