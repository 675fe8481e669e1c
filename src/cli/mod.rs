use anyhow::Result;
use clap::ValueEnum;
use serde_json::{Value, json};
use std::fmt::Write as _;
use std::io::{self, Write};
use tracing::{debug, error, info};

use crate::map::{MapMarker, MarkerLayer};
use crate::search::SearchController;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Geojson,
}

/// One search, printed to stdout. Returns `false` when the search failed.
pub async fn run_once(
    controller: &SearchController<MarkerLayer>,
    query: Option<&str>,
    format: OutputFormat,
) -> Result<bool> {
    let outcome = match controller.search_and_render(query).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let kind = if e.is_format() { "bad reply" } else { "network" };
            error!(err=%e, kind, "search failed");
            eprintln!("search failed ({kind}): {e}");
            return Ok(false);
        }
    };
    if outcome.is_empty() {
        info!(?outcome, "nothing to print");
    } else {
        debug!(rendered = outcome.rendered(), "printing markers");
    }

    let presenter = controller.presenter();
    let presenter = presenter.lock().await;
    let markers = presenter.markers();

    let out = match format {
        OutputFormat::Text => format_text(markers),
        OutputFormat::Geojson if markers.is_empty() => String::new(),
        OutputFormat::Geojson => serde_json::to_string_pretty(&to_geojson(markers)?)? + "\n",
    };
    let mut stdout = io::stdout();
    stdout.write_all(out.as_bytes())?;
    stdout.flush()?;
    Ok(true)
}

pub fn format_text(markers: &[MapMarker]) -> String {
    let mut s = String::new();
    for (i, m) in markers.iter().enumerate() {
        let _ = writeln!(
            s,
            "[{}] {:.7}, {:.7}  {}  ({})",
            i + 1,
            m.position.lat,
            m.position.lng,
            m.title,
            m.icon.url
        );
        for line in m.popup.lines() {
            let _ = writeln!(s, "    {line}");
        }
    }
    s
}

/// GeoJSON FeatureCollection; coordinates are `[lng, lat]`.
pub fn to_geojson(markers: &[MapMarker]) -> Result<Value> {
    let mut features = Vec::with_capacity(markers.len());
    for m in markers {
        features.push(json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [m.position.lng, m.position.lat],
            },
            "properties": {
                "id": m.symbol_id,
                "title": m.title,
                "icon": m.icon.url,
                "icon_size": [m.icon.size.0, m.icon.size.1],
                "popup_html": m.popup.to_html()?,
            },
        }));
    }
    Ok(json!({ "type": "FeatureCollection", "features": features }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::PRESET_POSITIONS;
    use crate::symbols::Symbol;

    fn markers() -> Vec<MapMarker> {
        let a = Symbol {
            id: 1,
            name: "Fire".into(),
            icon_url: "http://example.test/1.png".into(),
            description: "flames".into(),
            contributor_name: "Ada".into(),
            contributor_organization: "City".into(),
            ..Default::default()
        };
        let b = Symbol {
            id: 2,
            name: "Water".into(),
            contributor_name: "Bob".into(),
            ..Default::default()
        };
        vec![
            MapMarker::from_symbol(PRESET_POSITIONS[0], &a),
            MapMarker::from_symbol(PRESET_POSITIONS[1], &b),
        ]
    }

    #[test]
    fn text_lists_markers_with_popups() {
        let out = format_text(&markers());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with("[1] 38.8945036, -77.0355398  Fire"));
        assert_eq!(lines[3], "    Contributed by: Ada (City)");
        assert_eq!(lines[7], "    Contributed by: Bob");
    }

    #[test]
    fn text_of_nothing_is_empty() {
        assert!(format_text(&[]).is_empty());
    }

    #[test]
    fn geojson_uses_lng_lat_order() {
        let v = to_geojson(&markers()).unwrap();
        assert_eq!(v["type"], "FeatureCollection");
        let features = v["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);
        let coords = &features[0]["geometry"]["coordinates"];
        assert_eq!(coords[0].as_f64().unwrap(), PRESET_POSITIONS[0].lng);
        assert_eq!(coords[1].as_f64().unwrap(), PRESET_POSITIONS[0].lat);
        assert_eq!(features[0]["properties"]["icon_size"], json!([20, 20]));
        assert!(
            features[1]["properties"]["popup_html"]
                .as_str()
                .unwrap()
                .starts_with("<b>Water</b>")
        );
    }
}
