use anyhow::{Context as _, Result, anyhow};
use rust_embed::RustEmbed;
use serde::Serialize;
use tera::{Context, Tera};

use crate::map::geo::LatLng;
use crate::symbols::Symbol;

/// Rendered icon edge, in pixels.
pub const ICON_SIZE: (u32, u32) = (20, 20);

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerIcon {
    pub url: String,
    pub size: (u32, u32),
}

/// Symbol metadata shown when a marker is activated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub name: String,
    pub description: String,
    pub contributor_name: String,
    pub contributor_organization: String,
}

impl Popup {
    pub fn from_symbol(symbol: &Symbol) -> Self {
        Self {
            name: symbol.name.clone(),
            description: symbol.description.clone(),
            contributor_name: symbol.contributor_name.clone(),
            contributor_organization: symbol.contributor_organization.clone(),
        }
    }

    pub fn contributor_line(&self) -> String {
        if self.contributor_organization.is_empty() {
            format!("Contributed by: {}", self.contributor_name)
        } else {
            format!(
                "Contributed by: {} ({})",
                self.contributor_name, self.contributor_organization
            )
        }
    }

    /// Plain-text lines: bold name, description, contributor.
    pub fn lines(&self) -> [String; 3] {
        [
            self.name.clone(),
            format!("Description – {}", self.description),
            self.contributor_line(),
        ]
    }

    /// HTML fragment for map widgets that render markup.
    pub fn to_html(&self) -> Result<String> {
        let asset = Assets::get("popup.html").ok_or_else(|| anyhow!("popup template missing"))?;
        let template = String::from_utf8(asset.data.to_vec()).context("popup template utf-8")?;

        let mut context = Context::new();
        context.insert("name", &self.name);
        context.insert("description", &self.description);
        context.insert("contributor_name", &self.contributor_name);
        context.insert("contributor_organization", &self.contributor_organization);

        let html = Tera::one_off(&template, &context, true).context("render popup template")?;
        Ok(html.trim_end().to_string())
    }
}

/// One marker as handed to a [`MapWidget`](crate::map::MapWidget).
/// Never mutated after creation; a new search replaces the whole set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub symbol_id: i64,
    pub position: LatLng,
    pub icon: MarkerIcon,
    pub title: String,
    pub popup: Popup,
}

impl MapMarker {
    pub fn from_symbol(position: LatLng, symbol: &Symbol) -> Self {
        Self {
            symbol_id: symbol.id,
            position,
            icon: MarkerIcon {
                url: symbol.icon_url.clone(),
                size: ICON_SIZE,
            },
            title: symbol.name.clone(),
            popup: Popup::from_symbol(symbol),
        }
    }
}
