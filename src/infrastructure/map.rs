use crate::constants::{MAP_CENTER_LATITUDE, MAP_CENTER_LONGITUDE, MAP_DEFAULT_ZOOM};
use crate::entities::draft::GeoPosition;
use crate::settings::MapSettings;

/// Third-party basemap tiles, configured per view instead of through
/// process-wide constants. The provider only builds URLs; fetching and
/// drawing tiles is the host renderer's job.
#[derive(Debug, Clone)]
pub struct TileProvider {
    settings: MapSettings,
}

impl TileProvider {
    pub fn new(settings: MapSettings) -> Self {
        TileProvider { settings }
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Templated tile URL with `{z}`, `{x}` and `{y}` placeholders, for
    /// hosts whose map widget does its own substitution.
    pub fn url_template(&self) -> String {
        format!(
            "https://api.mapbox.com/styles/v1/mapbox/{}/tiles/256/{{z}}/{{x}}/{{y}}@2x?access_token={}",
            self.settings.tile_style_id, self.settings.access_token
        )
    }

    /// Concrete URL for one tile.
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        format!(
            "https://api.mapbox.com/styles/v1/mapbox/{}/tiles/256/{z}/{x}/{y}@2x?access_token={}",
            self.settings.tile_style_id, self.settings.access_token
        )
    }

    pub fn initial_center(&self) -> GeoPosition {
        GeoPosition::new(MAP_CENTER_LATITUDE, MAP_CENTER_LONGITUDE)
    }

    pub fn initial_zoom(&self) -> u8 {
        MAP_DEFAULT_ZOOM
    }
}
