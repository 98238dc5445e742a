//! Country-highlighting globe: region table, camera control and the
//! boundary dataset. Rendering goes through [`GlobeRenderer`] so the
//! selection logic runs without a browser.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FOCUS_ALTITUDE: f64 = 2.0;
pub const FOCUS_DURATION_MS: u32 = 1_000;
pub const INITIAL_POV: PointOfView = PointOfView::new(60.0, 15.0, FOCUS_ALTITUDE);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Finland,
    Sweden,
    UnitedKingdom,
}

impl Region {
    #[cfg(test)]
    pub const ALL: [Region; 3] = [Self::Finland, Self::Sweden, Self::UnitedKingdom];

    /// Maps the dataset's `ADMIN` name. Anything else is not selectable.
    pub fn from_admin_name(name: &str) -> Option<Self> {
        match name {
            "Finland" => Some(Self::Finland),
            "Sweden" => Some(Self::Sweden),
            "United Kingdom" => Some(Self::UnitedKingdom),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Finland => "Finland",
            Self::Sweden => "Sweden",
            Self::UnitedKingdom => "UK",
        }
    }

    /// `(lat, lng)`
    pub fn coordinates(self) -> (f64, f64) {
        match self {
            Self::Finland => (64.9631, 26.2695),
            Self::Sweden => (62.1944, 14.9448),
            Self::UnitedKingdom => (54.7023545, -3.2765753),
        }
    }

    pub fn point_of_view(self) -> PointOfView {
        let (lat, lng) = self.coordinates();
        PointOfView::new(lat, lng, FOCUS_ALTITUDE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointOfView {
    pub lat: f64,
    pub lng: f64,
    pub altitude: f64,
}

impl PointOfView {
    pub const fn new(lat: f64, lng: f64, altitude: f64) -> Self {
        Self { lat, lng, altitude }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HexPolygonStyle {
    pub color: &'static str,
    pub resolution: u8,
    pub margin: f64,
    pub altitude: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlobeAppearance {
    pub image_url: &'static str,
    pub background_color: &'static str,
    pub atmosphere_color: &'static str,
    pub atmosphere_altitude: f64,
    pub hex_polygons: Option<HexPolygonStyle>,
}

impl GlobeAppearance {
    pub fn dark() -> Self {
        Self {
            image_url: "https://unpkg.com/three-globe/example/img/earth-dark.jpg",
            background_color: "rgba(0,0,0,0)",
            atmosphere_color: "#dac5a7",
            atmosphere_altitude: 0.15,
            hex_polygons: None,
        }
    }

    pub fn blue_marble() -> Self {
        Self {
            image_url: "https://unpkg.com/three-globe/example/img/earth-blue-marble.jpg",
            background_color: "rgba(0,0,0,0)",
            atmosphere_color: "#ADD8E6",
            atmosphere_altitude: 0.15,
            hex_polygons: Some(HexPolygonStyle {
                color: "#B6E5FF",
                resolution: 3,
                margin: 0.15,
                altitude: 0.01,
            }),
        }
    }
}

#[derive(Debug, Error)]
pub enum GlobeError {
    #[error("boundary dataset request failed: {0}")]
    Fetch(String),
    #[error("boundary dataset is not valid GeoJSON: {0}")]
    Decode(String),
    #[error("globe renderer has no `{0}` method")]
    MissingMethod(&'static str),
    #[error("globe renderer call failed: {0}")]
    Js(String),
}

/// Whatever draws the globe. The browser build wraps globe.gl.
pub trait GlobeRenderer {
    fn render(&mut self, width: f64, height: f64, appearance: &GlobeAppearance)
        -> Result<(), GlobeError>;

    /// Turns the camera to `pov` over `duration_ms`.
    fn focus(&mut self, pov: PointOfView, duration_ms: u32) -> Result<(), GlobeError>;

    /// Pins the camera at `altitude` globe radii and disables zoom and pan.
    fn lock_camera_distance(&mut self, altitude: f64) -> Result<(), GlobeError>;
}

/// Owns one renderer handle and the camera state it was last told about.
pub struct GlobeController<R> {
    renderer: R,
    pov: PointOfView,
    selected: Option<Region>,
}

impl<R: GlobeRenderer> GlobeController<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            pov: INITIAL_POV,
            selected: None,
        }
    }

    pub fn on_ready(&mut self) {
        if let Err(error) = self.renderer.focus(INITIAL_POV, 0) {
            log::warn!("globe initial view failed: {error}");
        }
        if let Err(error) = self.renderer.lock_camera_distance(INITIAL_POV.altitude) {
            log::warn!("globe camera lock failed: {error}");
        }
        self.pov = INITIAL_POV;
    }

    /// Handles a click on a country. Unknown names are ignored.
    pub fn select_admin_name(&mut self, name: &str) -> Option<Region> {
        let Some(region) = Region::from_admin_name(name) else {
            log::debug!("globe click on unmapped country {name:?}");
            return None;
        };

        self.focus_region(region);
        Some(region)
    }

    /// Turns the camera to `region`. Already showing it is a no-op.
    pub fn focus_region(&mut self, region: Region) {
        let pov = region.point_of_view();
        if self.selected == Some(region) && self.pov == pov {
            return;
        }

        match self.renderer.focus(pov, FOCUS_DURATION_MS) {
            Ok(()) => {
                self.pov = pov;
                self.selected = Some(region);
            }
            Err(error) => log::warn!("globe focus on {} failed: {error}", region.label()),
        }
    }

    #[cfg(test)]
    pub fn point_of_view(&self) -> PointOfView {
        self.pov
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<Region> {
        self.selected
    }

    #[cfg(test)]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<CountryFeature>,
}

impl FeatureCollection {
    pub fn parse(raw: &str) -> Result<Self, GlobeError> {
        serde_json::from_str(raw).map_err(|error| GlobeError::Decode(error.to_string()))
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CountryFeature {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub geometry: serde_json::Value,
    #[serde(default)]
    pub properties: CountryProperties,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct CountryProperties {
    #[serde(rename = "ADMIN", default)]
    pub admin: String,
    #[serde(rename = "ISO_A2", default)]
    pub iso_a2: Option<String>,
    #[serde(rename = "POP_EST", default)]
    pub pop_est: Option<f64>,
}

#[derive(Clone, Debug, Default)]
pub enum DatasetState {
    #[default]
    Loading,
    Ready(Vec<CountryFeature>),
    Failed,
}

impl DatasetState {
    pub fn features(&self) -> Option<&[CountryFeature]> {
        match self {
            Self::Ready(features) => Some(features),
            Self::Loading | Self::Failed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Call {
        Render(f64, f64),
        Focus(PointOfView, u32),
        Lock(f64),
    }

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Vec<Call>,
        fail_focus: bool,
    }

    impl GlobeRenderer for RecordingRenderer {
        fn render(
            &mut self,
            width: f64,
            height: f64,
            _appearance: &GlobeAppearance,
        ) -> Result<(), GlobeError> {
            self.calls.push(Call::Render(width, height));
            Ok(())
        }

        fn focus(&mut self, pov: PointOfView, duration_ms: u32) -> Result<(), GlobeError> {
            if self.fail_focus {
                return Err(GlobeError::MissingMethod("pointOfView"));
            }
            self.calls.push(Call::Focus(pov, duration_ms));
            Ok(())
        }

        fn lock_camera_distance(&mut self, altitude: f64) -> Result<(), GlobeError> {
            self.calls.push(Call::Lock(altitude));
            Ok(())
        }
    }

    #[test]
    fn selecting_finland_focuses_without_changing_altitude() {
        let mut controller = GlobeController::new(RecordingRenderer::default());
        controller.on_ready();
        let altitude_before = controller.point_of_view().altitude;

        assert_eq!(controller.select_admin_name("Finland"), Some(Region::Finland));

        let last = controller.renderer_mut().calls.last();
        assert_eq!(
            last,
            Some(&Call::Focus(PointOfView::new(64.9631, 26.2695, 2.0), 1_000))
        );
        assert_eq!(controller.point_of_view().altitude, altitude_before);
        assert_eq!(controller.selected(), Some(Region::Finland));
    }

    #[test]
    fn focusing_the_shown_region_again_does_nothing() {
        let mut controller = GlobeController::new(RecordingRenderer::default());
        controller.focus_region(Region::Sweden);
        controller.focus_region(Region::Sweden);

        assert_eq!(controller.renderer_mut().calls.len(), 1);

        controller.focus_region(Region::UnitedKingdom);
        assert_eq!(controller.renderer_mut().calls.len(), 2);
        assert_eq!(controller.selected(), Some(Region::UnitedKingdom));
    }

    #[test]
    fn ready_sets_initial_view_and_locks_distance() {
        let mut controller = GlobeController::new(RecordingRenderer::default());
        controller.on_ready();

        assert_eq!(
            controller.renderer_mut().calls,
            vec![Call::Focus(INITIAL_POV, 0), Call::Lock(2.0)]
        );
    }

    #[test]
    fn unmapped_countries_are_ignored() {
        let mut controller = GlobeController::new(RecordingRenderer::default());

        assert_eq!(controller.select_admin_name("Norway"), None);
        assert_eq!(controller.select_admin_name("UK"), None);
        assert!(controller.renderer_mut().calls.is_empty());
        assert_eq!(controller.point_of_view(), INITIAL_POV);
    }

    #[test]
    fn failed_focus_keeps_previous_view() {
        let mut controller = GlobeController::new(RecordingRenderer {
            fail_focus: true,
            ..RecordingRenderer::default()
        });

        controller.select_admin_name("Sweden");
        assert_eq!(controller.point_of_view(), INITIAL_POV);
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn every_region_round_trips_its_admin_name() {
        for (name, region) in [
            ("Finland", Region::Finland),
            ("Sweden", Region::Sweden),
            ("United Kingdom", Region::UnitedKingdom),
        ] {
            assert_eq!(Region::from_admin_name(name), Some(region));
        }
        assert!(Region::ALL
            .iter()
            .all(|region| region.point_of_view().altitude == FOCUS_ALTITUDE));
    }

    #[test]
    fn dataset_parses_feature_properties() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,0]]]},
                    "properties": {"ADMIN": "Finland", "ISO_A2": "FI", "POP_EST": 5491218}
                },
                {
                    "type": "Feature",
                    "geometry": null,
                    "properties": {"ADMIN": "Somewhere"}
                }
            ]
        }"#;

        let dataset = FeatureCollection::parse(raw).expect("valid GeoJSON");
        assert_eq!(dataset.features.len(), 2);
        assert_eq!(dataset.features[0].properties.admin, "Finland");
        assert_eq!(dataset.features[0].properties.iso_a2.as_deref(), Some("FI"));
        assert_eq!(dataset.features[1].properties.pop_est, None);
    }

    #[test]
    fn garbage_dataset_is_a_decode_error() {
        assert!(matches!(
            FeatureCollection::parse("<html>rate limited</html>"),
            Err(GlobeError::Decode(_))
        ));
    }

    #[test]
    fn only_ready_dataset_exposes_features() {
        assert!(DatasetState::Loading.features().is_none());
        assert!(DatasetState::Failed.features().is_none());
        assert_eq!(DatasetState::Ready(Vec::new()).features().map(<[_]>::len), Some(0));
    }

    #[test]
    fn only_blue_marble_draws_hexed_regions() {
        assert_eq!(GlobeAppearance::dark().hex_polygons, None);

        let hex = GlobeAppearance::blue_marble()
            .hex_polygons
            .expect("blue marble hexes countries");
        assert_eq!(hex.color, "#B6E5FF");
        assert_eq!(hex.resolution, 3);
    }
}
