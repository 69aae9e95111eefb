//! WMS request URL construction.
//!
//! Two request kinds are built here:
//!
//! - GetMap: a templated tile URL handed to the map surface, which
//!   substitutes the bounding-box token per visible tile.
//! - GetFeatureInfo: a fully resolved URL built per click from the current
//!   viewport.

use std::fmt;

use crate::wms::LayerDescriptor;

/// WMS protocol version spoken by the endpoint.
pub const WMS_VERSION: &str = "1.1.0";

/// Fixed tile edge length in pixels for GetMap requests.
pub const TILE_SIZE: u32 = 256;

/// Spatial reference for all requests.
pub const WEB_MERCATOR_SRS: &str = "EPSG:3857";

/// Placeholder the surface substitutes with each tile's bounding box.
pub const TILE_BBOX_TOKEN: &str = "{bbox-epsg-3857}";

/// Image format for GetMap tiles.
pub const TILE_FORMAT: &str = "image/png";

/// Response format requested from GetFeatureInfo.
pub const INFO_FORMAT: &str = "application/json";

/// Raster opacity applied when the overlay layer is first installed.
pub const DEFAULT_RASTER_OPACITY: f64 = 0.8;

/// Axis-aligned bounding box in EPSG:3857 coordinates.
///
/// Serializes to the comma-joined `minx,miny,maxx,maxy` form WMS expects.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

/// Snapshot of the viewport at click time, feeding one GetFeatureInfo
/// request.
///
/// Built fresh per click and never persisted. Pixel coordinates are the
/// click position rounded to the nearest integer; width/height are the
/// canvas dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportQuery {
    pub bbox: BoundingBox,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Builds the GetMap tile URL template for a layer.
///
/// The bounding-box placeholder is left in the string for the surface to
/// substitute per tile.
pub fn tile_url_template(service_url: &str, descriptor: &LayerDescriptor) -> String {
    format!(
        "{}/wms?service=WMS&version={}&request=GetMap&layers={}&bbox={}&width={}&height={}&srs={}&format={}&transparent=true",
        service_url,
        WMS_VERSION,
        descriptor.qualified_name(),
        TILE_BBOX_TOKEN,
        TILE_SIZE,
        TILE_SIZE,
        WEB_MERCATOR_SRS,
        TILE_FORMAT,
    )
}

/// Builds a GetFeatureInfo URL for a click at `query` within the viewport.
pub fn feature_info_url(
    service_url: &str,
    descriptor: &LayerDescriptor,
    query: &ViewportQuery,
) -> String {
    let layers = descriptor.qualified_name();
    format!(
        "{}/wms?service=WMS&version={}&request=GetFeatureInfo&layers={}&query_layers={}&info_format={}&bbox={}&x={}&y={}&width={}&height={}&srs={}",
        service_url,
        WMS_VERSION,
        layers,
        layers,
        INFO_FORMAT,
        query.bbox,
        query.x,
        query.y,
        query.width,
        query.height,
        WEB_MERCATOR_SRS,
    )
}
