//! WMS request model: layer identity, viewport queries, and request URLs.
//!
//! Everything here is deterministic string/value construction; no I/O. The
//! URL builders produce the exact query strings the WMS endpoint expects,
//! parameter order included, so they are also the contract tests' reference
//! point.

mod descriptor;
mod request;

pub use descriptor::LayerDescriptor;
pub use request::{
    feature_info_url, tile_url_template, BoundingBox, ViewportQuery, DEFAULT_RASTER_OPACITY,
    INFO_FORMAT, TILE_BBOX_TOKEN, TILE_FORMAT, TILE_SIZE, WEB_MERCATOR_SRS, WMS_VERSION,
};
