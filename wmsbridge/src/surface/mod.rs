//! Map surface abstraction.
//!
//! The rendering engine is owned by the host application; this crate only
//! holds a shared handle to it. [`MapSurface`] models the slice of the
//! engine's API the overlay needs: event registration, raster layer
//! installation, layout/paint property access, viewport state, cursor
//! control, and popup display.
//!
//! [`HeadlessSurface`] is a complete in-memory implementation used by the
//! test suite and by headless tooling.

mod events;
mod headless;
mod popup;

use serde_json::Value;

pub use events::{
    Cursor, LayerEvent, LayerListener, ListenerId, LngLat, PointerEvent, ReadyListener,
    ScreenPoint,
};
pub use headless::HeadlessSurface;
pub use popup::Popup;

/// Layout property key for layer visibility.
pub const LAYOUT_VISIBILITY: &str = "visibility";

/// Paint property key for raster opacity.
pub const PAINT_RASTER_OPACITY: &str = "raster-opacity";

/// Visibility value for a shown layer.
pub const VISIBILITY_VISIBLE: &str = "visible";

/// Visibility value for a hidden layer.
pub const VISIBILITY_NONE: &str = "none";

/// Raster layer definition handed to [`MapSurface::add_raster_layer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RasterLayer {
    /// Stable layer id, the key for all later property and event calls.
    pub id: String,
    /// Tile URL templates the surface fetches per visible tile.
    pub tile_urls: Vec<String>,
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// Initial raster opacity.
    pub opacity: f64,
}

/// Shared handle onto the host's map rendering engine.
///
/// Implementations dispatch events on the host's single UI thread; listeners
/// must not assume any other ordering. Property reads and writes against
/// unknown layer ids follow the engine's own guard behavior (the headless
/// surface silently no-ops).
pub trait MapSurface: Send + Sync {
    /// Registers a listener for the one-time ready signal.
    ///
    /// If the surface has already loaded, the listener runs immediately.
    fn on_ready(&self, listener: ReadyListener) -> ListenerId;

    /// Registers a pointer listener scoped to one layer id.
    fn on_layer_event(
        &self,
        event: LayerEvent,
        layer_id: &str,
        listener: LayerListener,
    ) -> ListenerId;

    /// Detaches a previously registered listener. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);

    /// Installs a raster layer.
    fn add_raster_layer(&self, layer: RasterLayer);

    /// Reads a layout property, `None` if the layer or property is unknown.
    fn layout_property(&self, layer_id: &str, name: &str) -> Option<Value>;

    /// Writes a layout property.
    fn set_layout_property(&self, layer_id: &str, name: &str, value: Value);

    /// Reads a paint property, `None` if the layer or property is unknown.
    fn paint_property(&self, layer_id: &str, name: &str) -> Option<Value>;

    /// Writes a paint property.
    fn set_paint_property(&self, layer_id: &str, name: &str, value: Value);

    /// Current viewport bounding box in EPSG:3857.
    fn bounds(&self) -> crate::wms::BoundingBox;

    /// Canvas dimensions in pixels as `(width, height)`.
    fn canvas_size(&self) -> (u32, u32);

    /// Sets the pointer cursor shown over the map.
    fn set_cursor(&self, cursor: Cursor);

    /// Renders a popup at a geographic coordinate.
    ///
    /// Reached through [`Popup::attach`] rather than called directly.
    fn show_popup(&self, location: LngLat, content: String);
}
