//! In-memory map surface for tests and headless tooling.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::surface::{
    Cursor, LayerEvent, LayerListener, ListenerId, LngLat, MapSurface, PointerEvent, RasterLayer,
    ReadyListener, LAYOUT_VISIBILITY, PAINT_RASTER_OPACITY, VISIBILITY_VISIBLE,
};
use crate::wms::BoundingBox;

type SharedReadyListener = Arc<dyn Fn() + Send + Sync>;
type SharedLayerListener = Arc<dyn Fn(&PointerEvent) + Send + Sync>;

struct ReadyEntry {
    id: ListenerId,
    listener: SharedReadyListener,
}

struct LayerEntry {
    id: ListenerId,
    event: LayerEvent,
    layer_id: String,
    listener: SharedLayerListener,
}

struct LayerState {
    layer: RasterLayer,
    layout: HashMap<String, Value>,
    paint: HashMap<String, Value>,
}

#[derive(Default)]
struct SurfaceState {
    loaded: bool,
    next_listener: u64,
    ready_listeners: Vec<ReadyEntry>,
    layer_listeners: Vec<LayerEntry>,
    layers: HashMap<String, LayerState>,
    bounds: BoundingBox,
    canvas: (u32, u32),
    cursor: Cursor,
    popups: Vec<(LngLat, String)>,
}

impl SurfaceState {
    fn next_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        id
    }
}

/// Complete in-memory [`MapSurface`] implementation.
///
/// Layers start visible, matching the engine default for unset visibility.
/// Listener callbacks run synchronously on the calling thread, outside the
/// surface's internal lock, so they may call back into the surface.
///
/// Driver methods (`fire_ready`, `emit_layer_event`, `set_viewport`) stand in
/// for the real engine's event sources; inspection accessors expose rendered
/// popups, the cursor, and installed layers.
pub struct HeadlessSurface {
    state: Mutex<SurfaceState>,
}

impl HeadlessSurface {
    /// Creates a surface with a zero-sized viewport.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SurfaceState::default()),
        }
    }

    /// Creates a surface with the given viewport bounds and canvas size.
    pub fn with_viewport(bounds: BoundingBox, width: u32, height: u32) -> Self {
        let surface = Self::new();
        surface.set_viewport(bounds, width, height);
        surface
    }

    /// Updates the viewport bounds and canvas size.
    pub fn set_viewport(&self, bounds: BoundingBox, width: u32, height: u32) {
        let mut state = self.state.lock();
        state.bounds = bounds;
        state.canvas = (width, height);
    }

    /// Marks the surface loaded and runs ready listeners in registration
    /// order. Firing twice is a no-op.
    pub fn fire_ready(&self) {
        let listeners: Vec<SharedReadyListener> = {
            let mut state = self.state.lock();
            if state.loaded {
                return;
            }
            state.loaded = true;
            state
                .ready_listeners
                .iter()
                .map(|entry| entry.listener.clone())
                .collect()
        };
        for listener in listeners {
            listener();
        }
    }

    /// Dispatches a pointer event to listeners scoped to `layer_id`.
    ///
    /// Events for layer ids nobody listens on go nowhere, mirroring the
    /// engine's scoped dispatch.
    pub fn emit_layer_event(&self, layer_id: &str, event: LayerEvent, payload: PointerEvent) {
        let listeners: Vec<SharedLayerListener> = {
            let state = self.state.lock();
            state
                .layer_listeners
                .iter()
                .filter(|entry| entry.event == event && entry.layer_id == layer_id)
                .map(|entry| entry.listener.clone())
                .collect()
        };
        for listener in listeners {
            listener(&payload);
        }
    }

    /// Whether the ready signal has fired.
    pub fn loaded(&self) -> bool {
        self.state.lock().loaded
    }

    /// Rendered popups, in render order.
    pub fn popups(&self) -> Vec<(LngLat, String)> {
        self.state.lock().popups.clone()
    }

    /// Current pointer cursor.
    pub fn cursor(&self) -> Cursor {
        self.state.lock().cursor
    }

    /// Installed layer ids, sorted.
    pub fn layer_ids(&self) -> Vec<String> {
        let state = self.state.lock();
        let mut ids: Vec<String> = state.layers.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// The raster layer definition installed under `layer_id`, if any.
    pub fn layer(&self, layer_id: &str) -> Option<RasterLayer> {
        self.state
            .lock()
            .layers
            .get(layer_id)
            .map(|state| state.layer.clone())
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MapSurface for HeadlessSurface {
    fn on_ready(&self, listener: ReadyListener) -> ListenerId {
        let listener: SharedReadyListener = Arc::from(listener);
        let (id, already_loaded) = {
            let mut state = self.state.lock();
            let id = state.next_id();
            let already_loaded = state.loaded;
            state.ready_listeners.push(ReadyEntry {
                id,
                listener: listener.clone(),
            });
            (id, already_loaded)
        };
        // Late registration on a loaded surface runs immediately.
        if already_loaded {
            listener();
        }
        id
    }

    fn on_layer_event(
        &self,
        event: LayerEvent,
        layer_id: &str,
        listener: LayerListener,
    ) -> ListenerId {
        let mut state = self.state.lock();
        let id = state.next_id();
        state.layer_listeners.push(LayerEntry {
            id,
            event,
            layer_id: layer_id.to_string(),
            listener: Arc::from(listener),
        });
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        let mut state = self.state.lock();
        state.ready_listeners.retain(|entry| entry.id != id);
        state.layer_listeners.retain(|entry| entry.id != id);
    }

    fn add_raster_layer(&self, layer: RasterLayer) {
        let mut state = self.state.lock();
        let mut layout = HashMap::new();
        layout.insert(
            LAYOUT_VISIBILITY.to_string(),
            Value::String(VISIBILITY_VISIBLE.to_string()),
        );
        let mut paint = HashMap::new();
        paint.insert(PAINT_RASTER_OPACITY.to_string(), json!(layer.opacity));
        state.layers.insert(
            layer.id.clone(),
            LayerState {
                layer,
                layout,
                paint,
            },
        );
    }

    fn layout_property(&self, layer_id: &str, name: &str) -> Option<Value> {
        self.state
            .lock()
            .layers
            .get(layer_id)
            .and_then(|layer| layer.layout.get(name).cloned())
    }

    fn set_layout_property(&self, layer_id: &str, name: &str, value: Value) {
        let mut state = self.state.lock();
        if let Some(layer) = state.layers.get_mut(layer_id) {
            layer.layout.insert(name.to_string(), value);
        }
    }

    fn paint_property(&self, layer_id: &str, name: &str) -> Option<Value> {
        self.state
            .lock()
            .layers
            .get(layer_id)
            .and_then(|layer| layer.paint.get(name).cloned())
    }

    fn set_paint_property(&self, layer_id: &str, name: &str, value: Value) {
        let mut state = self.state.lock();
        if let Some(layer) = state.layers.get_mut(layer_id) {
            layer.paint.insert(name.to_string(), value);
        }
    }

    fn bounds(&self) -> BoundingBox {
        self.state.lock().bounds
    }

    fn canvas_size(&self) -> (u32, u32) {
        self.state.lock().canvas
    }

    fn set_cursor(&self, cursor: Cursor) {
        self.state.lock().cursor = cursor;
    }

    fn show_popup(&self, location: LngLat, content: String) {
        self.state.lock().popups.push((location, content));
    }
}
