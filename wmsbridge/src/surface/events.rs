//! Event types shared between surfaces and listeners.

/// Geographic coordinate (longitude, latitude).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

/// Screen-space pixel position, sub-pixel precision as reported by the
/// engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Pointer events a surface can dispatch for a specific layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerEvent {
    Click,
    MouseEnter,
    MouseLeave,
}

/// Payload delivered to layer event listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Pixel position of the pointer within the canvas.
    pub point: ScreenPoint,
    /// Geographic coordinate under the pointer.
    pub lng_lat: LngLat,
}

/// Handle for a registered listener, used to detach it later.
///
/// The raw value is allocated by the surface that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Listener for the surface's one-time ready signal.
pub type ReadyListener = Box<dyn Fn() + Send + Sync>;

/// Listener for layer-scoped pointer events.
pub type LayerListener = Box<dyn Fn(&PointerEvent) + Send + Sync>;

/// Pointer cursor styles a surface can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}
