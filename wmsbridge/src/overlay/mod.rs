//! Overlay controller: binds one WMS layer onto a host map surface.
//!
//! [`MapOverlayController`] is the component callers construct. It resolves
//! the surface through a [`crate::locator::HostWidgetLocator`], defers layer
//! installation until the surface's ready signal, wires click/hover
//! interaction, and exposes the small public control surface
//! (`toggle_layer`, `set_opacity`, `dispose`).

mod content;
mod controller;

pub use content::format_properties;
pub use controller::{MapOverlayController, OverlayError};
