//! WMSBridge - WMS overlay wiring for host map widgets
//!
//! This library binds a host application's map widget to an external WMS
//! endpoint: it installs one raster overlay layer backed by templated GetMap
//! tile requests, wires click-to-query GetFeatureInfo popups, and shows a
//! pointer cursor while hovering the layer.
//!
//! The host widget system and the map rendering engine are opaque
//! collaborators, modeled as the [`locator::HostWidgetLocator`] and
//! [`surface::MapSurface`] traits. A complete in-memory surface,
//! [`surface::HeadlessSurface`], ships with the crate for tests and tooling.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wmsbridge::featureinfo::ReqwestClient;
//! use wmsbridge::locator::RegionRegistry;
//! use wmsbridge::MapOverlayController;
//!
//! let mut registry = RegionRegistry::new();
//! registry.register("site-map", map_surface);
//!
//! let controller = MapOverlayController::init(
//!     &registry,
//!     "site-map",
//!     "https://geo.example.com/geoserver",
//!     "planning",
//!     "parcels",
//!     ReqwestClient::new()?,
//! )?;
//!
//! // The overlay installs itself once the surface signals ready.
//! controller.set_opacity(0.5);
//! controller.toggle_layer(controller.layer_id());
//! ```

pub mod featureinfo;
pub mod locator;
pub mod overlay;
pub mod surface;
pub mod wms;

pub use overlay::MapOverlayController;
