//! Host widget resolution.
//!
//! The host application owns its map widgets and addresses them by region
//! id. [`HostWidgetLocator`] resolves such an id to the shared
//! [`MapSurface`] handle; [`RegionRegistry`] is the in-process
//! implementation used by tests and embedding code that manages its own
//! widget table.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::surface::MapSurface;

/// Errors that can occur while resolving a host region.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocatorError {
    /// No region with the given id is registered with the host.
    #[error("unknown region: {0}")]
    UnknownRegion(String),
}

/// Resolves a named host region to its map surface.
pub trait HostWidgetLocator {
    fn resolve(&self, region_id: &str) -> Result<Arc<dyn MapSurface>, LocatorError>;
}

/// In-process locator backed by a registration table.
#[derive(Default)]
pub struct RegionRegistry {
    regions: HashMap<String, Arc<dyn MapSurface>>,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a surface under a region id, replacing any previous entry.
    pub fn register(&mut self, region_id: impl Into<String>, surface: Arc<dyn MapSurface>) {
        self.regions.insert(region_id.into(), surface);
    }
}

impl HostWidgetLocator for RegionRegistry {
    fn resolve(&self, region_id: &str) -> Result<Arc<dyn MapSurface>, LocatorError> {
        self.regions
            .get(region_id)
            .cloned()
            .ok_or_else(|| LocatorError::UnknownRegion(region_id.to_string()))
    }
}
