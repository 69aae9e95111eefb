//! Popup rendering primitive.

use crate::surface::{LngLat, MapSurface};

/// A popup under construction: location, content, then attach.
///
/// # Example
///
/// ```ignore
/// Popup::new()
///     .set_location(LngLat { lng: 7.44, lat: 46.95 })
///     .set_content("name: Lot 12")
///     .attach(surface.as_ref());
/// ```
#[derive(Debug, Default)]
pub struct Popup {
    location: Option<LngLat>,
    content: String,
}

impl Popup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the geographic anchor.
    pub fn set_location(mut self, location: LngLat) -> Self {
        self.location = Some(location);
        self
    }

    /// Sets the text content.
    pub fn set_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Renders the popup on the surface.
    ///
    /// A popup without a location has nothing to anchor to and is dropped.
    pub fn attach(self, surface: &dyn MapSurface) {
        if let Some(location) = self.location {
            surface.show_popup(location, self.content);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::HeadlessSurface;

    #[test]
    fn test_attach_renders_on_surface() {
        let surface = HeadlessSurface::new();
        Popup::new()
            .set_location(LngLat { lng: 1.0, lat: 2.0 })
            .set_content("name: Lot 12")
            .attach(&surface);

        let popups = surface.popups();
        assert_eq!(popups.len(), 1);
        assert_eq!(popups[0].1, "name: Lot 12");
    }

    #[test]
    fn test_attach_without_location_is_dropped() {
        let surface = HeadlessSurface::new();
        Popup::new().set_content("orphan").attach(&surface);
        assert!(surface.popups().is_empty());
    }
}
