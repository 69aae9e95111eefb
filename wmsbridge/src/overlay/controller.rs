//! The overlay controller.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::featureinfo::{AsyncHttpClient, FeatureCollection, FeatureInfoError, FeatureInfoService};
use crate::locator::{HostWidgetLocator, LocatorError};
use crate::overlay::format_properties;
use crate::surface::{
    Cursor, LayerEvent, ListenerId, LngLat, MapSurface, PointerEvent, Popup, RasterLayer,
    LAYOUT_VISIBILITY, PAINT_RASTER_OPACITY, VISIBILITY_NONE, VISIBILITY_VISIBLE,
};
use crate::wms::{
    tile_url_template, LayerDescriptor, ViewportQuery, DEFAULT_RASTER_OPACITY, TILE_SIZE,
};

type SharedFailureHook = Arc<dyn Fn(&FeatureInfoError) + Send + Sync>;

/// Errors that can occur while constructing an overlay controller.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error(transparent)]
    Locator(#[from] LocatorError),
}

/// Binds one WMS raster overlay onto a host map surface.
///
/// The controller has two states: pre-ready (only the ready listener is
/// attached) and post-ready (layer installed, click/hover wired); the
/// transition happens once, on the surface's ready signal, and is
/// irreversible.
///
/// Feature queries spawn onto the ambient tokio runtime, so construction and
/// event dispatch must happen inside one. Queries from rapid successive
/// clicks overlap freely: no ordering, de-duplication, or cancellation.
pub struct MapOverlayController<C: AsyncHttpClient> {
    surface: Arc<dyn MapSurface>,
    descriptor: LayerDescriptor,
    service: Arc<FeatureInfoService<C>>,
    listeners: Mutex<Vec<ListenerId>>,
    inflight: Mutex<Vec<JoinHandle<()>>>,
    query_failure_hook: Mutex<SharedFailureHook>,
}

impl<C: AsyncHttpClient> MapOverlayController<C> {
    /// Resolves the region's surface and binds a WMS overlay onto it.
    ///
    /// Layer installation is deferred until the surface signals ready; the
    /// returned handle is usable immediately, but the layer does not exist
    /// until that signal fires. Calling [`toggle_layer`](Self::toggle_layer)
    /// or [`set_opacity`](Self::set_opacity) earlier is a caller error and
    /// behaves however the surface treats unknown layer ids.
    pub fn init<L>(
        locator: &L,
        region_id: &str,
        service_url: &str,
        workspace: &str,
        layer: &str,
        http_client: C,
    ) -> Result<Arc<Self>, OverlayError>
    where
        L: HostWidgetLocator + ?Sized,
    {
        let surface = locator.resolve(region_id)?;
        let descriptor = LayerDescriptor::new(workspace, layer);
        let service = Arc::new(FeatureInfoService::new(service_url, http_client));

        let default_hook: SharedFailureHook = Arc::new(|error: &FeatureInfoError| {
            warn!(error = %error, "feature query failed");
        });

        let controller = Arc::new(Self {
            surface: surface.clone(),
            descriptor,
            service,
            listeners: Mutex::new(Vec::new()),
            inflight: Mutex::new(Vec::new()),
            query_failure_hook: Mutex::new(default_hook),
        });

        let weak = Arc::downgrade(&controller);
        let ready_id = surface.on_ready(Box::new(move || {
            if let Some(controller) = weak.upgrade() {
                controller.install_layer();
            }
        }));
        controller.listeners.lock().push(ready_id);

        Ok(controller)
    }

    /// The derived id of the layer this controller installs.
    pub fn layer_id(&self) -> &str {
        self.descriptor.layer_id()
    }

    /// The layer's identity descriptor.
    pub fn descriptor(&self) -> &LayerDescriptor {
        &self.descriptor
    }

    /// Replaces the query-failure hook.
    ///
    /// The hook receives every transport or parse failure from feature
    /// queries. The default logs a warning.
    pub fn on_query_failure(&self, hook: impl Fn(&FeatureInfoError) + Send + Sync + 'static) {
        *self.query_failure_hook.lock() = Arc::new(hook);
    }

    /// Flips a layer's visibility between `visible` and `none`.
    ///
    /// Operates on whatever id the caller passes, which is not required to
    /// be the layer this controller installed.
    pub fn toggle_layer(&self, layer_id: &str) {
        let visibility = self.surface.layout_property(layer_id, LAYOUT_VISIBILITY);
        let next = match visibility {
            Some(Value::String(s)) if s == VISIBILITY_VISIBLE => VISIBILITY_NONE,
            _ => VISIBILITY_VISIBLE,
        };
        self.surface.set_layout_property(
            layer_id,
            LAYOUT_VISIBILITY,
            Value::String(next.to_string()),
        );
    }

    /// Sets the raster opacity of the layer this controller installed.
    ///
    /// The value is passed through unclamped; out-of-range values reach the
    /// surface unchanged.
    pub fn set_opacity(&self, opacity: f64) {
        self.surface.set_paint_property(
            self.descriptor.layer_id(),
            PAINT_RASTER_OPACITY,
            json!(opacity),
        );
    }

    /// Detaches every listener this controller registered.
    ///
    /// Safe to call more than once. In-flight feature queries are not
    /// cancelled; see [`quiesce`](Self::quiesce).
    pub fn dispose(&self) {
        for id in self.listeners.lock().drain(..) {
            self.surface.remove_listener(id);
        }
    }

    /// Waits for all in-flight feature queries to settle.
    pub async fn quiesce(&self) {
        let handles: Vec<JoinHandle<()>> = self.inflight.lock().drain(..).collect();
        for handle in handles {
            let _ = handle.await;
        }
    }

    /// Runs once, on the surface's ready signal.
    fn install_layer(self: Arc<Self>) {
        self.surface.add_raster_layer(RasterLayer {
            id: self.descriptor.layer_id().to_string(),
            tile_urls: vec![tile_url_template(
                self.service.service_url(),
                &self.descriptor,
            )],
            tile_size: TILE_SIZE,
            opacity: DEFAULT_RASTER_OPACITY,
        });
        debug!(layer_id = self.descriptor.layer_id(), "overlay layer installed");

        let mut ids = Vec::with_capacity(3);

        let weak = Arc::downgrade(&self);
        ids.push(self.surface.on_layer_event(
            LayerEvent::Click,
            self.descriptor.layer_id(),
            Box::new(move |event| {
                if let Some(controller) = weak.upgrade() {
                    controller.handle_click(event);
                }
            }),
        ));

        let weak = Arc::downgrade(&self.surface);
        ids.push(self.surface.on_layer_event(
            LayerEvent::MouseEnter,
            self.descriptor.layer_id(),
            Box::new(move |_| {
                if let Some(surface) = weak.upgrade() {
                    surface.set_cursor(Cursor::Pointer);
                }
            }),
        ));

        let weak = Arc::downgrade(&self.surface);
        ids.push(self.surface.on_layer_event(
            LayerEvent::MouseLeave,
            self.descriptor.layer_id(),
            Box::new(move |_| {
                if let Some(surface) = weak.upgrade() {
                    surface.set_cursor(Cursor::Default);
                }
            }),
        ));

        self.listeners.lock().extend(ids);
    }

    /// Builds a viewport query from the click and fires off one independent
    /// feature-info request.
    fn handle_click(self: Arc<Self>, event: &PointerEvent) {
        let (width, height) = self.surface.canvas_size();
        let query = ViewportQuery {
            bbox: self.surface.bounds(),
            x: event.point.x.round() as u32,
            y: event.point.y.round() as u32,
            width,
            height,
        };
        let location = event.lng_lat;

        let controller = Arc::clone(&self);
        let handle = tokio::spawn(async move {
            match controller
                .service
                .get_feature_info(&controller.descriptor, &query)
                .await
            {
                Ok(collection) => controller.render_popup(location, &collection),
                Err(error) => {
                    let hook = controller.query_failure_hook.lock().clone();
                    hook(&error);
                }
            }
        });

        // Settled queries release their handles here; only quiesce() needs
        // the still-running ones.
        let mut inflight = self.inflight.lock();
        inflight.retain(|entry| !entry.is_finished());
        inflight.push(handle);
    }

    fn render_popup(&self, location: LngLat, collection: &FeatureCollection) {
        let Some(feature) = collection.features.first() else {
            debug!("feature query returned no features");
            return;
        };
        Popup::new()
            .set_location(location)
            .set_content(format_properties(&feature.properties))
            .attach(self.surface.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::featureinfo::MockAsyncHttpClient;
    use crate::locator::RegionRegistry;
    use crate::surface::{HeadlessSurface, ScreenPoint};
    use crate::wms::BoundingBox;

    const SERVICE_URL: &str = "https://geo.example.com/geoserver";
    const LAYER_ID: &str = "planning-parcels-wms";

    fn setup(
        response: Result<Vec<u8>, FeatureInfoError>,
    ) -> (
        Arc<HeadlessSurface>,
        Arc<MapOverlayController<MockAsyncHttpClient>>,
    ) {
        let surface = Arc::new(HeadlessSurface::with_viewport(
            BoundingBox::new(-1.0, -1.0, 1.0, 1.0),
            800,
            600,
        ));
        let mut registry = RegionRegistry::new();
        registry.register("site-map", surface.clone());

        let controller = MapOverlayController::init(
            &registry,
            "site-map",
            SERVICE_URL,
            "planning",
            "parcels",
            MockAsyncHttpClient { response },
        )
        .unwrap();
        (surface, controller)
    }

    fn click_at(x: f64, y: f64) -> PointerEvent {
        PointerEvent {
            point: ScreenPoint { x, y },
            lng_lat: LngLat {
                lng: 0.5,
                lat: 0.25,
            },
        }
    }

    #[tokio::test]
    async fn test_init_unknown_region() {
        let registry = RegionRegistry::new();
        let result = MapOverlayController::init(
            &registry,
            "missing",
            SERVICE_URL,
            "planning",
            "parcels",
            MockAsyncHttpClient {
                response: Ok(Vec::new()),
            },
        );
        assert!(matches!(
            result.err(),
            Some(OverlayError::Locator(LocatorError::UnknownRegion(_)))
        ));
    }

    #[tokio::test]
    async fn test_layer_installed_on_ready() {
        let (surface, _controller) = setup(Ok(br#"{"features":[]}"#.to_vec()));
        assert!(surface.layer_ids().is_empty());

        surface.fire_ready();

        let layer = surface.layer(LAYER_ID).expect("layer installed");
        assert_eq!(layer.tile_size, 256);
        assert_eq!(layer.opacity, 0.8);
        assert_eq!(layer.tile_urls.len(), 1);
        assert!(layer.tile_urls[0].starts_with(SERVICE_URL));
        assert!(layer.tile_urls[0].contains("request=GetMap"));
        assert!(layer.tile_urls[0].contains("{bbox-epsg-3857}"));
    }

    #[tokio::test]
    async fn test_click_renders_popup_in_property_order() {
        let body = r#"{"features":[{"properties":{"name":"Lot 12","area":450}}]}"#;
        let (surface, controller) = setup(Ok(body.as_bytes().to_vec()));
        surface.fire_ready();

        surface.emit_layer_event(LAYER_ID, LayerEvent::Click, click_at(100.4, 200.6));
        controller.quiesce().await;

        let popups = surface.popups();
        assert_eq!(popups.len(), 1);
        assert_eq!(popups[0].0, LngLat { lng: 0.5, lat: 0.25 });
        assert_eq!(popups[0].1, "name: Lot 12\narea: 450");
    }

    #[tokio::test]
    async fn test_empty_feature_set_renders_nothing() {
        let (surface, controller) = setup(Ok(br#"{"features":[]}"#.to_vec()));
        surface.fire_ready();

        surface.emit_layer_event(LAYER_ID, LayerEvent::Click, click_at(10.0, 10.0));
        controller.quiesce().await;

        assert!(surface.popups().is_empty());
    }

    #[tokio::test]
    async fn test_query_failure_reaches_hook() {
        let (surface, controller) = setup(Err(FeatureInfoError::Http("boom".to_string())));
        let failures = Arc::new(Mutex::new(Vec::new()));
        let sink = failures.clone();
        controller.on_query_failure(move |error| {
            sink.lock().push(error.clone());
        });
        surface.fire_ready();

        surface.emit_layer_event(LAYER_ID, LayerEvent::Click, click_at(10.0, 10.0));
        controller.quiesce().await;

        assert_eq!(failures.lock().len(), 1);
        assert!(surface.popups().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_reaches_hook() {
        let (surface, controller) = setup(Ok(b"not json".to_vec()));
        let failures = Arc::new(Mutex::new(Vec::new()));
        let sink = failures.clone();
        controller.on_query_failure(move |error| {
            sink.lock().push(error.clone());
        });
        surface.fire_ready();

        surface.emit_layer_event(LAYER_ID, LayerEvent::Click, click_at(10.0, 10.0));
        controller.quiesce().await;

        assert!(matches!(
            failures.lock().first(),
            Some(FeatureInfoError::MalformedBody(_))
        ));
    }

    #[tokio::test]
    async fn test_overlapping_clicks_resolve_independently() {
        let body = r#"{"features":[{"properties":{"area":450}}]}"#;
        let (surface, controller) = setup(Ok(body.as_bytes().to_vec()));
        surface.fire_ready();

        surface.emit_layer_event(LAYER_ID, LayerEvent::Click, click_at(10.0, 10.0));
        surface.emit_layer_event(LAYER_ID, LayerEvent::Click, click_at(20.0, 20.0));
        controller.quiesce().await;

        assert_eq!(surface.popups().len(), 2);
    }

    #[tokio::test]
    async fn test_settled_queries_release_their_handles() {
        let (surface, controller) = setup(Ok(br#"{"features":[]}"#.to_vec()));
        surface.fire_ready();

        surface.emit_layer_event(LAYER_ID, LayerEvent::Click, click_at(10.0, 10.0));
        while !controller.inflight.lock().iter().all(|h| h.is_finished()) {
            tokio::task::yield_now().await;
        }

        // The next click prunes the settled handle, so the set never grows
        // past the number of queries actually running.
        surface.emit_layer_event(LAYER_ID, LayerEvent::Click, click_at(20.0, 20.0));
        assert_eq!(controller.inflight.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_click_before_ready_is_inert() {
        let (surface, controller) = setup(Ok(br#"{"features":[]}"#.to_vec()));

        surface.emit_layer_event(LAYER_ID, LayerEvent::Click, click_at(10.0, 10.0));
        controller.quiesce().await;

        assert!(surface.popups().is_empty());
        assert!(surface.layer_ids().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_layer_is_involution() {
        let (surface, controller) = setup(Ok(br#"{"features":[]}"#.to_vec()));
        surface.fire_ready();

        let read = || surface.layout_property(LAYER_ID, LAYOUT_VISIBILITY);
        assert_eq!(read(), Some(Value::String("visible".to_string())));

        controller.toggle_layer(LAYER_ID);
        assert_eq!(read(), Some(Value::String("none".to_string())));

        controller.toggle_layer(LAYER_ID);
        assert_eq!(read(), Some(Value::String("visible".to_string())));
    }

    #[tokio::test]
    async fn test_toggle_layer_unknown_id_is_delegated() {
        let (surface, controller) = setup(Ok(br#"{"features":[]}"#.to_vec()));
        surface.fire_ready();

        // The headless surface drops writes to unknown layers; the
        // controller does not guard the id.
        controller.toggle_layer("someone-elses-layer");
        assert_eq!(
            surface.layout_property("someone-elses-layer", LAYOUT_VISIBILITY),
            None
        );
    }

    #[tokio::test]
    async fn test_set_opacity_passes_value_through() {
        let (surface, controller) = setup(Ok(br#"{"features":[]}"#.to_vec()));
        surface.fire_ready();

        controller.set_opacity(0.3);
        assert_eq!(
            surface.paint_property(LAYER_ID, PAINT_RASTER_OPACITY),
            Some(json!(0.3))
        );

        // Out-of-range values are not clamped.
        controller.set_opacity(1.5);
        assert_eq!(
            surface.paint_property(LAYER_ID, PAINT_RASTER_OPACITY),
            Some(json!(1.5))
        );
    }

    #[tokio::test]
    async fn test_hover_cursor_mirror() {
        let (surface, _controller) = setup(Ok(br#"{"features":[]}"#.to_vec()));
        surface.fire_ready();

        surface.emit_layer_event(LAYER_ID, LayerEvent::MouseEnter, click_at(10.0, 10.0));
        assert_eq!(surface.cursor(), Cursor::Pointer);

        surface.emit_layer_event(LAYER_ID, LayerEvent::MouseLeave, click_at(10.0, 10.0));
        assert_eq!(surface.cursor(), Cursor::Default);
    }

    #[tokio::test]
    async fn test_dispose_detaches_listeners() {
        let body = r#"{"features":[{"properties":{"area":450}}]}"#;
        let (surface, controller) = setup(Ok(body.as_bytes().to_vec()));
        surface.fire_ready();

        controller.dispose();

        surface.emit_layer_event(LAYER_ID, LayerEvent::Click, click_at(10.0, 10.0));
        surface.emit_layer_event(LAYER_ID, LayerEvent::MouseEnter, click_at(10.0, 10.0));
        controller.quiesce().await;

        assert!(surface.popups().is_empty());
        assert_eq!(surface.cursor(), Cursor::Default);

        // Second dispose is harmless.
        controller.dispose();
    }

    #[tokio::test]
    async fn test_dispose_before_ready_cancels_installation() {
        let (surface, controller) = setup(Ok(br#"{"features":[]}"#.to_vec()));
        controller.dispose();

        surface.fire_ready();
        assert!(surface.layer_ids().is_empty());
    }
}
