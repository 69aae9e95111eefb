//! GetFeatureInfo request execution.

use tracing::debug;

use super::{AsyncHttpClient, FeatureCollection, FeatureInfoError};
use crate::wms::{feature_info_url, LayerDescriptor, ViewportQuery};

/// Client for one WMS endpoint's GetFeatureInfo operation.
pub struct FeatureInfoService<C: AsyncHttpClient> {
    service_url: String,
    http_client: C,
}

impl<C: AsyncHttpClient> FeatureInfoService<C> {
    /// Creates a service bound to a base URL, e.g.
    /// `https://geo.example.com/geoserver`.
    pub fn new(service_url: impl Into<String>, http_client: C) -> Self {
        Self {
            service_url: service_url.into(),
            http_client,
        }
    }

    /// The base service URL.
    pub fn service_url(&self) -> &str {
        &self.service_url
    }

    /// Issues a GetFeatureInfo request for the given layer and viewport.
    pub async fn get_feature_info(
        &self,
        descriptor: &LayerDescriptor,
        query: &ViewportQuery,
    ) -> Result<FeatureCollection, FeatureInfoError> {
        let url = feature_info_url(&self.service_url, descriptor, query);
        debug!(url = %url, "issuing GetFeatureInfo request");

        let body = self.http_client.get(&url).await?;
        serde_json::from_slice(&body).map_err(|e| FeatureInfoError::MalformedBody(e.to_string()))
    }
}
