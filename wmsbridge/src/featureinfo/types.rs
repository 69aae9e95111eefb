//! GetFeatureInfo response body types.
//!
//! The endpoint returns `{ "features": [ { "properties": {...} }, ... ] }`.
//! Unknown sibling fields are ignored; property maps keep the server's
//! insertion order, which is the order the popup renders them in.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One queried feature: its attribute map, in server order.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Feature {
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Body of a GetFeatureInfo response.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}
