//! WMS layer identity.

/// Identity of one WMS layer within a workspace.
///
/// Created once at controller initialization and immutable afterwards. The
/// derived layer id is the stable key for every surface call that references
/// the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerDescriptor {
    workspace: String,
    layer: String,
    layer_id: String,
}

impl LayerDescriptor {
    /// Creates a descriptor for `workspace`/`layer`.
    ///
    /// The derived id is `"{workspace}-{layer}-wms"`, deterministically.
    pub fn new(workspace: impl Into<String>, layer: impl Into<String>) -> Self {
        let workspace = workspace.into();
        let layer = layer.into();
        let layer_id = format!("{}-{}-wms", workspace, layer);
        Self {
            workspace,
            layer,
            layer_id,
        }
    }

    /// The workspace name.
    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    /// The layer name within the workspace.
    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// The derived layer id used for all surface calls.
    pub fn layer_id(&self) -> &str {
        &self.layer_id
    }

    /// The WMS-qualified `workspace:layer` name used in request parameters.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.workspace, self.layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_id_derivation() {
        let descriptor = LayerDescriptor::new("planning", "parcels");
        assert_eq!(descriptor.layer_id(), "planning-parcels-wms");
    }

    #[test]
    fn test_layer_id_is_deterministic() {
        let a = LayerDescriptor::new("topo", "contours");
        let b = LayerDescriptor::new("topo", "contours");
        assert_eq!(a.layer_id(), b.layer_id());
        assert_eq!(a, b);
    }

    #[test]
    fn test_qualified_name() {
        let descriptor = LayerDescriptor::new("planning", "parcels");
        assert_eq!(descriptor.qualified_name(), "planning:parcels");
    }

    #[test]
    fn test_accessors() {
        let descriptor = LayerDescriptor::new("planning", "parcels");
        assert_eq!(descriptor.workspace(), "planning");
        assert_eq!(descriptor.layer(), "parcels");
    }
}
