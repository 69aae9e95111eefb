//! `probe` command: issue a GetFeatureInfo request and print the result.

use clap::Args;
use wmsbridge::featureinfo::{FeatureInfoService, ReqwestClient};
use wmsbridge::overlay::format_properties;
use wmsbridge::wms::{BoundingBox, LayerDescriptor, ViewportQuery};

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct ProbeArgs {
    /// Base service URL, e.g. https://geo.example.com/geoserver
    pub service_url: String,

    /// Workspace name
    pub workspace: String,

    /// Layer name
    pub layer: String,

    /// Viewport bounding box as min_x,min_y,max_x,max_y (EPSG:3857)
    #[arg(long)]
    pub bbox: String,

    /// Query pixel x within the canvas
    #[arg(long, default_value_t = 128)]
    pub x: u32,

    /// Query pixel y within the canvas
    #[arg(long, default_value_t = 128)]
    pub y: u32,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 256)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 256)]
    pub height: u32,
}

pub async fn run(args: ProbeArgs) -> Result<(), CliError> {
    let bbox = parse_bbox(&args.bbox)?;
    let descriptor = LayerDescriptor::new(&args.workspace, &args.layer);
    let query = ViewportQuery {
        bbox,
        x: args.x,
        y: args.y,
        width: args.width,
        height: args.height,
    };

    let client = ReqwestClient::new()?;
    let service = FeatureInfoService::new(args.service_url.as_str(), client);
    let collection = service.get_feature_info(&descriptor, &query).await?;

    if collection.features.is_empty() {
        println!("no features at the requested point");
        return Ok(());
    }

    for (index, feature) in collection.features.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!("{}", format_properties(&feature.properties));
    }

    Ok(())
}

fn parse_bbox(raw: &str) -> Result<BoundingBox, CliError> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 4 {
        return Err(CliError::InvalidArgument(format!(
            "bbox must be four comma-separated numbers, got '{}'",
            raw
        )));
    }

    let mut coords = [0.0f64; 4];
    for (slot, part) in coords.iter_mut().zip(&parts) {
        *slot = part.trim().parse().map_err(|_| {
            CliError::InvalidArgument(format!("invalid bbox coordinate '{}'", part))
        })?;
    }
    Ok(BoundingBox::new(coords[0], coords[1], coords[2], coords[3]))
}
