//! `template` command: print the GetMap tile URL template.

use clap::Args;
use wmsbridge::wms::{tile_url_template, LayerDescriptor};

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Base service URL, e.g. https://geo.example.com/geoserver
    pub service_url: String,

    /// Workspace name
    pub workspace: String,

    /// Layer name
    pub layer: String,
}

pub fn run(args: TemplateArgs) -> Result<(), CliError> {
    let descriptor = LayerDescriptor::new(&args.workspace, &args.layer);
    println!("{}", tile_url_template(&args.service_url, &descriptor));
    Ok(())
}
