//! Graph command - print the strip graph for a catalog id.

use rdaview::config::ClientConfig;
use rdaview::WorldViewImage;

use super::common::{catalog_from_config, ImageArgs};
use crate::error::CliError;

/// Run the graph command.
pub fn run(args: &ImageArgs, config: &ClientConfig, compact: bool) -> Result<(), CliError> {
    let request = args.to_request(config);
    let image = WorldViewImage::new(args.sensor.into(), request, catalog_from_config(config)?)?;
    let graph = image.graph();

    tracing::info!(
        cat_id = image.cat_id(),
        sensor = %image.variant().family,
        terminal = graph.node_id(),
        "Built strip graph"
    );

    let json = if compact {
        graph.to_json()?
    } else {
        graph.to_json_pretty()?
    };
    eprintln!("graph id: {}", graph.graph_id()?);
    println!("{}", json);
    Ok(())
}
