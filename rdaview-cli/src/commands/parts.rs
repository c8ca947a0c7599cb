//! Parts command - list the IDAHO tiles behind a catalog id.

use rdaview::config::ClientConfig;
use rdaview::WorldViewImage;

use super::common::{catalog_from_config, ImageArgs};
use crate::error::CliError;

/// Run the parts command.
///
/// Prints one tab-separated line per tile: image id, bucket. With `graphs`,
/// each line is followed by the tile's read graph as JSON.
pub fn run(args: &ImageArgs, config: &ClientConfig, graphs: bool) -> Result<(), CliError> {
    let request = args.to_request(config);
    let image = WorldViewImage::new(args.sensor.into(), request, catalog_from_config(config)?)?;
    let parts = image.parts()?;

    tracing::info!(
        cat_id = image.cat_id(),
        sensor = %image.variant().family,
        count = parts.len(),
        "Resolved composite parts"
    );

    for part in parts {
        println!("{}\t{}", part.image_id(), part.bucket());
        if graphs {
            println!("{}", part.build_graph().to_json()?);
        }
    }
    Ok(())
}
