//! Bands command - show derived band indices for a sensor.

use rdaview::sensor::{Capability, SensorFamily};

use super::common::SensorArg;

/// Format one capability line, e.g. `RGB   [4, 2, 1]`.
fn describe(family: SensorFamily, capability: Capability) -> String {
    match family.variant().bands_for(capability) {
        Ok(bands) => format!("{:<5} {:?}", capability.to_string(), bands),
        Err(_) => format!("{:<5} unsupported", capability.to_string()),
    }
}

/// Run the bands command.
pub fn run(sensor: SensorArg) {
    let family = SensorFamily::from(sensor);
    println!("{}", family);
    for capability in [Capability::Rgb, Capability::Ndvi, Capability::Ndwi] {
        println!("  {}", describe(family, capability));
    }
}
