use crate::network::Network;
use anyhow::{format_err, Result};
use std::fs;
use std::path::Path;

/// Reads a network snapshot: a JSON array of substations, each with its
/// voltage levels. The whole file is rejected if any element is invalid.
pub fn load_network(path: &Path) -> Result<Network> {
    let json = fs::read_to_string(path)
        .map_err(|err| format_err!("reading {}: {}", path.display(), err))?;
    let network =
        Network::from_json(&json).map_err(|err| format_err!("{}: {}", path.display(), err))?;

    log::debug!(
        "loaded {}: {} substations, {} voltage levels",
        path.display(),
        network.substations().len(),
        network.voltage_level_count()
    );
    Ok(network)
}
