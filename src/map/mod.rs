//! Map ingestion.
//!
//! Level maps are authored in the Tiled editor and saved as JSON. Circuit
//! elements are ordinary map objects whose type tag names a logic element
//! and whose custom properties carry the wiring:
//!
//! | Property | Meaning |
//! |----------|---------|
//! | `input` | Newline-delimited names of the upstream objects |
//! | `frame_state` | Animation state, carried through untouched |
//!
//! Objects are ingested layer by layer in file order. Group layers are
//! descended into depth-first. Everything else in the map is ignored.
//!
//! # Example
//!
//! ```text
//! { "tiledversion": "1.8.2",
//!   "layers": [ { "type": "objectgroup", "name": "logic", "objects": [
//!     { "id": 1, "name": "A", "type": "Control" },
//!     { "id": 2, "name": "D", "type": "Door",
//!       "properties": [ { "name": "input", "type": "string", "value": "A" } ] }
//!   ] } ] }
//! ```

mod record;
mod tiled;

pub use record::{FrameState, Properties, Record};
pub use tiled::{GroupLayer, Layer, ObjectLayer, TiledMap, TiledObject, TiledProperty};

use crate::circuit::Graph;
use crate::error::{CircuitError, Result};

/// Parse a Tiled JSON map from a string.
pub fn parse(input: &str) -> Result<TiledMap> {
    serde_json::from_str(input).map_err(|source| CircuitError::MapParse { source })
}

/// Parse a Tiled JSON map file.
#[cfg(feature = "cli")]
pub fn load(path: &std::path::Path) -> Result<TiledMap> {
    let content = std::fs::read_to_string(path).map_err(|e| CircuitError::MapRead {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}

/// Add every object record of `map` to `graph`.
pub fn ingest(map: &TiledMap, graph: &mut Graph) -> Result<()> {
    for record in map.records() {
        graph.add(record)?;
    }
    Ok(())
}
