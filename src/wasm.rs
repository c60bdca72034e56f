//! WASM bindings for levelwire.
//!
//! This module provides JavaScript-friendly bindings for in-browser level
//! tooling.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmLevel } from 'levelwire';
//!
//! await init();
//!
//! const level = new WasmLevel(await (await fetch('level.json')).text(), []);
//! console.log(level.doors());
//! const assignment = JSON.parse(level.solve(['vault']));
//! const verilog = level.export(['vault']);
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::Graph;
use crate::error::CircuitError;
use crate::map;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn to_js(error: CircuitError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// A built level graph.
#[wasm_bindgen]
pub struct WasmLevel {
    graph: Graph,
}

#[wasm_bindgen]
impl WasmLevel {
    /// Load a level from Tiled map JSON.
    ///
    /// # Arguments
    /// * `map_json` - The map as saved by Tiled
    /// * `force_inputs` - Names of nodes to treat as inputs fixed to true
    #[wasm_bindgen(constructor)]
    pub fn new(map_json: &str, force_inputs: Vec<String>) -> Result<WasmLevel, JsValue> {
        let tiled = map::parse(map_json).map_err(to_js)?;

        let mut graph = Graph::new();
        map::ingest(&tiled, &mut graph).map_err(to_js)?;
        graph.build().map_err(to_js)?;
        for name in &force_inputs {
            graph.mark_as_input(name).map_err(to_js)?;
        }

        Ok(WasmLevel { graph })
    }

    /// Names of all doors in map order.
    #[wasm_bindgen]
    pub fn doors(&self) -> Vec<String> {
        self.graph.sinks().iter().map(|node| node.name.clone()).collect()
    }

    /// Solve for the given doors.
    ///
    /// # Returns
    /// A JSON object mapping variable names to booleans.
    #[wasm_bindgen]
    pub fn solve(&mut self, doors: Vec<String>) -> Result<String, JsValue> {
        let assignment = self.graph.solve(&doors).map_err(to_js)?;
        serde_json::to_string(&assignment)
            .map_err(|e| to_js(CircuitError::WasmError { message: e.to_string() }))
    }

    /// Export the given doors as a Verilog netlist.
    #[wasm_bindgen]
    pub fn export(&self, doors: Vec<String>) -> Result<String, JsValue> {
        let netlist = self.graph.extract(&doors).map_err(to_js)?;
        Ok(netlist.to_string())
    }
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
