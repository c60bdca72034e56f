//! Serde model of the Tiled JSON map format.
//!
//! Only the parts needed to find circuit objects are modeled. Tile layers,
//! image layers and every unknown field are skipped during decoding.

use serde::Deserialize;

use super::record::{Properties, Record};

/// A decoded Tiled map.
#[derive(Debug, Clone, Deserialize)]
pub struct TiledMap {
    /// Tiled version that wrote the file
    #[serde(default, rename = "tiledversion")]
    pub tiled_version: Option<String>,
    /// Top-level layers in file order
    #[serde(default)]
    pub layers: Vec<Layer>,
}

/// A map layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Layer {
    /// Layer holding placed objects
    #[serde(rename = "objectgroup")]
    Objects(ObjectLayer),
    /// Folder of nested layers
    #[serde(rename = "group")]
    Group(GroupLayer),
    /// Tile, image or any other layer kind
    #[serde(other)]
    Other,
}

/// An object layer.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectLayer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub objects: Vec<TiledObject>,
}

/// A group layer.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupLayer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

/// A placed object.
#[derive(Debug, Clone, Deserialize)]
pub struct TiledObject {
    pub id: u32,
    /// Empty when the designer left the object unnamed
    #[serde(default)]
    pub name: String,
    /// Newer Tiled versions call this field `class`
    #[serde(default, rename = "type", alias = "class")]
    pub tag: String,
    #[serde(default)]
    pub properties: Vec<TiledProperty>,
}

/// A custom property attached to an object.
#[derive(Debug, Clone, Deserialize)]
pub struct TiledProperty {
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl TiledMap {
    /// Collect object layers depth-first in file order, descending into groups.
    pub fn object_layers(&self) -> Vec<&ObjectLayer> {
        let mut found = Vec::new();
        collect_layers(&self.layers, &mut found);
        found
    }

    /// All object records of the map in ingestion order.
    pub fn records(&self) -> impl Iterator<Item = Record> + '_ {
        self.object_layers()
            .into_iter()
            .flat_map(|layer| layer.objects.iter().map(TiledObject::to_record))
    }
}

fn collect_layers<'a>(layers: &'a [Layer], found: &mut Vec<&'a ObjectLayer>) {
    for layer in layers {
        match layer {
            Layer::Objects(objects) => found.push(objects),
            Layer::Group(group) => collect_layers(&group.layers, found),
            Layer::Other => {}
        }
    }
}

impl TiledObject {
    /// Convert into an ingestion record, keeping only the known properties.
    pub fn to_record(&self) -> Record {
        let mut properties = Properties::default();
        for property in &self.properties {
            match property.name.as_str() {
                "input" => properties.input = property.value.as_str().map(str::to_string),
                "frame_state" => properties.frame_state = Some(property.value.clone()),
                _ => {}
            }
        }

        Record {
            id: self.id,
            name: Some(self.name.clone()).filter(|name| !name.is_empty()),
            tag: self.tag.clone(),
            properties,
        }
    }
}
