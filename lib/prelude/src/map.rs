//! Map configuration format.
//!
//! Only the fields the template workflow works with are typed, everything else
//! is kept in the `extra` maps so that a configuration goes through a merge or
//! a replace without losing anything.

use serde_json::{Map, Value};

pub const BACKGROUND_GROUP: &str = "background";

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Center {
    pub x: f64,
    pub y: f64,
    #[serde(default = "Center::default_crs")]
    pub crs: String,
}

impl Center {
    fn default_crs() -> String {
        "EPSG:4326".into()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Bounds {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct BoundingBox {
    pub bounds: Bounds,
    pub crs: String,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Layer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Layer {
    pub fn is_background(&self) -> bool {
        self.group.as_deref() == Some(BACKGROUND_GROUP)
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.unwrap_or(false)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum GroupNode {
    Layer(String),
    Group(Group),
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Group {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<GroupNode>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of the background selector.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Background {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TextSearchConfig {
    #[serde(default)]
    pub services: Vec<Value>,
    #[serde(default, rename = "override")]
    pub override_services: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Center>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_extent: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<Group>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub backgrounds: Vec<Background>,
    #[serde(
        default,
        rename = "text_search_config",
        skip_serializing_if = "Option::is_none"
    )]
    pub text_search_config: Option<TextSearchConfig>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<MapSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_services: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widgets_config: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MapConfiguration {
    pub fn zoom(&self) -> Option<f64> {
        self.map.as_ref().and_then(|map| map.zoom)
    }

    pub fn center(&self) -> Option<&Center> {
        self.map.as_ref().and_then(|map| map.center.as_ref())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum MapId {
    Number(u64),
    Name(String),
}

/// The map currently opened by the user, on which a template gets applied.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentMap {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_id: Option<MapId>,
    #[serde(default)]
    pub config: MapConfiguration,
}
