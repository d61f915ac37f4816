/// Payload of a template as returned by the resource API.
///
/// A template is either stored as a serialized map configuration or as an
/// already structured json document.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum TemplateData {
    Text(String),
    Structured(serde_json::Value),
}

impl TemplateData {
    /// A payload can only be applied to a map when it's a text or a json
    /// object containing a `map` section.
    pub fn is_map_shaped(&self) -> bool {
        match self {
            Self::Text(_) => true,
            Self::Structured(serde_json::Value::Object(inner)) => inner.contains_key("map"),
            Self::Structured(_) => false,
        }
    }
}

/// A saved map configuration, referenced by its id in the resource catalog.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub data_loaded: bool,
    #[serde(default)]
    pub loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<TemplateData>,
}

impl Template {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_data(mut self, data: TemplateData) -> Self {
        self.data = Some(data);
        self.data_loaded = true;
        self
    }
}
