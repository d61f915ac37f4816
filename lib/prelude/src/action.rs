use crate::map::{MapConfiguration, MapId};
use crate::notification::Notification;
use crate::template::{Template, TemplateData};

/// Requests consumed by the template workflow.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    OpenTemplatesPanel,
    MergeTemplate { id: String },
    ReplaceTemplate { id: String },
    ClearTemplates,
}

impl Request {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OpenTemplatesPanel => "open_templates_panel",
            Self::MergeTemplate { .. } => "merge_template",
            Self::ReplaceTemplate { .. } => "replace_template",
            Self::ClearTemplates => "clear_templates",
        }
    }
}

/// Actions produced by the template workflow, in the order they are emitted.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    SetTemplates {
        templates: Vec<Template>,
    },
    #[serde(rename_all = "camelCase")]
    SetTemplatesLoaded {
        loaded: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    SetTemplateData {
        id: String,
        data: TemplateData,
    },
    SetTemplateLoading {
        id: String,
        loading: bool,
    },
    #[serde(rename_all = "camelCase")]
    ConfigureMap {
        config: MapConfiguration,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        map_id: Option<MapId>,
        /// Hint for the client to fit the view to the configured extent.
        #[serde(default)]
        zoom_to_extent: bool,
    },
    ShowError {
        notification: Notification,
    },
    SetControlProperty {
        control: String,
        property: String,
        value: serde_json::Value,
    },
}

impl Action {
    pub fn template_loading(id: &str, loading: bool) -> Self {
        Self::SetTemplateLoading {
            id: id.to_string(),
            loading,
        }
    }
}
