use cartouche_prelude::Template;
use std::borrow::Cow;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("resource api answered with status {status}: {message}")]
    Status {
        status: u16,
        message: Cow<'static, str>,
    },
    #[error("unable to reach resource api: {0}")]
    Transport(String),
    #[error("invalid resource api configuration: {0}")]
    Configuration(Cow<'static, str>),
    #[error("unable to decode resource api response: {0}")]
    Decoding(String),
}

impl Error {
    pub(crate) fn status(status: u16, message: impl Into<Cow<'static, str>>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::status(404, message)
    }

    pub(crate) fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::status(403, message)
    }

    /// HTTP status returned by the resource api, if it answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn reason(&self) -> &'static str {
        match self {
            Self::Status { status: 403, .. } => "forbidden",
            Self::Status { status: 404, .. } => "not_found",
            Self::Status { .. } => "status",
            Self::Transport(_) => "transport",
            Self::Configuration(_) => "configuration",
            Self::Decoding(_) => "decoding",
        }
    }
}

/// Credentials of the user on whose behalf the resource api is called.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub authorization: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authorized(value: impl Into<String>) -> Self {
        Self {
            authorization: Some(value.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authorization.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SearchFilter {
    pub category: String,
    pub ids: Vec<String>,
}

impl SearchFilter {
    pub(crate) fn accepts(&self, id: &str, category: Option<&str>) -> bool {
        self.ids.iter().any(|item| item == id)
            && category.map_or(true, |value| value == self.category)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchOptions {
    pub include_attributes: bool,
    pub start: u32,
    pub limit: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            include_attributes: true,
            start: 0,
            limit: 20,
        }
    }
}

impl SearchOptions {
    pub(crate) fn params(&self) -> [(&'static str, String); 3] {
        [
            ("includeAttributes", self.include_attributes.to_string()),
            ("start", self.start.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Inner {
        Number(u64),
        Text(String),
    }

    Ok(match serde::Deserialize::deserialize(deserializer)? {
        Inner::Number(value) => value.to_string(),
        Inner::Text(value) => value,
    })
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct ResourceAttributes {
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Entry of the resource catalog.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Resource {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attributes: ResourceAttributes,
}

impl From<Resource> for Template {
    fn from(value: Resource) -> Self {
        Template {
            id: value.id,
            name: value.name,
            description: value.description,
            thumbnail: value.attributes.thumbnail,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, Resource, SearchFilter};
    use cartouche_prelude::Template;

    #[test]
    fn should_read_numeric_ids() {
        let resource: Resource = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "osm",
            "attributes": {"thumbnail": "rest/data/43/raw"},
        }))
        .unwrap();
        assert_eq!(resource.id, "42");
        let template = Template::from(resource);
        assert_eq!(template.thumbnail.as_deref(), Some("rest/data/43/raw"));
        assert!(!template.data_loaded);
    }

    #[test]
    fn filter_should_check_id_and_category() {
        let filter = SearchFilter {
            category: "TEMPLATE".into(),
            ids: vec!["1".into(), "2".into()],
        };
        assert!(filter.accepts("1", Some("TEMPLATE")));
        assert!(filter.accepts("2", None));
        assert!(!filter.accepts("1", Some("MAP")));
        assert!(!filter.accepts("3", Some("TEMPLATE")));
    }

    #[test]
    fn should_expose_status_code() {
        assert_eq!(Error::forbidden("nope").status_code(), Some(403));
        assert_eq!(Error::Transport("down".into()).status_code(), None);
    }
}
