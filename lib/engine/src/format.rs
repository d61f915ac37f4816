//! Conversion of template payloads into map configurations.

use cartouche_prelude::{MapConfiguration, TemplateData};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported map configuration format: {0}")]
    Unsupported(&'static str),
    #[error("unable to parse map configuration: {0}")]
    Invalid(#[from] serde_json::Error),
    #[error("map configuration has no map section")]
    MissingMap,
}

fn from_value(value: Value) -> Result<MapConfiguration, Error> {
    match value {
        Value::Object(inner) if inner.contains_key("map") => {
            Ok(serde_json::from_value(Value::Object(inner))?)
        }
        _ => Err(Error::MissingMap),
    }
}

/// Parses a serialized map configuration.
pub fn parse(text: &str) -> Result<MapConfiguration, Error> {
    if text.trim_start().starts_with('<') {
        return Err(Error::Unsupported("xml"));
    }
    let value: Value = serde_json::from_str(text)?;
    from_value(value)
}

/// Turns a template payload into a map configuration.
///
/// Structured payloads that don't look like a map configuration are not an
/// error, they just don't produce any configuration.
pub fn normalize(data: &TemplateData) -> Result<Option<MapConfiguration>, Error> {
    match data {
        TemplateData::Text(text) => parse(text).map(Some),
        TemplateData::Structured(value) if data.is_map_shaped() => {
            from_value(value.clone()).map(Some)
        }
        TemplateData::Structured(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize, parse, Error};
    use cartouche_prelude::TemplateData;

    #[test]
    fn should_parse_json_text() {
        let config = parse(include_str!("../../../resources/osm-basemap/data.json")).unwrap();
        assert_eq!(config.zoom(), Some(5.0));
        assert!(config.widgets_config.is_some());
    }

    #[test]
    fn should_fail_with_truncated_text() {
        let err = parse(include_str!("../../../resources/broken/data.json")).unwrap_err();
        assert!(matches!(err, Error::Invalid(_)));
    }

    #[test]
    fn should_fail_with_xml_context() {
        let err = parse("  <ViewContext version=\"1.1.0\"></ViewContext>").unwrap_err();
        assert!(matches!(err, Error::Unsupported("xml")));
    }

    #[test]
    fn should_fail_without_map_section() {
        let err = parse("{\"layers\": []}").unwrap_err();
        assert!(matches!(err, Error::MissingMap));
    }

    #[test]
    fn should_ignore_structured_data_without_map() {
        let data = TemplateData::Structured(serde_json::json!({"widgets": []}));
        assert!(normalize(&data).unwrap().is_none());
    }

    #[test]
    fn should_decode_structured_map() {
        let data = TemplateData::Structured(serde_json::json!({"map": {"zoom": 4}}));
        let config = normalize(&data).unwrap().unwrap();
        assert_eq!(config.zoom(), Some(4.0));
    }

    #[test]
    fn should_fail_with_invalid_structured_map() {
        let data = TemplateData::Structured(serde_json::json!({"map": {"zoom": "far"}}));
        assert!(matches!(normalize(&data), Err(Error::Invalid(_))));
    }
}
