pub mod action;
pub mod map;
pub mod notification;
pub mod template;

pub use action::{Action, Request};
pub use map::{CurrentMap, MapConfiguration};
pub use notification::Notification;
pub use template::{Template, TemplateData};

#[derive(Debug, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(list) => list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OneOrMany;

    #[test]
    fn single_value_becomes_a_list() {
        let value: OneOrMany<String> = serde_json::from_str("\"alone\"").unwrap();
        assert_eq!(value.into_vec(), vec!["alone".to_string()]);
    }

    #[test]
    fn list_is_kept() {
        let value: OneOrMany<u32> = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(value.into_vec(), vec![1, 2]);
    }
}
