#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warning,
    #[default]
    Error,
}

/// User facing notification. `title` and `message` are message identifiers,
/// the client is in charge of translating them.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub level: Level,
    /// Number of seconds before the notification gets dismissed.
    pub auto_dismiss: u32,
    pub position: String,
}

impl Notification {
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: Level::Error,
            auto_dismiss: 6,
            position: "tc".into(),
        }
    }
}
