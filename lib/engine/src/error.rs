use crate::{format, resource};
use cartouche_prelude::Notification;

pub const TITLE: &str = "mapTemplates.errors.title";
pub const PLEASE_LOGIN: &str = "mapTemplates.errors.pleaseLogin";
pub const NOT_ACCESSIBLE: &str = "mapTemplates.errors.notAccessible";
pub const NOT_FOUND: &str = "mapTemplates.errors.notFound";
pub const UNKNOWN_ERROR: &str = "mapTemplates.errors.unknownError";

/// Failure of a merge or replace workflow.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("template {id} requires authentication: {source}")]
    AuthRequired {
        id: String,
        source: resource::Error,
    },
    #[error("template {id} is not accessible: {source}")]
    Forbidden {
        id: String,
        source: resource::Error,
    },
    #[error("template {id} not found: {source}")]
    NotFound {
        id: String,
        source: resource::Error,
    },
    #[error("unable to load template {id}: {source}")]
    Unknown {
        id: String,
        source: resource::Error,
    },
    #[error("unable to parse template {id}: {source}")]
    ParseFailure { id: String, source: format::Error },
}

impl WorkflowError {
    pub fn from_resource(id: &str, source: resource::Error, session: &resource::Session) -> Self {
        let id = id.to_string();
        match source.status_code() {
            Some(403) if session.is_authenticated() => Self::Forbidden { id, source },
            Some(403) => Self::AuthRequired { id, source },
            Some(404) => Self::NotFound { id, source },
            _ => Self::Unknown { id, source },
        }
    }

    pub fn parse(id: &str, source: format::Error) -> Self {
        Self::ParseFailure {
            id: id.to_string(),
            source,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::AuthRequired { .. } => "auth_required",
            Self::Forbidden { .. } => "forbidden",
            Self::NotFound { .. } => "not_found",
            Self::Unknown { .. } => "unknown",
            Self::ParseFailure { .. } => "parse_failure",
        }
    }

    pub fn message_id(&self) -> &'static str {
        match self {
            Self::AuthRequired { .. } => PLEASE_LOGIN,
            Self::Forbidden { .. } => NOT_ACCESSIBLE,
            Self::NotFound { .. } => NOT_FOUND,
            Self::Unknown { .. } | Self::ParseFailure { .. } => UNKNOWN_ERROR,
        }
    }

    pub fn notification(&self) -> Notification {
        Notification::error(TITLE, self.message_id())
    }
}
