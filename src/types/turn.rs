//! The inbound turn envelope: one message plus the metadata the core consumes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Variable names the core looks up on each turn.
pub const COMPLETION_KEY_VAR: &str = "OPENAI_API_KEY";
pub const SEARCH_KEY_VAR: &str = "SERPER_API_KEY";

/// Input to one processing cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingTurn {
    /// Opaque conversation thread identifier.
    pub thread_id: String,
    /// The new user message text.
    pub message: String,
    /// Completion model identifier, passed through to the provider.
    pub model: String,
    /// General system-message text.
    pub system_message: String,
    /// Optional project-level system text, merged after the general text.
    #[serde(default)]
    pub project_system_message: Option<String>,
    /// Named configuration values attached to the turn.
    #[serde(default)]
    pub variables: Variables,
    /// Optional attachment.
    #[serde(default)]
    pub attachment: Attachment,
    /// Correlation id used by the delivery sink.
    pub response_id: Uuid,
}

/// A turn attachment, explicit rather than probed field-by-field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Attachment {
    #[default]
    None,
    Image {
        url: String,
    },
}

impl Attachment {
    pub fn image_url(&self) -> Option<&str> {
        match self {
            Attachment::Image { url } => Some(url),
            Attachment::None => None,
        }
    }
}

/// Named configuration values, wire shape `[{name, value}, ...]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables(Vec<Variable>);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: String,
}

impl Variables {
    pub fn new(vars: Vec<Variable>) -> Self {
        Self(vars)
    }

    /// Look up a variable by name. First definition wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value.as_str())
    }

    /// The completion credential, if present.
    pub fn completion_key(&self) -> Option<&str> {
        self.get(COMPLETION_KEY_VAR)
    }

    /// The image-search credential, if present.
    pub fn search_key(&self) -> Option<&str> {
        self.get(SEARCH_KEY_VAR)
    }
}

impl FromIterator<(String, String)> for Variables {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| Variable { name, value })
                .collect(),
        )
    }
}
