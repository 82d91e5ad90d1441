//! Conversational response object and the mirroring metadata bag.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::MirrorIntensity;
use crate::domain::foundation::{ResponseId, Timestamp};

/// Flags describing what the engine did to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MirrorMetadata {
    #[serde(default)]
    pub mirror_active: bool,
    #[serde(default)]
    pub sycophancy_prevented: bool,
    #[serde(default)]
    pub archetypal_challenge_added: bool,
    #[serde(default)]
    pub dissonance_injected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<MirrorIntensity>,
}

impl MirrorMetadata {
    /// Flags for a fully transformed response.
    pub fn transformed(intensity: MirrorIntensity) -> Self {
        Self {
            mirror_active: true,
            sycophancy_prevented: true,
            archetypal_challenge_added: false,
            dissonance_injected: true,
            intensity: Some(intensity),
        }
    }

    /// Flags for a response that only received an archetypal invitation.
    pub fn enhanced() -> Self {
        Self {
            archetypal_challenge_added: true,
            ..Self::default()
        }
    }

    /// True if no flag is set.
    pub fn is_untouched(&self) -> bool {
        *self == Self::default()
    }
}

/// A generated conversational response as supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub id: ResponseId,
    pub content: String,
    pub created_at: Timestamp,
    /// Host-specific fields carried through untouched.
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub mirror: MirrorMetadata,
}

impl AssistantResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: ResponseId::new(),
            content: content.into(),
            created_at: Timestamp::now(),
            attributes: Map::new(),
            mirror: MirrorMetadata::default(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Builds a new response with replaced content and metadata, preserving every other field.
    pub fn mirrored(&self, content: String, mirror: MirrorMetadata) -> Self {
        Self {
            id: self.id,
            content,
            created_at: self.created_at,
            attributes: self.attributes.clone(),
            mirror,
        }
    }
}
