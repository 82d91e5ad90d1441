//! Mirror intensity dial.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// How strongly a transformation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorIntensity {
    Gentle,
    #[default]
    Moderate,
    Intense,
}

impl MirrorIntensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            MirrorIntensity::Gentle => "gentle",
            MirrorIntensity::Moderate => "moderate",
            MirrorIntensity::Intense => "intense",
        }
    }
}

impl fmt::Display for MirrorIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MirrorIntensity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gentle" => Ok(MirrorIntensity::Gentle),
            "moderate" => Ok(MirrorIntensity::Moderate),
            "intense" => Ok(MirrorIntensity::Intense),
            other => Err(ValidationError::invalid_format(
                "intensity",
                format!("unknown level '{}'", other),
            )),
        }
    }
}
