//! Configuration options for vismesh.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VisError};

/// Global configuration options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Defaults applied to newly created meshes.
    pub mesh: MeshOptions,

    /// Light rig configuration.
    pub lights: LightOptions,
}

impl Options {
    /// Parses options from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let options = Self::from_json_str(&text)?;
        log::debug!("loaded options from {}", path.as_ref().display());
        Ok(options)
    }

    /// Serializes the options to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Per-mesh drawing options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshOptions {
    /// Renormalize the accumulated flat normals. Off by default: flat normals
    /// are left as the raw average and the pipeline renormalizes on the GPU.
    pub normalize_flat_normals: bool,

    /// Which faces to cull, if any.
    pub cull_faces: Option<CullFaces>,
}

/// Light rig options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightOptions {
    /// Whether the main camera light (slot 0) starts switched on.
    pub main_light_on: bool,
}

impl Default for LightOptions {
    fn default() -> Self {
        Self {
            main_light_on: true,
        }
    }
}

/// Which side of the faces gets culled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CullFaces {
    /// Front-facing faces are not drawn.
    Front,
    /// Back-facing faces are not drawn.
    Back,
}

impl CullFaces {
    /// Parses an optional cull setting; `None` or an empty string disables culling.
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>> {
        match value.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }

    /// The lowercase name of this setting.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
        }
    }
}

impl FromStr for CullFaces {
    type Err = VisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "front" => Ok(Self::Front),
            "back" => Ok(Self::Back),
            _ => Err(VisError::value(format!("invalid value for cullFaces: '{s}'"))),
        }
    }
}
