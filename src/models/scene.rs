use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Which kind of surface the segmentation model should look for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SceneType {
    /// House facade: outside walls, siding
    Exterior,
    /// Room walls
    Interior,
}

impl SceneType {
    /// Value sent in the `scene` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneType::Exterior => "exterior",
            SceneType::Interior => "interior",
        }
    }
}

impl fmt::Display for SceneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
