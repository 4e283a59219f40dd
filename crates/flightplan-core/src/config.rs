//! Engine configuration shared by the sequencer and arc rendering.

use crate::error::ProjectionError;
use crate::projection::{PlanarProjector, ProjectionConfig};
use serde::{Deserialize, Serialize};

/// Default number of segments an arc is split into for drawing.
pub const DEFAULT_ARC_POINTS: usize = 32;

/// Projection and rendering settings for one theatre.
///
/// `Default` centres the projection on Greenwich, so it only covers routes
/// within the projection extent of longitude 0. Use [`EngineConfig::centered_on`]
/// for anywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub projection: ProjectionConfig,
    /// Segments per sampled turn arc
    #[serde(default = "default_arc_points")]
    pub arc_points: usize,
}

fn default_arc_points() -> usize {
    DEFAULT_ARC_POINTS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionConfig::default(),
            arc_points: DEFAULT_ARC_POINTS,
        }
    }
}

impl EngineConfig {
    /// Default settings with the projection centred on `reference_meridian_deg`.
    pub fn centered_on(reference_meridian_deg: f64) -> Self {
        Self {
            projection: ProjectionConfig::with_meridian(reference_meridian_deg),
            ..Self::default()
        }
    }

    pub fn projector(&self) -> Result<PlanarProjector, ProjectionError> {
        PlanarProjector::new(self.projection.clone())
    }
}
