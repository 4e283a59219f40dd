//! Local conformal plane for turn geometry.
//!
//! Spherical transverse Mercator centred on a reference meridian. Circle and
//! line algebra done in this plane preserves angles, so turn directions and
//! tangent conditions carry over to the globe at route scales of a few
//! hundred kilometres around the meridian.

use crate::error::ProjectionError;
use crate::models::GeoPoint;
use crate::spatial::EARTH_RADIUS_M;
use serde::{Deserialize, Serialize};

/// Configuration of a [`PlanarProjector`], usually one per map theatre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Longitude of the central meridian in degrees
    pub reference_meridian_deg: f64,
    /// Scale on the central meridian
    pub scale_factor: f64,
    /// Widest longitude offset from the meridian that may be projected
    pub max_meridian_offset_deg: f64,
}

/// Centred on Greenwich. Routes elsewhere need [`ProjectionConfig::with_meridian`].
impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            reference_meridian_deg: 0.0,
            scale_factor: 0.9996,
            max_meridian_offset_deg: 20.0,
        }
    }
}

impl ProjectionConfig {
    pub fn with_meridian(reference_meridian_deg: f64) -> Self {
        Self {
            reference_meridian_deg,
            ..Self::default()
        }
    }
}

/// Point in the projected plane, meters. `x` grows east, `y` grows north.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanePoint {
    pub x: f64,
    pub y: f64,
}

impl PlanePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: PlanePoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Maps geographic coordinates to and from the local plane.
///
/// Built from an explicit [`ProjectionConfig`]; several projectors with
/// different meridians can coexist.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarProjector {
    config: ProjectionConfig,
    /// Earth radius times scale factor
    scaled_radius: f64,
}

impl PlanarProjector {
    pub fn new(config: ProjectionConfig) -> Result<Self, ProjectionError> {
        if !config.reference_meridian_deg.is_finite()
            || !(-180.0..=180.0).contains(&config.reference_meridian_deg)
        {
            return Err(ProjectionError::InvalidConfig(format!(
                "reference meridian {} outside [-180, 180]",
                config.reference_meridian_deg
            )));
        }
        if !(config.scale_factor.is_finite() && config.scale_factor > 0.0) {
            return Err(ProjectionError::InvalidConfig(format!(
                "scale factor {} must be positive",
                config.scale_factor
            )));
        }
        if !(config.max_meridian_offset_deg > 0.0 && config.max_meridian_offset_deg < 90.0) {
            return Err(ProjectionError::InvalidConfig(format!(
                "meridian offset limit {} outside (0, 90)",
                config.max_meridian_offset_deg
            )));
        }

        let scaled_radius = EARTH_RADIUS_M * config.scale_factor;
        Ok(Self {
            config,
            scaled_radius,
        })
    }

    /// Projector centred on `reference_meridian_deg` with default scale and extent.
    pub fn centered_on(reference_meridian_deg: f64) -> Result<Self, ProjectionError> {
        Self::new(ProjectionConfig::with_meridian(reference_meridian_deg))
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Longitude offset from the reference meridian, wrapped into [-180, 180).
    fn meridian_offset(&self, lon: f64) -> f64 {
        (lon - self.config.reference_meridian_deg + 180.0).rem_euclid(360.0) - 180.0
    }

    pub fn project(&self, point: GeoPoint) -> Result<PlanePoint, ProjectionError> {
        if !point.is_finite() {
            return Err(ProjectionError::NonFinite);
        }
        let offset = self.meridian_offset(point.lon);
        if point.lat.abs() > 90.0 || offset.abs() > self.config.max_meridian_offset_deg {
            return Err(ProjectionError::OutsideExtent {
                lat: point.lat,
                lon: point.lon,
            });
        }

        let phi = point.lat.to_radians();
        let dlambda = offset.to_radians();
        let b = phi.cos() * dlambda.sin();

        let x = self.scaled_radius * b.atanh();
        let y = self.scaled_radius * phi.sin().atan2(phi.cos() * dlambda.cos());
        Ok(PlanePoint::new(x, y))
    }

    pub fn unproject(&self, point: PlanePoint) -> Result<GeoPoint, ProjectionError> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(ProjectionError::NonFinite);
        }

        let x = point.x / self.scaled_radius;
        let d = point.y / self.scaled_radius;

        let lat = (d.sin() / x.cosh()).clamp(-1.0, 1.0).asin().to_degrees();
        let offset = x.sinh().atan2(d.cos()).to_degrees();
        if offset.abs() > self.config.max_meridian_offset_deg {
            return Err(ProjectionError::OutsideExtent {
                lat,
                lon: self.config.reference_meridian_deg + offset,
            });
        }

        let lon = (self.config.reference_meridian_deg + offset + 180.0).rem_euclid(360.0) - 180.0;
        Ok(GeoPoint::new(lat, lon))
    }
}
