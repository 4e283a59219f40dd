//! Error types for leg computation.
//!
//! Every error here is leg-scoped: the sequencer records it against the leg
//! that produced it and moves on to the next one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while computing a leg or one of its parts.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum NavError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("no valid turn geometry: {0}")]
    GeometryDegenerate(String),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    /// Bearing between two identical points is undefined.
    #[error("points coincide, bearing is undefined")]
    CoincidentPoints,

    #[error("non-finite input coordinate or angle")]
    NonFiniteInput,

    #[error("arc sampling needs at least one segment, got {0}")]
    InvalidSampleCount(usize),
}

/// Inputs outside the physical range of the flight model.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum DomainError {
    #[error("bank angle {0}° outside (0°, 90°)")]
    BankAngleOutOfRange(f64),

    #[error("crosswind component {cross_kt:.1} kt exceeds ground speed {ground_speed_kt:.1} kt")]
    WindExceedsGroundSpeed { cross_kt: f64, ground_speed_kt: f64 },

    #[error("ground speed {0:.1} kt is not positive")]
    NonPositiveGroundSpeed(f64),

    #[error("invalid true airspeed {0} kt")]
    InvalidAirspeed(f64),
}

/// Failures of the planar projection.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ProjectionError {
    #[error("coordinate ({lat}, {lon}) outside projection extent")]
    OutsideExtent { lat: f64, lon: f64 },

    #[error("non-finite coordinate")]
    NonFinite,

    #[error("invalid projection config: {0}")]
    InvalidConfig(String),
}

/// A single field-level violation found by [`crate::models::Route::validate`].
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum ValidationError {
    #[error("waypoint {index}: {field} = {value} outside {range}")]
    WaypointField {
        index: usize,
        field: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("route parameter {field} = {value} outside {range}")]
    Parameter {
        field: &'static str,
        value: f64,
        range: &'static str,
    },
}
