//! Spherical navigation math: bearings, distances, wind triangle and turn radius.

use crate::error::{DomainError, NavError};
use crate::models::GeoPoint;
use serde::{Deserialize, Serialize};

/// Mean Earth radius used by every spherical formula in the crate.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
pub const METERS_PER_NM: f64 = 1852.0;
pub const KNOTS_TO_MPS: f64 = 0.514444;
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Wrap an angle in degrees into [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Calculate the initial bearing from `from` to `to`.
///
/// Returns degrees clockwise from true north in [0, 360). The bearing between
/// two identical points is undefined and reported as
/// [`NavError::CoincidentPoints`] instead of an arbitrary 0°.
pub fn bearing(from: GeoPoint, to: GeoPoint) -> Result<f64, NavError> {
    if !from.is_finite() || !to.is_finite() {
        return Err(NavError::NonFiniteInput);
    }

    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let delta_lambda = (to.lon - from.lon).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    if x.hypot(y) <= f64::EPSILON * 1e-3 {
        return Err(NavError::CoincidentPoints);
    }

    Ok(normalize_degrees(x.atan2(y).to_degrees()))
}

/// Calculate distance between two points in meters using Haversine formula.
///
/// Symmetric in its arguments to the last bit.
pub fn haversine_distance(from: GeoPoint, to: GeoPoint) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let dphi = (to.lat - from.lat).to_radians();
    let dlambda = (to.lon - from.lon).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Offset a position by distance and bearing.
///
/// # Arguments
/// * `start` - Starting position
/// * `distance_m` - Distance in meters
/// * `bearing_deg` - Bearing in degrees (0 = north, 90 = east)
pub fn offset_by_bearing(start: GeoPoint, distance_m: f64, bearing_deg: f64) -> GeoPoint {
    if distance_m.abs() <= f64::EPSILON {
        return start;
    }

    let lat1 = start.lat.to_radians();
    let lon1 = start.lon.to_radians();
    let bearing_rad = bearing_deg.to_radians();
    let angular_distance = distance_m / EARTH_RADIUS_M;

    let sin_lat1 = lat1.sin();
    let cos_lat1 = lat1.cos();
    let sin_ad = angular_distance.sin();
    let cos_ad = angular_distance.cos();

    let sin_lat2 = sin_lat1 * cos_ad + cos_lat1 * sin_ad * bearing_rad.cos();
    let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();

    let y = bearing_rad.sin() * sin_ad * cos_lat1;
    let x = cos_ad - sin_lat1 * sin_lat2;
    let mut lon2 = lon1 + y.atan2(x);
    lon2 =
        (lon2 + std::f64::consts::PI).rem_euclid(2.0 * std::f64::consts::PI) - std::f64::consts::PI;

    GeoPoint::new(lat2.to_degrees(), lon2.to_degrees())
}

/// Heading and ground speed that hold a course through the wind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindSolution {
    /// Heading to fly in [0, 360)
    pub heading: f64,
    pub ground_speed_kt: f64,
    /// Crab angle subtracted from the course, positive into a wind from the right
    pub correction_deg: f64,
}

/// Resolve the wind triangle for a course.
///
/// The wind is split into a head/tail component along the course and a cross
/// component perpendicular to it. Ground speed is TAS plus the tail
/// component, and the crab angle is `asin(cross / ground_speed)`.
///
/// A crosswind stronger than the resulting ground speed has no solution and
/// is reported as [`DomainError::WindExceedsGroundSpeed`].
pub fn wind_corrected_heading(
    course_deg: f64,
    wind_speed_kt: f64,
    wind_direction_deg: f64,
    tas_kt: f64,
) -> Result<WindSolution, DomainError> {
    if !tas_kt.is_finite() || tas_kt < 0.0 {
        return Err(DomainError::InvalidAirspeed(tas_kt));
    }

    // Angle between where the wind blows TO and where we want to go
    let theta = (wind_direction_deg + 180.0 - course_deg).to_radians();
    let tail_component = wind_speed_kt * theta.cos();
    let cross_component = wind_speed_kt * theta.sin();

    let ground_speed_kt = tas_kt + tail_component;
    if !(ground_speed_kt > 0.0) {
        return Err(DomainError::NonPositiveGroundSpeed(ground_speed_kt));
    }
    if cross_component.abs() > ground_speed_kt {
        return Err(DomainError::WindExceedsGroundSpeed {
            cross_kt: cross_component,
            ground_speed_kt,
        });
    }

    let correction_deg = (cross_component / ground_speed_kt).asin().to_degrees();
    Ok(WindSolution {
        heading: normalize_degrees(course_deg - correction_deg),
        ground_speed_kt,
        correction_deg,
    })
}

/// Radius in meters of a coordinated level turn.
///
/// `r = v² / (g·tan(bank))` with `v` in m/s. Bank must lie strictly inside
/// (0°, 90°): zero gives an infinite radius and 90° an undefined one.
pub fn turn_radius(tas_kt: f64, bank_angle_deg: f64) -> Result<f64, DomainError> {
    if !(bank_angle_deg > 0.0 && bank_angle_deg < 90.0) {
        return Err(DomainError::BankAngleOutOfRange(bank_angle_deg));
    }
    if !tas_kt.is_finite() || tas_kt < 0.0 {
        return Err(DomainError::InvalidAirspeed(tas_kt));
    }

    let v = tas_kt * KNOTS_TO_MPS;
    Ok(v * v / (STANDARD_GRAVITY * bank_angle_deg.to_radians().tan()))
}
