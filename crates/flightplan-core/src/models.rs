//! Core data models for the flight plan engine.

use crate::error::{NavError, ValidationError};
use serde::{Deserialize, Serialize};

/// Seconds in one day, the upper bound for a time-of-day seed.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Direction the aircraft circles while turning, viewed from above with north up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TurnDirection {
    /// Clockwise, i.e. a right turn.
    #[default]
    Cw,
    /// Counter-clockwise, i.e. a left turn.
    Ccw,
}

/// A route waypoint together with the flight state used on the leg into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lon: f64,
    /// True airspeed in knots
    pub tas_kt: f64,
    pub altitude_ft: f64,
    /// Fuel flow in lbs/hour
    pub fuel_flow_lbs_hr: f64,
    pub wind_speed_kt: f64,
    /// Direction the wind blows FROM, in degrees
    pub wind_direction_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Waypoint {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// Parameters shared by every leg of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteParameters {
    /// Magnetic variation, positive east
    pub declination_deg: f64,
    /// Bank angle flown in turns, valid range (0, 90) exclusive
    pub bank_angle_deg: f64,
    /// Departure time as seconds since midnight
    pub initial_time_of_day_sec: u64,
    /// Fuel on board at departure
    pub initial_fuel_lbs: f64,
}

impl Default for RouteParameters {
    fn default() -> Self {
        Self {
            declination_deg: 0.0,
            bank_angle_deg: 30.0,
            initial_time_of_day_sec: 12 * 3600,
            initial_fuel_lbs: 12_000.0,
        }
    }
}

/// An ordered waypoint list plus the parameters it is flown with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub waypoints: Vec<Waypoint>,
    #[serde(default)]
    pub params: RouteParameters,
}

impl Route {
    pub fn new(waypoints: Vec<Waypoint>, params: RouteParameters) -> Self {
        Self { waypoints, params }
    }

    /// Number of legs: one per consecutive waypoint pair.
    pub fn leg_count(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    /// Check every field against its allowed range.
    ///
    /// Returns all violations rather than stopping at the first one, so an
    /// editor can highlight each offending field. An empty vector means the
    /// route is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (index, wp) in self.waypoints.iter().enumerate() {
            let mut check = |field: &'static str, value: f64, ok: bool, range: &'static str| {
                if !value.is_finite() || !ok {
                    errors.push(ValidationError::WaypointField {
                        index,
                        field,
                        value,
                        range,
                    });
                }
            };
            check("lat", wp.lat, (-90.0..=90.0).contains(&wp.lat), "[-90, 90]");
            check("lon", wp.lon, (-180.0..=180.0).contains(&wp.lon), "[-180, 180]");
            check("tas_kt", wp.tas_kt, wp.tas_kt >= 0.0, "[0, inf)");
            check("altitude_ft", wp.altitude_ft, wp.altitude_ft >= 0.0, "[0, inf)");
            check(
                "fuel_flow_lbs_hr",
                wp.fuel_flow_lbs_hr,
                wp.fuel_flow_lbs_hr >= 0.0,
                "[0, inf)",
            );
            check("wind_speed_kt", wp.wind_speed_kt, wp.wind_speed_kt >= 0.0, "[0, inf)");
            check(
                "wind_direction_deg",
                wp.wind_direction_deg,
                (0.0..=360.0).contains(&wp.wind_direction_deg),
                "[0, 360]",
            );
        }

        let params = &self.params;
        if !params.declination_deg.is_finite() {
            errors.push(ValidationError::Parameter {
                field: "declination_deg",
                value: params.declination_deg,
                range: "finite",
            });
        }
        if !(params.bank_angle_deg > 0.0 && params.bank_angle_deg < 90.0) {
            errors.push(ValidationError::Parameter {
                field: "bank_angle_deg",
                value: params.bank_angle_deg,
                range: "(0, 90)",
            });
        }
        if params.initial_time_of_day_sec >= SECONDS_PER_DAY {
            errors.push(ValidationError::Parameter {
                field: "initial_time_of_day_sec",
                value: params.initial_time_of_day_sec as f64,
                range: "[0, 86400)",
            });
        }
        if !(params.initial_fuel_lbs.is_finite() && params.initial_fuel_lbs >= 0.0) {
            errors.push(ValidationError::Parameter {
                field: "initial_fuel_lbs",
                value: params.initial_fuel_lbs,
                range: "[0, inf)",
            });
        }

        errors
    }
}

/// Resolved turn from the inbound track onto the straight segment of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnSolution {
    pub center: GeoPoint,
    pub direction: TurnDirection,
    pub straightening_point: GeoPoint,
    /// Set when neither tangent candidate was aligned with the flight direction
    /// and the less-misaligned one was taken.
    #[serde(default)]
    pub ambiguous: bool,
}

/// Why a leg was flown as a straight segment instead of with a turn arc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TurnWarning {
    /// Turn geometry could not be resolved, the leg starts at its origin.
    Fallback(NavError),
    /// Tangent point picked by the least-misaligned tie-break.
    AmbiguousTangent,
}

/// Fully resolved navigation data for one leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegResult {
    pub index: usize,
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    /// Inbound heading the turn started from; `None` when the leg has no turn.
    pub inbound_bearing: Option<f64>,
    pub true_course: f64,
    pub magnetic_heading: f64,
    pub wind_correction_deg: f64,
    pub ground_speed_kt: f64,
    pub ground_distance_nm: f64,
    pub turn_radius_m: f64,
    pub turn_direction: TurnDirection,
    /// `None` means the leg has no arc.
    pub turn_center: Option<GeoPoint>,
    pub straightening_point: GeoPoint,
    pub time_enroute_sec: u64,
    pub leg_fuel_lbs: f64,
    pub eta_sec: u64,
    pub fuel_remaining_lbs: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<TurnWarning>,
}

impl LegResult {
    /// Whether the leg begins with a turn arc.
    pub fn has_arc(&self) -> bool {
        self.turn_center.is_some()
    }
}

/// Arrival state at a waypoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnpointData {
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub eta_sec: u64,
    /// Estimated fuel remaining
    pub efr_lbs: f64,
}
