//! Route sequencing: turns a waypoint list into per-leg navigation data.
//!
//! Legs are computed in a single left-to-right pass. Each leg consumes the
//! previous leg's heading as its inbound bearing and the previous ETA and
//! fuel state as its seeds. Failures are leg-scoped: a failed leg is recorded
//! and the pass carries on.

use crate::error::NavError;
use crate::models::{
    GeoPoint, LegResult, Route, RouteParameters, TurnDirection, TurnWarning, TurnpointData,
    Waypoint,
};
use crate::projection::PlanarProjector;
use crate::spatial::{
    bearing, haversine_distance, normalize_degrees, turn_radius, wind_corrected_heading,
    METERS_PER_NM,
};
use crate::summary::RouteSummary;
use crate::turn::TurnGeometryResolver;
use serde::{Deserialize, Serialize};

/// Result of sequencing a whole route.
///
/// Holds one entry per leg and one per waypoint. Lookups are plain index
/// accesses into these vectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightPlanData {
    pub legs: Vec<Result<LegResult, NavError>>,
    pub turnpoints: Vec<TurnpointData>,
}

impl FlightPlanData {
    pub fn leg(&self, index: usize) -> Option<&Result<LegResult, NavError>> {
        self.legs.get(index)
    }

    pub fn turnpoint(&self, index: usize) -> Option<&TurnpointData> {
        self.turnpoints.get(index)
    }

    /// Legs that were computed, in route order.
    pub fn computed_legs(&self) -> impl Iterator<Item = &LegResult> {
        self.legs.iter().filter_map(|leg| leg.as_ref().ok())
    }

    /// Index and error of every leg that could not be computed.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &NavError)> {
        self.legs
            .iter()
            .enumerate()
            .filter_map(|(index, leg)| leg.as_ref().err().map(|err| (index, err)))
    }

    pub fn summary(&self) -> RouteSummary {
        RouteSummary::from_plan(self)
    }
}

/// State carried from one leg to the next.
#[derive(Debug, Clone, Copy)]
struct Carry {
    inbound_bearing: Option<f64>,
    elapsed_sec: u64,
    fuel_remaining_lbs: f64,
}

/// Straight-segment start and turn data for a leg.
struct LegTurn {
    center: Option<GeoPoint>,
    direction: TurnDirection,
    straightening_point: GeoPoint,
    warning: Option<TurnWarning>,
}

/// Computes [`FlightPlanData`] for routes in one projector's plane.
#[derive(Debug, Clone, Copy)]
pub struct LegSequencer<'a> {
    resolver: TurnGeometryResolver<'a>,
}

impl<'a> LegSequencer<'a> {
    pub fn new(projector: &'a PlanarProjector) -> Self {
        Self {
            resolver: TurnGeometryResolver::new(projector),
        }
    }

    /// Compute every leg of `route`.
    ///
    /// Never fails as a whole. Per-leg errors are stored in place of that
    /// leg's result. A failed leg adds no time or fuel, and the leg after it
    /// starts without a turn because there is no resolved heading to chain.
    pub fn sequence(&self, route: &Route) -> FlightPlanData {
        let params = &route.params;
        let mut carry = Carry {
            inbound_bearing: None,
            elapsed_sec: params.initial_time_of_day_sec,
            fuel_remaining_lbs: params.initial_fuel_lbs,
        };

        let mut legs = Vec::with_capacity(route.leg_count());
        let mut turnpoints = Vec::with_capacity(route.waypoints.len());
        if let Some(first) = route.waypoints.first() {
            turnpoints.push(turnpoint(0, first, &carry));
        }

        for (index, pair) in route.waypoints.windows(2).enumerate() {
            let (origin, destination) = (&pair[0], &pair[1]);
            match self.compute_leg(index, origin, destination, params, &carry) {
                Ok(leg) => {
                    carry = Carry {
                        inbound_bearing: Some(leg.magnetic_heading),
                        elapsed_sec: leg.eta_sec,
                        fuel_remaining_lbs: leg.fuel_remaining_lbs,
                    };
                    legs.push(Ok(leg));
                }
                Err(err) => {
                    tracing::warn!("Leg {} could not be computed: {}", index, err);
                    carry.inbound_bearing = None;
                    legs.push(Err(err));
                }
            }
            turnpoints.push(turnpoint(index + 1, destination, &carry));
        }

        FlightPlanData { legs, turnpoints }
    }

    fn compute_leg(
        &self,
        index: usize,
        origin: &Waypoint,
        destination: &Waypoint,
        params: &RouteParameters,
        carry: &Carry,
    ) -> Result<LegResult, NavError> {
        let turn_radius_m = turn_radius(destination.tas_kt, params.bank_angle_deg)?;
        let turn = self.resolve_turn(index, origin, destination, turn_radius_m, carry);

        let to = destination.position();
        let outbound = bearing(turn.straightening_point, to)?;
        let true_course = normalize_degrees(outbound + params.declination_deg);
        let wind = wind_corrected_heading(
            true_course,
            destination.wind_speed_kt,
            destination.wind_direction_deg,
            destination.tas_kt,
        )?;

        let ground_distance_nm = haversine_distance(turn.straightening_point, to) / METERS_PER_NM;
        let time_enroute_sec = (ground_distance_nm / (wind.ground_speed_kt / 3600.0)).round() as u64;
        let leg_fuel_lbs = time_enroute_sec as f64 * (origin.fuel_flow_lbs_hr / 3600.0);

        let eta_sec = carry.elapsed_sec + time_enroute_sec;
        let fuel_remaining_lbs = carry.fuel_remaining_lbs - leg_fuel_lbs;

        tracing::debug!(
            "Leg {}: course {:.1} heading {:.1} dist {:.2} nm gs {:.0} kt ete {} s",
            index,
            true_course,
            wind.heading,
            ground_distance_nm,
            wind.ground_speed_kt,
            time_enroute_sec
        );

        Ok(LegResult {
            index,
            origin: origin.position(),
            destination: to,
            inbound_bearing: carry.inbound_bearing,
            true_course,
            magnetic_heading: wind.heading,
            wind_correction_deg: wind.correction_deg,
            ground_speed_kt: wind.ground_speed_kt,
            ground_distance_nm,
            turn_radius_m,
            turn_direction: turn.direction,
            turn_center: turn.center,
            straightening_point: turn.straightening_point,
            time_enroute_sec,
            leg_fuel_lbs,
            eta_sec,
            fuel_remaining_lbs,
            warning: turn.warning,
        })
    }

    /// Resolve the turn at the start of a leg, degrading to a straight leg
    /// from the origin when there is no inbound bearing or no valid geometry.
    fn resolve_turn(
        &self,
        index: usize,
        origin: &Waypoint,
        destination: &Waypoint,
        turn_radius_m: f64,
        carry: &Carry,
    ) -> LegTurn {
        let straight = |warning: Option<TurnWarning>| LegTurn {
            center: None,
            direction: TurnDirection::Cw,
            straightening_point: origin.position(),
            warning,
        };

        let Some(inbound) = carry.inbound_bearing else {
            return straight(None);
        };

        match self
            .resolver
            .resolve(inbound, origin.position(), destination.position(), turn_radius_m)
        {
            Ok(solution) => LegTurn {
                center: Some(solution.center),
                direction: solution.direction,
                straightening_point: solution.straightening_point,
                warning: solution.ambiguous.then_some(TurnWarning::AmbiguousTangent),
            },
            Err(err) => {
                tracing::warn!(
                    "Leg {}: turn geometry unavailable ({}), flying straight from origin",
                    index,
                    err
                );
                straight(Some(TurnWarning::Fallback(err)))
            }
        }
    }
}

fn turnpoint(index: usize, waypoint: &Waypoint, carry: &Carry) -> TurnpointData {
    TurnpointData {
        index,
        name: waypoint.name.clone(),
        eta_sec: carry.elapsed_sec,
        efr_lbs: carry.fuel_remaining_lbs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;
    use crate::spatial::offset_by_bearing;

    fn waypoint(lat: f64, lon: f64) -> Waypoint {
        Waypoint {
            lat,
            lon,
            tas_kt: 400.0,
            altitude_ft: 3000.0,
            fuel_flow_lbs_hr: 6000.0,
            wind_speed_kt: 0.0,
            wind_direction_deg: 270.0,
            name: None,
        }
    }

    fn at(p: GeoPoint) -> Waypoint {
        waypoint(p.lat, p.lon)
    }

    fn route(waypoints: Vec<Waypoint>) -> Route {
        Route::new(
            waypoints,
            RouteParameters {
                declination_deg: 0.0,
                bank_angle_deg: 30.0,
                initial_time_of_day_sec: 43_200,
                initial_fuel_lbs: 12_000.0,
            },
        )
    }

    fn projector() -> PlanarProjector {
        PlanarProjector::centered_on(36.0).unwrap()
    }

    #[test]
    fn test_empty_route() {
        let projector = projector();
        let data = LegSequencer::new(&projector).sequence(&route(Vec::new()));
        assert!(data.legs.is_empty());
        assert!(data.turnpoints.is_empty());
    }

    #[test]
    fn test_single_waypoint() {
        let projector = projector();
        let data = LegSequencer::new(&projector).sequence(&route(vec![waypoint(34.0, 36.0)]));
        assert!(data.legs.is_empty());
        assert_eq!(data.turnpoints.len(), 1);
        assert_eq!(data.turnpoints[0].eta_sec, 43_200);
        assert_eq!(data.turnpoints[0].efr_lbs, 12_000.0);
    }

    #[test]
    fn test_two_waypoints_no_wind() {
        let projector = projector();
        let a = waypoint(33.5, 36.0);
        let b = waypoint(34.5, 37.0);
        let data = LegSequencer::new(&projector).sequence(&route(vec![a.clone(), b.clone()]));

        let leg = data.leg(0).unwrap().as_ref().unwrap();
        let expected_nm = haversine_distance(a.position(), b.position()) / METERS_PER_NM;
        assert!((leg.ground_distance_nm - expected_nm).abs() < 1e-9);
        assert!((leg.ground_distance_nm - 77.99).abs() < 0.01);
        assert!((leg.true_course - bearing(a.position(), b.position()).unwrap()).abs() < 1e-9);
        assert_eq!(leg.magnetic_heading, leg.true_course);
        assert_eq!(leg.time_enroute_sec, (expected_nm / (400.0 / 3600.0)).round() as u64);

        // First leg never turns
        assert!(!leg.has_arc());
        assert_eq!(leg.turn_direction, TurnDirection::Cw);
        assert_eq!(leg.straightening_point, a.position());
        assert!(leg.inbound_bearing.is_none());
        assert!(leg.warning.is_none());

        assert_eq!(leg.eta_sec, 43_200 + leg.time_enroute_sec);
        assert_eq!(data.turnpoints[1].eta_sec, leg.eta_sec);
        assert_eq!(data.turnpoints[1].efr_lbs, leg.fuel_remaining_lbs);
    }

    #[test]
    fn test_leg_fuel_uses_origin_fuel_flow() {
        let projector = projector();
        let mut a = waypoint(35.0, 36.0);
        a.fuel_flow_lbs_hr = 3600.0;
        let mut b = waypoint(36.0, 36.0);
        b.fuel_flow_lbs_hr = 100_000.0;
        let data = LegSequencer::new(&projector).sequence(&route(vec![a, b]));

        let leg = data.leg(0).unwrap().as_ref().unwrap();
        assert_eq!(leg.leg_fuel_lbs, leg.time_enroute_sec as f64);
        assert_eq!(leg.fuel_remaining_lbs, 12_000.0 - leg.leg_fuel_lbs);
    }

    #[test]
    fn test_declination_is_added_and_wrapped() {
        let projector = projector();
        let mut r = route(vec![waypoint(34.0, 36.0), waypoint(35.0, 36.0)]);
        r.params.declination_deg = -5.0;
        let data = LegSequencer::new(&projector).sequence(&r);
        let leg = data.leg(0).unwrap().as_ref().unwrap();
        assert!((leg.true_course - 355.0).abs() < 1e-6);
    }

    #[test]
    fn test_second_leg_turns_from_previous_heading() {
        let projector = projector();
        let data = LegSequencer::new(&projector).sequence(&route(vec![
            waypoint(34.0, 36.0),
            waypoint(34.0, 36.5),
            waypoint(34.5, 36.5),
        ]));

        let first = data.leg(0).unwrap().as_ref().unwrap();
        let second = data.leg(1).unwrap().as_ref().unwrap();
        assert_eq!(second.inbound_bearing, Some(first.magnetic_heading));
        assert!(second.has_arc());
        assert_eq!(second.turn_direction, TurnDirection::Ccw);
        assert_ne!(second.straightening_point, second.origin);
        // Straight part is shorter than the direct distance
        let direct = haversine_distance(second.origin, second.destination) / METERS_PER_NM;
        assert!(second.ground_distance_nm < direct);
    }

    #[test]
    fn test_near_reversal_falls_back_to_straight_leg() {
        let projector = projector();
        let a = GeoPoint::new(34.0, 36.0);
        let b = GeoPoint::new(34.0, 36.5);
        let inbound = bearing(a, b).unwrap();
        // 1 km away, 170° off the inbound track: inside the ~7.5 km turn circle
        let c = offset_by_bearing(b, 1_000.0, inbound + 170.0);

        let data = LegSequencer::new(&projector).sequence(&route(vec![at(a), at(b), at(c)]));

        let leg = data.leg(1).unwrap().as_ref().unwrap();
        assert!(!leg.has_arc());
        assert_eq!(leg.straightening_point, b);
        assert_eq!(leg.turn_direction, TurnDirection::Cw);
        assert!(matches!(
            leg.warning,
            Some(TurnWarning::Fallback(NavError::GeometryDegenerate(_)))
        ));
        assert!((leg.ground_distance_nm - 1_000.0 / METERS_PER_NM).abs() < 1e-3);
    }

    #[test]
    fn test_wind_domain_error_is_leg_scoped() {
        let projector = projector();
        let mut bad = waypoint(34.5, 36.0);
        bad.tas_kt = 100.0;
        bad.wind_speed_kt = 120.0;
        // Northbound leg, wind from 300°: 60 kt headwind, ~104 kt crosswind
        bad.wind_direction_deg = 300.0;

        let data = LegSequencer::new(&projector).sequence(&route(vec![
            waypoint(34.0, 36.0),
            bad,
            waypoint(35.0, 36.0),
        ]));

        assert!(matches!(
            data.leg(0),
            Some(Err(NavError::Domain(DomainError::WindExceedsGroundSpeed { .. })))
        ));
        assert_eq!(data.failures().count(), 1);

        // Nothing accrues over the failed leg, the next leg is still computed
        assert_eq!(data.turnpoints[1].eta_sec, 43_200);
        assert_eq!(data.turnpoints[1].efr_lbs, 12_000.0);
        let next = data.leg(1).unwrap().as_ref().unwrap();
        assert!(next.inbound_bearing.is_none());
        assert!(!next.has_arc());
        assert_eq!(next.eta_sec, 43_200 + next.time_enroute_sec);
    }

    #[test]
    fn test_bank_angle_error_reported_per_leg() {
        let projector = projector();
        let mut r = route(vec![
            waypoint(34.0, 36.0),
            waypoint(34.5, 36.0),
            waypoint(35.0, 36.0),
        ]);
        r.params.bank_angle_deg = 90.0;
        let data = LegSequencer::new(&projector).sequence(&r);

        assert_eq!(data.legs.len(), 2);
        for leg in &data.legs {
            assert_eq!(
                leg,
                &Err(NavError::Domain(DomainError::BankAngleOutOfRange(90.0)))
            );
        }
        assert_eq!(data.turnpoints.len(), 3);
    }

    #[test]
    fn test_coincident_waypoints_fail_only_their_leg() {
        let projector = projector();
        let data = LegSequencer::new(&projector).sequence(&route(vec![
            waypoint(34.0, 36.0),
            waypoint(34.0, 36.0),
            waypoint(34.5, 36.0),
        ]));
        assert_eq!(data.leg(0), Some(&Err(NavError::CoincidentPoints)));
        assert!(data.leg(1).unwrap().is_ok());
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let projector = projector();
        let r = route(vec![
            waypoint(34.0, 36.0),
            waypoint(34.0, 36.5),
            waypoint(34.5, 36.5),
        ]);
        let before = r.clone();
        let first = LegSequencer::new(&projector).sequence(&r);
        let second = LegSequencer::new(&projector).sequence(&r);
        assert_eq!(r, before);
        assert_eq!(first, second);
    }
}
