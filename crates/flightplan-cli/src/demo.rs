//! Built-in demo route for running the planner without a route file.

use flightplan_core::spatial::{offset_by_bearing, METERS_PER_NM};
use flightplan_core::{GeoPoint, Route, RouteParameters, Waypoint};

/// Departure point of the demo route
const DEMO_LAT: f64 = 34.0;
const DEMO_LON: f64 = 36.0;

/// Cruise parameters
const CRUISE_TAS_KT: f64 = 400.0;
const CRUISE_ALTITUDE_FT: f64 = 3000.0;
const CRUISE_FUEL_FLOW_LBS_HR: f64 = 6000.0;

/// (name, distance from previous point in nm, bearing from previous point)
const DEMO_TURNPOINTS: [(&str, f64, f64); 3] = [
    ("ALPHA", 30.0, 80.0),
    ("BRAVO", 25.0, 350.0),
    ("CHARLIE", 40.0, 220.0),
];

/// Demo meridian, close enough to the route to keep projection error small
pub const DEMO_REFERENCE_MERIDIAN: f64 = DEMO_LON;

fn demo_waypoint(
    name: &str,
    position: GeoPoint,
    wind_speed_kt: f64,
    wind_direction_deg: f64,
) -> Waypoint {
    Waypoint {
        lat: position.lat,
        lon: position.lon,
        tas_kt: CRUISE_TAS_KT,
        altitude_ft: CRUISE_ALTITUDE_FT,
        fuel_flow_lbs_hr: CRUISE_FUEL_FLOW_LBS_HR,
        wind_speed_kt,
        wind_direction_deg,
        name: Some(name.to_string()),
    }
}

/// A four-waypoint, three-leg route with a steady westerly wind.
pub fn demo_route() -> Route {
    let mut position = GeoPoint::new(DEMO_LAT, DEMO_LON);
    let mut waypoints = vec![demo_waypoint("START", position, 20.0, 270.0)];

    for (name, distance_nm, bearing_deg) in DEMO_TURNPOINTS {
        position = offset_by_bearing(position, distance_nm * METERS_PER_NM, bearing_deg);
        waypoints.push(demo_waypoint(name, position, 20.0, 270.0));
    }

    Route::new(waypoints, RouteParameters::default())
}
