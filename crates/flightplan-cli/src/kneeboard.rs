//! Plain-text kneeboard rendering of a sequenced route.

use flightplan_core::spatial::METERS_PER_NM;
use flightplan_core::summary::{eta_time_of_day, format_duration};
use flightplan_core::{FlightPlanData, LegResult, Route, TurnDirection, TurnWarning};
use std::fmt::{self, Write};

const HEADER: &str = "LEG  FROM       TO           TC    MH   DIST    GS      ETE       ETA     FUEL      EFR";

fn waypoint_label(route: &Route, index: usize) -> String {
    route
        .waypoints
        .get(index)
        .and_then(|wp| wp.name.clone())
        .unwrap_or_else(|| format!("WP{}", index))
}

fn turn_note(leg: &LegResult) -> String {
    match (&leg.warning, leg.turn_center) {
        (Some(TurnWarning::Fallback(err)), _) => format!("straight, turn not flown: {}", err),
        (Some(TurnWarning::AmbiguousTangent), Some(_)) => {
            format!("{} turn, ambiguous tangent", direction_label(leg.turn_direction))
        }
        (_, Some(_)) => format!(
            "{} turn, r={:.2} nm",
            direction_label(leg.turn_direction),
            leg.turn_radius_m / METERS_PER_NM
        ),
        (_, None) => String::new(),
    }
}

fn direction_label(direction: TurnDirection) -> &'static str {
    match direction {
        TurnDirection::Cw => "right",
        TurnDirection::Ccw => "left",
    }
}

/// Render one row per leg followed by a totals line.
pub fn render_kneeboard(route: &Route, plan: &FlightPlanData) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{}", HEADER)?;

    for (index, leg) in plan.legs.iter().enumerate() {
        let from = waypoint_label(route, index);
        let to = waypoint_label(route, index + 1);
        match leg {
            Ok(leg) => {
                writeln!(
                    out,
                    "{:>3}  {:<10} {:<10} {:>5.1} {:>5.1} {:>6.1} {:>5.0} {:>8} {:>9} {:>8.1} {:>8.1}  {}",
                    index + 1,
                    from,
                    to,
                    leg.true_course,
                    leg.magnetic_heading,
                    leg.ground_distance_nm,
                    leg.ground_speed_kt,
                    format_duration(leg.time_enroute_sec),
                    eta_time_of_day(leg.eta_sec).format("%H:%M:%S").to_string(),
                    leg.leg_fuel_lbs,
                    leg.fuel_remaining_lbs,
                    turn_note(leg)
                )?;
            }
            Err(err) => {
                writeln!(out, "{:>3}  {:<10} {:<10} FAILED: {}", index + 1, from, to, err)?;
            }
        }
    }

    let summary = plan.summary();
    writeln!(
        out,
        "TOTAL {:.1} nm, {}, {:.1} lbs burned",
        summary.total_distance_nm,
        format_duration(summary.total_ete_sec),
        summary.total_fuel_lbs
    )?;
    if let (Some(eta), Some(efr)) = (summary.final_eta_sec, summary.final_efr_lbs) {
        writeln!(
            out,
            "ARRIVE {} with {:.1} lbs",
            eta_time_of_day(eta).format("%H:%M:%S"),
            efr
        )?;
    }
    if !summary.is_complete() {
        writeln!(out, "WARNING: {} leg(s) could not be computed", summary.failed_legs)?;
    }
    Ok(out)
}
