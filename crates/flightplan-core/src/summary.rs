//! Whole-route totals for kneeboards and status lines.

use crate::models::SECONDS_PER_DAY;
use crate::sequencer::FlightPlanData;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Totals over the computed legs of a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub leg_count: usize,
    pub failed_legs: usize,
    pub total_distance_nm: f64,
    pub total_ete_sec: u64,
    pub total_fuel_lbs: f64,
    /// ETA at the last waypoint; `None` for an empty route
    pub final_eta_sec: Option<u64>,
    pub final_efr_lbs: Option<f64>,
}

impl RouteSummary {
    pub fn from_plan(plan: &FlightPlanData) -> Self {
        let mut summary = Self {
            leg_count: plan.legs.len(),
            failed_legs: plan.failures().count(),
            ..Self::default()
        };
        for leg in plan.computed_legs() {
            summary.total_distance_nm += leg.ground_distance_nm;
            summary.total_ete_sec += leg.time_enroute_sec;
            summary.total_fuel_lbs += leg.leg_fuel_lbs;
        }
        if let Some(last) = plan.turnpoints.last() {
            summary.final_eta_sec = Some(last.eta_sec);
            summary.final_efr_lbs = Some(last.efr_lbs);
        }
        summary
    }

    pub fn is_complete(&self) -> bool {
        self.failed_legs == 0
    }
}

/// Clock time for a seconds-since-midnight value, wrapping past midnight.
pub fn eta_time_of_day(eta_sec: u64) -> NaiveTime {
    let secs = (eta_sec % SECONDS_PER_DAY) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap_or(NaiveTime::MIN)
}

/// Format a duration in seconds as `H:MM:SS`.
pub fn format_duration(total_sec: u64) -> String {
    let hours = total_sec / 3600;
    let minutes = (total_sec % 3600) / 60;
    let seconds = total_sec % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}
