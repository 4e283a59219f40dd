//! JSON export of a planned route with its sampled turn arcs.

use flightplan_core::{ArcSampler, FlightPlanData, GeoPoint, PlanarProjector, Route, RouteSummary};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PlanOutput<'a> {
    pub route: &'a Route,
    pub plan: &'a FlightPlanData,
    pub summary: RouteSummary,
    /// Sampled turn arc per leg; empty when the leg has no arc or could not be sampled
    pub arcs: Vec<Vec<GeoPoint>>,
}

/// Sample the turn arc of every leg. A failure only empties that leg's arc.
pub fn sample_arcs(
    projector: &PlanarProjector,
    plan: &FlightPlanData,
    arc_points: usize,
) -> Vec<Vec<GeoPoint>> {
    let sampler = ArcSampler::new(projector);
    plan.legs
        .iter()
        .map(|leg| match leg {
            Ok(leg) => sampler.sample_leg(leg, arc_points).unwrap_or_else(|err| {
                tracing::warn!("Turn arc for leg {} not sampled: {}", leg.index + 1, err);
                Vec::new()
            }),
            Err(_) => Vec::new(),
        })
        .collect()
}

pub fn plan_output<'a>(
    route: &'a Route,
    plan: &'a FlightPlanData,
    projector: &PlanarProjector,
    arc_points: usize,
) -> PlanOutput<'a> {
    PlanOutput {
        route,
        plan,
        summary: plan.summary(),
        arcs: sample_arcs(projector, plan, arc_points),
    }
}
