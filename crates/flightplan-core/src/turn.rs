//! Turn geometry between consecutive legs.
//!
//! The aircraft arrives at a waypoint on an inbound bearing and banks onto a
//! circle tangent to that bearing. It rolls out at the straightening point,
//! the point of the circle whose tangent passes through the next waypoint,
//! and flies straight from there.

use crate::error::NavError;
use crate::models::{GeoPoint, TurnDirection, TurnSolution};
use crate::projection::{PlanarProjector, PlanePoint};
use crate::spatial::bearing;

/// Below this squared distance (m²) the destination sits on the turn centre.
const MIN_CENTER_DISTANCE_SQ_M2: f64 = 1e-6;

/// Pick the turn direction from the inbound bearing and the direct bearing
/// to the destination.
///
/// A clockwise difference above 180° means the destination is to the left.
/// Exactly 180° and straight ahead both resolve to a right turn.
pub fn turn_direction(inbound_bearing: f64, outbound_bearing: f64) -> TurnDirection {
    if (outbound_bearing - inbound_bearing).rem_euclid(360.0) > 180.0 {
        TurnDirection::Ccw
    } else {
        TurnDirection::Cw
    }
}

/// Centre of the turn circle tangent to the inbound bearing at `origin`.
pub fn turn_center(
    origin: PlanePoint,
    inbound_bearing: f64,
    radius_m: f64,
    direction: TurnDirection,
) -> PlanePoint {
    let (sin_b, cos_b) = inbound_bearing.to_radians().sin_cos();
    // Unit normal to the track, on the side the aircraft turns toward
    let (nx, ny) = match direction {
        TurnDirection::Cw => (cos_b, -sin_b),
        TurnDirection::Ccw => (-cos_b, sin_b),
    };
    PlanePoint::new(origin.x + radius_m * nx, origin.y + radius_m * ny)
}

/// Direction of travel along the circle at `radial`, the centre-to-point vector.
fn arc_tangent(direction: TurnDirection, radial: PlanePoint) -> PlanePoint {
    match direction {
        TurnDirection::Cw => PlanePoint::new(radial.y, -radial.x),
        TurnDirection::Ccw => PlanePoint::new(-radial.y, radial.x),
    }
}

/// Line `a·x + b·y = c` in coordinates relative to the turn centre.
///
/// It holds the points T of the circle with `(T - C)·(T - D) = 0`, i.e. where
/// the radius is perpendicular to the line towards the destination D. It is
/// the radical axis of the turn circle and the circle with diameter CD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadicalAxis {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl RadicalAxis {
    pub fn new(center: PlanePoint, destination: PlanePoint, radius_m: f64) -> Self {
        Self {
            a: destination.x - center.x,
            b: destination.y - center.y,
            c: radius_m * radius_m,
        }
    }

    /// Residual `a·x + b·y - c` for a point relative to the centre.
    pub fn residual(&self, local: PlanePoint) -> f64 {
        self.a * local.x + self.b * local.y - self.c
    }
}

/// Real roots of `qa·s² + qb·s + qc = 0`, or `None` on a negative discriminant.
fn solve_quadratic(qa: f64, qb: f64, qc: f64) -> Option<(f64, f64)> {
    let discriminant = qb * qb - 4.0 * qa * qc;
    if discriminant < 0.0 || !discriminant.is_finite() {
        return None;
    }
    let root = discriminant.sqrt();
    Some(((-qb + root) / (2.0 * qa), (-qb - root) / (2.0 * qa)))
}

/// Intersect the radical axis with the circle of `radius_m` about the origin.
///
/// Both returned points are relative to the circle centre.
fn tangent_candidates(axis: &RadicalAxis, radius_m: f64) -> Result<[PlanePoint; 2], NavError> {
    let norm_sq = axis.a * axis.a + axis.b * axis.b;
    if norm_sq < MIN_CENTER_DISTANCE_SQ_M2 {
        return Err(NavError::GeometryDegenerate(
            "destination coincides with turn centre".to_string(),
        ));
    }
    let norm = norm_sq.sqrt();

    // Foot of the perpendicular from the centre, then walk along the line
    let foot = PlanePoint::new(axis.a * axis.c / norm_sq, axis.b * axis.c / norm_sq);
    let along = PlanePoint::new(-axis.b / norm, axis.a / norm);

    let qb = 2.0 * (foot.x * along.x + foot.y * along.y);
    let qc = foot.x * foot.x + foot.y * foot.y - radius_m * radius_m;
    let Some((s1, s2)) = solve_quadratic(1.0, qb, qc) else {
        return Err(NavError::GeometryDegenerate(
            "destination inside turn circle".to_string(),
        ));
    };

    Ok([
        PlanePoint::new(foot.x + s1 * along.x, foot.y + s1 * along.y),
        PlanePoint::new(foot.x + s2 * along.x, foot.y + s2 * along.y),
    ])
}

/// Dot product of the arc tangent at `local` with the vector to the destination.
fn alignment(direction: TurnDirection, local: PlanePoint, destination_local: PlanePoint) -> f64 {
    let tangent = arc_tangent(direction, local);
    tangent.x * (destination_local.x - local.x) + tangent.y * (destination_local.y - local.y)
}

/// Pick the candidate best aligned with the flight direction.
///
/// Returns its score, the point, and whether no candidate was aligned at all.
fn pick_tangent(scored: [(f64, PlanePoint); 2]) -> (f64, PlanePoint, bool) {
    let (best_dot, best) = if scored[0].0 >= scored[1].0 {
        scored[0]
    } else {
        scored[1]
    };
    (best_dot, best, best_dot <= 0.0)
}

/// Resolves turns in the plane of one [`PlanarProjector`].
#[derive(Debug, Clone, Copy)]
pub struct TurnGeometryResolver<'a> {
    projector: &'a PlanarProjector,
}

impl<'a> TurnGeometryResolver<'a> {
    pub fn new(projector: &'a PlanarProjector) -> Self {
        Self { projector }
    }

    /// Resolve the turn at `origin` from `inbound_bearing` toward `destination`.
    ///
    /// Fails with [`NavError::GeometryDegenerate`] when no tangent from the
    /// circle reaches the destination, and with [`NavError::Projection`] when
    /// a point falls outside the projector's extent. Callers are expected to
    /// fall back to a straight leg on either.
    pub fn resolve(
        &self,
        inbound_bearing: f64,
        origin: GeoPoint,
        destination: GeoPoint,
        radius_m: f64,
    ) -> Result<TurnSolution, NavError> {
        if !inbound_bearing.is_finite() {
            return Err(NavError::NonFiniteInput);
        }
        if !(radius_m.is_finite() && radius_m > 0.0) {
            return Err(NavError::GeometryDegenerate(format!(
                "turn radius {radius_m} m is not positive"
            )));
        }

        let origin_xy = self.projector.project(origin)?;
        let destination_xy = self.projector.project(destination)?;

        let direction = turn_direction(inbound_bearing, bearing(origin, destination)?);
        let center = turn_center(origin_xy, inbound_bearing, radius_m, direction);

        let axis = RadicalAxis::new(center, destination_xy, radius_m);
        let candidates = tangent_candidates(&axis, radius_m)?;
        let destination_local = PlanePoint::new(axis.a, axis.b);

        let scored = candidates.map(|p| (alignment(direction, p, destination_local), p));
        let (best_dot, best, ambiguous) = pick_tangent(scored);
        if ambiguous {
            tracing::warn!(
                "No tangent point aligned with {:?} turn at ({:.5}, {:.5}), using least misaligned (dot {:.3})",
                direction,
                origin.lat,
                origin.lon,
                best_dot
            );
        }

        let straightening_xy = PlanePoint::new(center.x + best.x, center.y + best.y);
        Ok(TurnSolution {
            center: self.projector.unproject(center)?,
            direction,
            straightening_point: self.projector.unproject(straightening_xy)?,
            ambiguous,
        })
    }
}
