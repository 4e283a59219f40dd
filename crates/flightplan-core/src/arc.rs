//! Discretised turn arcs for drawing and measuring.

use crate::error::NavError;
use crate::models::{GeoPoint, LegResult, TurnDirection};
use crate::projection::{PlanarProjector, PlanePoint};
use std::f64::consts::TAU;

/// Signed angle swept from `start_angle` to `end_angle` in the commanded direction.
///
/// Counter-clockwise spans are positive and clockwise spans negative, so the
/// arc always turns the way the aircraft does even when that is the long way
/// round.
pub fn swept_angle(start_angle: f64, end_angle: f64, direction: TurnDirection) -> f64 {
    let span = end_angle - start_angle;
    match direction {
        TurnDirection::Ccw if span < 0.0 => span + TAU,
        TurnDirection::Cw if span > 0.0 => span - TAU,
        _ => span,
    }
}

/// Samples turn arcs in the plane of one [`PlanarProjector`].
#[derive(Debug, Clone, Copy)]
pub struct ArcSampler<'a> {
    projector: &'a PlanarProjector,
}

impl<'a> ArcSampler<'a> {
    pub fn new(projector: &'a PlanarProjector) -> Self {
        Self { projector }
    }

    /// Sample the arc of `radius_m` about `center` from `start` to `end`.
    ///
    /// Returns `num_points + 1` points. The first and last are `start` and
    /// `end` themselves; the interior points are evenly spaced in angle.
    pub fn sample(
        &self,
        center: GeoPoint,
        radius_m: f64,
        start: GeoPoint,
        end: GeoPoint,
        direction: TurnDirection,
        num_points: usize,
    ) -> Result<Vec<GeoPoint>, NavError> {
        if num_points == 0 {
            return Err(NavError::InvalidSampleCount(num_points));
        }
        if !radius_m.is_finite() {
            return Err(NavError::NonFiniteInput);
        }

        let c = self.projector.project(center)?;
        let s = self.projector.project(start)?;
        let e = self.projector.project(end)?;

        let start_angle = (s.y - c.y).atan2(s.x - c.x);
        let end_angle = (e.y - c.y).atan2(e.x - c.x);
        let span = swept_angle(start_angle, end_angle, direction);

        let mut points = Vec::with_capacity(num_points + 1);
        points.push(start);
        for i in 1..num_points {
            let angle = start_angle + span * (i as f64 / num_points as f64);
            let (sin_a, cos_a) = angle.sin_cos();
            let p = PlanePoint::new(c.x + radius_m * cos_a, c.y + radius_m * sin_a);
            points.push(self.projector.unproject(p)?);
        }
        points.push(end);

        Ok(points)
    }

    /// Sample the turn a leg starts with.
    ///
    /// Legs without an arc yield an empty vector.
    pub fn sample_leg(&self, leg: &LegResult, num_points: usize) -> Result<Vec<GeoPoint>, NavError> {
        let Some(center) = leg.turn_center else {
            return Ok(Vec::new());
        };
        self.sample(
            center,
            leg.turn_radius_m,
            leg.origin,
            leg.straightening_point,
            leg.turn_direction,
            num_points,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::TurnGeometryResolver;
    use std::f64::consts::{FRAC_PI_2, PI};

    const RADIUS: f64 = 2500.0;

    fn projector() -> PlanarProjector {
        PlanarProjector::centered_on(36.0).unwrap()
    }

    #[test]
    fn test_swept_angle_follows_direction() {
        // Quarter turn counter-clockwise
        assert!((swept_angle(0.0, FRAC_PI_2, TurnDirection::Ccw) - FRAC_PI_2).abs() < 1e-12);
        // Same endpoints clockwise go the long way
        assert!(
            (swept_angle(0.0, FRAC_PI_2, TurnDirection::Cw) + 3.0 * FRAC_PI_2).abs() < 1e-12
        );
        assert!((swept_angle(FRAC_PI_2, 0.0, TurnDirection::Cw) + FRAC_PI_2).abs() < 1e-12);
        assert!(
            (swept_angle(FRAC_PI_2, 0.0, TurnDirection::Ccw) - 3.0 * FRAC_PI_2).abs() < 1e-12
        );
        assert!((swept_angle(PI - 0.1, -PI + 0.1, TurnDirection::Ccw) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_endpoints_match_resolved_turn() {
        let projector = projector();
        let resolver = TurnGeometryResolver::new(&projector);
        let sampler = ArcSampler::new(&projector);
        let origin = GeoPoint::new(34.0, 36.0);

        for destination in [GeoPoint::new(34.1, 36.0), GeoPoint::new(33.9, 36.0)] {
            let turn = resolver.resolve(90.0, origin, destination, RADIUS).unwrap();
            let points = sampler
                .sample(
                    turn.center,
                    RADIUS,
                    origin,
                    turn.straightening_point,
                    turn.direction,
                    16,
                )
                .unwrap();

            assert_eq!(points.len(), 17);
            assert_eq!(points[0], origin);
            assert_eq!(points[16], turn.straightening_point);

            let c = projector.project(turn.center).unwrap();
            for p in &points {
                let xy = projector.project(*p).unwrap();
                assert!((xy.distance(c) - RADIUS).abs() < 0.01);
            }
        }
    }

    #[test]
    fn test_interior_points_lie_on_turn_side() {
        let projector = projector();
        let resolver = TurnGeometryResolver::new(&projector);
        let sampler = ArcSampler::new(&projector);
        let origin = GeoPoint::new(34.0, 36.0);

        // Eastbound, turning left toward the north: the arc bulges east then north
        let left = resolver
            .resolve(90.0, origin, GeoPoint::new(34.1, 36.0), RADIUS)
            .unwrap();
        let points = sampler
            .sample(
                left.center,
                RADIUS,
                origin,
                left.straightening_point,
                left.direction,
                8,
            )
            .unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].lat >= pair[0].lat, "left arc must climb north");
        }

        // Eastbound, turning right toward the south
        let right = resolver
            .resolve(90.0, origin, GeoPoint::new(33.9, 36.0), RADIUS)
            .unwrap();
        let points = sampler
            .sample(
                right.center,
                RADIUS,
                origin,
                right.straightening_point,
                right.direction,
                8,
            )
            .unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].lat <= pair[0].lat, "right arc must descend south");
        }
    }

    #[test]
    fn test_zero_points_is_rejected() {
        let projector = projector();
        let sampler = ArcSampler::new(&projector);
        let p = GeoPoint::new(34.0, 36.0);
        assert_eq!(
            sampler.sample(p, RADIUS, p, p, TurnDirection::Cw, 0),
            Err(NavError::InvalidSampleCount(0))
        );
    }

    #[test]
    fn test_single_segment_is_just_endpoints() {
        let projector = projector();
        let sampler = ArcSampler::new(&projector);
        let center = GeoPoint::new(34.0, 36.0);
        let start = GeoPoint::new(34.01, 36.0);
        let end = GeoPoint::new(34.0, 36.01);
        let points = sampler
            .sample(center, 1000.0, start, end, TurnDirection::Cw, 1)
            .unwrap();
        assert_eq!(points, vec![start, end]);
    }
}
