use crate::globe::projection::{ProjectedPoint, Projector, RotationState, CULL_ARCS};
use crate::globe::scene::ConnectionArc;
use crate::surface::{Surface, LIME};

/// Interpolation steps per arc (path has STEPS + 1 samples)
pub const ARC_STEPS: usize = 40;
/// Altitude bulge at the arc midpoint, as a fraction of the radius
const ARC_BULGE: f64 = 0.15;
/// Traveling-dot speed in path traversals per second
const DOT_SPEED: f64 = 0.4;
/// Time offset between consecutive arcs, so pulses decorrelate
pub const ARC_PHASE_STAGGER: f64 = 1.3;

/// One connection arc sampled into screen space. The sample buffer is
/// reused across arcs and frames; nothing here is persistent state.
pub struct ArcPath {
    points: Vec<ProjectedPoint>,
}

impl ArcPath {
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(ARC_STEPS + 1),
        }
    }

    /// Sample the arc for the current rotation. Straight-line lat/lon
    /// interpolation (not a true great circle) with a sin-shaped
    /// altitude bulge, accepted for visual purposes.
    pub fn resample(&mut self, arc: &ConnectionArc, projector: &Projector, rotation: RotationState) {
        self.points.clear();
        for i in 0..=ARC_STEPS {
            let t = i as f64 / ARC_STEPS as f64;
            let lat = arc.from.lat + (arc.to.lat - arc.from.lat) * t;
            let lon = arc.from.lon + (arc.to.lon - arc.from.lon) * t;
            let altitude = 1.0 + (t * std::f64::consts::PI).sin() * ARC_BULGE;
            self.points.push(projector.project_alt_rad(
                lat.to_radians(),
                lon.to_radians(),
                altitude,
                rotation,
                CULL_ARCS,
            ));
        }
    }

    /// Index of the traveling dot along the sampled path at arc-local
    /// time `t_arc`. Starts at the `from` endpoint (index 0) at t = 0.
    pub fn dot_index(&self, t_arc: f64) -> usize {
        let phase = (t_arc * DOT_SPEED).rem_euclid(1.0);
        (phase * (self.points.len().saturating_sub(1)) as f64) as usize
    }

    pub fn samples(&self) -> &[ProjectedPoint] {
        &self.points
    }

    /// Draw the fading trail and the traveling dot. `t_arc` already
    /// includes this arc's phase offset.
    pub fn draw(&self, surface: &mut dyn Surface, radius: f64, t_arc: f64) {
        if self.points.is_empty() {
            return;
        }

        // Breathing trail shared by all segments of this arc
        let pulse = ((t_arc * 2.0).sin() + 1.0) / 2.0;

        for pair in self.points.windows(2) {
            if !pair[0].visible && !pair[1].visible {
                continue;
            }
            let alpha = (pair[1].depth / radius + 0.5).clamp(0.0, 0.6) * (0.3 + pulse * 0.4);
            surface.line(
                pair[0].x,
                pair[0].y,
                pair[1].x,
                pair[1].y,
                1.5,
                LIME.with_alpha(alpha),
            );
        }

        let dot = self.points[self.dot_index(t_arc)];
        if dot.visible {
            let a = (dot.depth / radius + 0.3).clamp(0.0, 1.0);
            surface.fill_circle(dot.x, dot.y, 3.0, LIME.with_alpha(a));
            // Soft halo
            surface.fill_circle(dot.x, dot.y, 8.0, LIME.with_alpha(a * 0.2));
        }
    }
}

impl Default for ArcPath {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globe::scene::GeoPoint;
    use crate::surface::NullSurface;

    fn sample_arc() -> (ArcPath, Projector) {
        let projector = Projector::new(700.0, 700.0);
        let arc = ConnectionArc {
            from: GeoPoint::new(40.0, -74.0),
            to: GeoPoint::new(51.0, 0.0),
        };
        let mut path = ArcPath::new();
        path.resample(&arc, &projector, RotationState::default());
        (path, projector)
    }

    #[test]
    fn path_has_steps_plus_one_samples() {
        let (path, _) = sample_arc();
        assert_eq!(path.samples().len(), ARC_STEPS + 1);
    }

    #[test]
    fn dot_starts_at_from_endpoint() {
        let (path, projector) = sample_arc();
        assert_eq!(path.dot_index(0.0), 0);
        // Index 0 is the from endpoint's projection (altitude bulge is
        // zero at the ends)
        let from = projector.project_deg(40.0, -74.0, RotationState::default(), CULL_ARCS);
        let first = path.samples()[0];
        assert!((first.x - from.x).abs() < 1e-9);
        assert!((first.y - from.y).abs() < 1e-9);
    }

    #[test]
    fn dot_phase_wraps() {
        let (path, _) = sample_arc();
        // One full traversal takes 1/DOT_SPEED seconds
        let idx_wrapped = path.dot_index(1.0 / 0.4);
        assert_eq!(idx_wrapped, 0);
        assert!(path.dot_index(1.2) < path.samples().len());
    }

    #[test]
    fn midpoint_bulges_outward() {
        let projector = Projector::new(700.0, 700.0);
        let rot = RotationState::default();
        // An equatorial front-facing arc: the bulged midpoint must sit
        // deeper along the view axis than the unbulged equivalent.
        let arc = ConnectionArc {
            from: GeoPoint::new(0.0, -40.0),
            to: GeoPoint::new(0.0, 40.0),
        };
        let mut path = ArcPath::new();
        path.resample(&arc, &projector, rot);
        let mid = path.samples()[ARC_STEPS / 2];
        let flat = projector.project_deg(0.0, 0.0, rot, CULL_ARCS);
        assert!(mid.depth > flat.depth);
    }

    #[test]
    fn draw_skips_fully_hidden_segments() {
        let projector = Projector::new(700.0, 700.0);
        // Arc entirely on the far side
        let arc = ConnectionArc {
            from: GeoPoint::new(0.0, 150.0),
            to: GeoPoint::new(0.0, 170.0),
        };
        let mut path = ArcPath::new();
        path.resample(&arc, &projector, RotationState::default());
        let mut surface = NullSurface::new(700.0, 700.0);
        path.draw(&mut surface, projector.radius(), 0.0);
        assert_eq!(surface.lines, 0);
        assert_eq!(surface.circles, 0);
    }
}
