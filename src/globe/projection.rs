use glam::DVec3;

/// Globe radius as a fraction of the smaller surface dimension
const RADIUS_RATIO: f64 = 0.38;
/// Focal distance as a multiple of the globe radius (fixed perspective)
const FOCAL_RATIO: f64 = 3.0;

/// Visibility threshold for grid lines and hotspot markers: front
/// hemisphere only, so they stay crisp on the limb.
pub const CULL_FRONT: f64 = 0.0;
/// Relaxed threshold for the land point-cloud; lets dense points bleed
/// slightly past the terminator to avoid a visible seam.
pub const CULL_POINTS: f64 = -0.15;
/// Relaxed threshold for arc segments.
pub const CULL_ARCS: f64 = -0.10;

/// Rotation of the simulated sphere. Yaw grows monotonically (wraps
/// via trig periodicity); pitch oscillates with wall-clock time. Owned
/// and advanced exclusively by the frame compositor.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationState {
    pub yaw: f64,
    pub pitch: f64,
}

/// A sphere point projected to the screen. Transient per-frame value;
/// `visible` is the single source of truth for whether the point is
/// painted at all this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    /// Signed distance along the view axis (positive = towards viewer)
    pub depth: f64,
    /// Perspective scale factor
    pub scale: f64,
    pub visible: bool,
}

/// Pure projection of sphere coordinates to screen coordinates under a
/// fixed-perspective camera. Holds only geometry derived from the
/// surface size; rotation is passed in per call.
#[derive(Clone, Copy, Debug)]
pub struct Projector {
    cx: f64,
    cy: f64,
    radius: f64,
    focal: f64,
}

impl Projector {
    /// Build a projector for a surface of the given pixel dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        let radius = width.min(height) * RADIUS_RATIO;
        Self {
            cx: width / 2.0,
            cy: height / 2.0,
            radius,
            focal: radius * FOCAL_RATIO,
        }
    }

    /// Sphere radius in pixels
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Screen center of the sphere
    pub fn center(&self) -> (f64, f64) {
        (self.cx, self.cy)
    }

    /// Fixed focal distance of the perspective camera
    pub fn focal(&self) -> f64 {
        self.focal
    }

    /// Project a (lat, lon) point given in degrees. `cull` is the
    /// visibility threshold expressed as a fraction of the radius
    /// (see [`CULL_FRONT`], [`CULL_POINTS`], [`CULL_ARCS`]).
    pub fn project_deg(
        &self,
        lat_deg: f64,
        lon_deg: f64,
        rotation: RotationState,
        cull: f64,
    ) -> ProjectedPoint {
        self.project_rad(lat_deg.to_radians(), lon_deg.to_radians(), rotation, cull)
    }

    /// Project a (lat, lon) point given in radians.
    pub fn project_rad(
        &self,
        lat: f64,
        lon: f64,
        rotation: RotationState,
        cull: f64,
    ) -> ProjectedPoint {
        self.project_alt_rad(lat, lon, 1.0, rotation, cull)
    }

    /// Project a point lifted off the sphere by an altitude multiplier
    /// (arcs bulge outward at their midpoint). The cull threshold is
    /// still measured against the base radius.
    pub fn project_alt_rad(
        &self,
        lat: f64,
        lon: f64,
        altitude: f64,
        rotation: RotationState,
        cull: f64,
    ) -> ProjectedPoint {
        let r = self.radius * altitude;
        let theta = lon + rotation.yaw;

        let p = DVec3::new(
            r * lat.cos() * theta.sin(),
            -r * lat.sin(),
            r * lat.cos() * theta.cos(),
        );

        // Pitch rotation about the horizontal screen axis
        let (sin_pitch, cos_pitch) = rotation.pitch.sin_cos();
        let y = p.y * cos_pitch - p.z * sin_pitch;
        let z = p.z * cos_pitch + p.y * sin_pitch;

        // Clamp the divisor so points at the view plane can't produce
        // non-finite screen coordinates.
        let scale = self.focal / (self.focal + z).max(1e-3);

        ProjectedPoint {
            x: self.cx + p.x * scale,
            y: self.cy + y * scale,
            depth: z,
            scale,
            visible: z > cull * self.radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projector() -> Projector {
        Projector::new(700.0, 700.0)
    }

    #[test]
    fn degree_and_radian_entry_points_agree() {
        let p = projector();
        let rot = RotationState {
            yaw: 0.7,
            pitch: 0.35,
        };
        for (lat, lon) in [(0.0, 0.0), (40.0, -74.0), (-33.0, 151.0), (89.0, 179.0)] {
            let d = p.project_deg(lat, lon, rot, CULL_FRONT);
            let r = p.project_rad(lat.to_radians(), lon.to_radians(), rot, CULL_FRONT);
            assert_eq!(d, r);
        }
    }

    #[test]
    fn projection_is_pure() {
        let p = projector();
        let rot = RotationState {
            yaw: 1.2,
            pitch: 0.4,
        };
        let a = p.project_deg(51.0, 0.0, rot, CULL_POINTS);
        let b = p.project_deg(51.0, 0.0, rot, CULL_POINTS);
        assert_eq!(a, b);
    }

    #[test]
    fn origin_projects_to_sphere_center() {
        let p = projector();
        let rot = RotationState::default();
        let pp = p.project_deg(0.0, 0.0, rot, CULL_FRONT);

        let radius = 700.0 * 0.38;
        let focal = radius * 3.0;
        assert!((pp.x - 350.0).abs() < 1e-9);
        assert!((pp.y - 350.0).abs() < 1e-9);
        assert!((pp.depth - radius).abs() < 1e-9);
        assert!((pp.scale - focal / (focal + radius)).abs() < 1e-9);
        assert!(pp.visible);
    }

    #[test]
    fn far_side_is_culled_for_front_threshold() {
        let p = projector();
        let rot = RotationState::default();
        let pp = p.project_deg(0.0, 180.0, rot, CULL_FRONT);
        assert!(!pp.visible);
        assert!(pp.depth < 0.0);
    }

    #[test]
    fn relaxed_threshold_keeps_terminator_points() {
        let p = projector();
        let rot = RotationState::default();
        // Just past the limb: invisible for markers, visible for land
        let front = p.project_deg(0.0, 92.0, rot, CULL_FRONT);
        let relaxed = p.project_deg(0.0, 92.0, rot, CULL_POINTS);
        assert!(!front.visible);
        assert!(relaxed.visible);
    }

    #[test]
    fn yaw_carries_points_around() {
        let p = projector();
        let back = p.project_deg(0.0, 180.0, RotationState::default(), CULL_FRONT);
        let turned = p.project_deg(
            0.0,
            180.0,
            RotationState {
                yaw: std::f64::consts::PI,
                pitch: 0.0,
            },
            CULL_FRONT,
        );
        assert!(!back.visible);
        assert!(turned.visible);
    }

    #[test]
    fn screen_coordinates_stay_finite_at_extreme_altitude() {
        let p = projector();
        let rot = RotationState::default();
        // Altitude large enough to push a far-side point past the
        // view plane; the divisor clamp must keep output finite.
        let pp = p.project_alt_rad(0.0, std::f64::consts::PI, 20.0, rot, CULL_ARCS);
        assert!(pp.x.is_finite());
        assert!(pp.y.is_finite());
        assert!(pp.scale.is_finite());
    }
}
