use crate::globe::arc::{ArcPath, ARC_PHASE_STAGGER};
use crate::globe::projection::{ProjectedPoint, Projector, RotationState, CULL_FRONT, CULL_POINTS};
use crate::globe::scene::{self, CONNECTION_ARCS, HOTSPOTS};
use crate::surface::{Surface, DEEP_NAVY, GRID_WHITE, LIME};

/// Yaw advance per tick
const YAW_STEP: f64 = 0.002;
/// Pitch oscillation: base + sin(elapsed * rate) * sway
const PITCH_BASE: f64 = 0.4;
const PITCH_SWAY: f64 = 0.05;
const PITCH_RATE: f64 = 0.5;

/// Latitude band count (rings drawn at every interior boundary)
const LAT_BANDS: usize = 9;
/// Meridian count
const MERIDIANS: usize = 12;
/// Grid sampling step in degrees
const GRID_STEP_DEG: f64 = 5.0;

/// Owns the rotation state and paints one frame per tick, strictly
/// back-to-front: glow, inner fill, grid, outline, land points, arcs,
/// hotspot markers. There is no depth buffer; draw order is the
/// occlusion mechanism, so the layering must not be reordered.
pub struct Compositor {
    projector: Projector,
    rotation: RotationState,
    arc_path: ArcPath,
}

impl Compositor {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            projector: Projector::new(width, height),
            rotation: RotationState {
                yaw: 0.0,
                pitch: PITCH_BASE,
            },
            arc_path: ArcPath::new(),
        }
    }

    /// Rebuild projection geometry after a surface resize. Rotation
    /// carries over.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.projector = Projector::new(width, height);
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Advance the simulation and paint one complete frame. `elapsed`
    /// is wall-clock seconds since the engine started.
    pub fn render_frame(&mut self, surface: &mut dyn Surface, elapsed: f64) {
        self.rotation.yaw += YAW_STEP;
        self.rotation.pitch = PITCH_BASE + (elapsed * PITCH_RATE).sin() * PITCH_SWAY;

        surface.clear();
        self.paint_glow(surface);
        self.paint_grid(surface);
        self.paint_outline(surface);
        self.paint_land(surface);
        self.paint_arcs(surface, elapsed);
        self.paint_hotspots(surface, elapsed);
    }

    /// Outer atmospheric glow and offset inner fill
    fn paint_glow(&self, surface: &mut dyn Surface) {
        let (cx, cy) = self.projector.center();
        let r = self.projector.radius();

        surface.radial_gradient(
            cx,
            cy,
            r * 0.85,
            r * 1.4,
            &[
                (0.0, LIME.with_alpha(0.0)),
                (0.5, LIME.with_alpha(0.02)),
                (0.8, LIME.with_alpha(0.04)),
                (1.0, LIME.with_alpha(0.0)),
            ],
        );

        // Inner fill, offset towards the upper left for a lit look
        surface.radial_gradient(
            cx - r * 0.3,
            cy - r * 0.3,
            0.0,
            r,
            &[
                (0.0, LIME.with_alpha(0.03)),
                (0.5, DEEP_NAVY.with_alpha(0.02)),
                (1.0, DEEP_NAVY.with_alpha(0.0)),
            ],
        );
    }

    /// Latitude rings and meridians, front hemisphere only. Polylines
    /// break at the limb rather than wrapping across it.
    fn paint_grid(&self, surface: &mut dyn Surface) {
        for i in 1..LAT_BANDS {
            let lat = -90.0 + i as f64 * 180.0 / LAT_BANDS as f64;
            self.paint_polyline(surface, 360.0, |t| (lat, t * 360.0));
        }

        for i in 0..MERIDIANS {
            let lon = i as f64 / MERIDIANS as f64 * 360.0;
            self.paint_polyline(surface, 180.0, |t| (-90.0 + t * 180.0, lon));
        }
    }

    /// Sample a parametric (lat, lon) curve spanning `span_deg` degrees
    /// at the grid step and stroke the visible segments.
    fn paint_polyline(
        &self,
        surface: &mut dyn Surface,
        span_deg: f64,
        curve: impl Fn(f64) -> (f64, f64),
    ) {
        let steps = (span_deg / GRID_STEP_DEG) as usize;
        let mut prev: Option<ProjectedPoint> = None;
        for i in 0..=steps {
            let (lat, lon) = curve(i as f64 / steps as f64);
            let p = self.projector.project_deg(lat, lon, self.rotation, CULL_FRONT);
            if let Some(q) = prev {
                if p.visible && q.visible {
                    surface.line(q.x, q.y, p.x, p.y, 0.5, GRID_WHITE);
                }
            }
            prev = Some(p);
        }
    }

    fn paint_outline(&self, surface: &mut dyn Surface) {
        let (cx, cy) = self.projector.center();
        surface.stroke_circle(cx, cy, self.projector.radius(), 1.5, LIME.with_alpha(0.08));
    }

    /// Land point-cloud with relaxed terminator culling and depth fade
    fn paint_land(&self, surface: &mut dyn Surface) {
        let radius = self.projector.radius();
        for pt in scene::land_points() {
            let p = self
                .projector
                .project_rad(pt.lat, pt.lon, self.rotation, CULL_POINTS);
            if !p.visible {
                continue;
            }
            let fade = (p.depth / radius).clamp(0.0, 1.0);
            let alpha = fade * 0.9 * (0.5 + fade * 0.5);
            surface.fill_circle(p.x, p.y, 1.2 * p.scale, LIME.with_alpha(alpha));
        }
    }

    fn paint_arcs(&mut self, surface: &mut dyn Surface, elapsed: f64) {
        let radius = self.projector.radius();
        for (i, arc) in CONNECTION_ARCS.iter().enumerate() {
            self.arc_path.resample(arc, &self.projector, self.rotation);
            self.arc_path
                .draw(surface, radius, elapsed + i as f64 * ARC_PHASE_STAGGER);
        }
    }

    /// Hotspot markers: expanding pulse ring, core dot, soft halo
    fn paint_hotspots(&self, surface: &mut dyn Surface, elapsed: f64) {
        let radius = self.projector.radius();
        for city in &HOTSPOTS {
            let p = self
                .projector
                .project_deg(city.point.lat, city.point.lon, self.rotation, CULL_FRONT);
            if !p.visible {
                continue;
            }
            let a = (p.depth / radius).clamp(0.0, 1.0);

            // Per-city phase offset keeps rings out of lockstep
            let phase = (elapsed * 1.5 + city.point.lat * 0.05).rem_euclid(1.0);
            let ring_radius = 4.0 + phase * 12.0;
            let ring_alpha = (1.0 - phase) * a * 0.5;
            surface.stroke_circle(p.x, p.y, ring_radius, 1.0, LIME.with_alpha(ring_alpha));

            surface.fill_circle(p.x, p.y, 3.0 * p.scale, LIME.with_alpha(a));
            surface.fill_circle(p.x, p.y, 8.0 * p.scale, LIME.with_alpha(a * 0.15));
        }
    }
}
