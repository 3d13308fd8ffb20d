use crate::surface::{Rgba, Surface, LIME, STAR_WHITE};
use rand::Rng;

/// Upper bound on star count regardless of surface size
const STAR_COUNT: usize = 300;
/// One star per this many square pixels
const PIXELS_PER_STAR: f64 = 8000.0;
/// Max distance at which two stars get a connective line
const CONNECTION_DISTANCE: f64 = 120.0;
/// Drift velocity bound
const DRIFT_SPEED: f64 = 0.05;
/// Off-screen margin before a star wraps to the other side
const WRAP_MARGIN: f64 = 100.0;
/// Parallax displacement per unit of depth
const PARALLAX: f64 = 0.05;
/// Pointer smoothing factor per tick
const POINTER_SMOOTHING: f64 = 0.05;

/// One drifting, twinkling star with a depth factor for parallax.
struct Star {
    x: f64,
    y: f64,
    /// Depth factor: 0.5 = far, 2.0 = close
    z: f64,
    size: f64,
    base_alpha: f64,
    alpha: f64,
    twinkle_phase: f64,
    twinkle_speed: f64,
    vx: f64,
    vy: f64,
}

/// Particle-field background: a star field with nearest-neighbor
/// connective lines and pointer parallax. Lower-complexity variant of
/// the globe's render pattern; same surface abstraction, same
/// host-driven tick.
pub struct Starfield {
    width: f64,
    height: f64,
    stars: Vec<Star>,
    pointer: (f64, f64),
    target_pointer: (f64, f64),
}

impl Starfield {
    pub fn new(width: f64, height: f64) -> Self {
        let center = (width / 2.0, height / 2.0);
        Self {
            width,
            height,
            stars: init_stars(width, height),
            pointer: center,
            target_pointer: center,
        }
    }

    /// Reseed for a new surface size
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.stars = init_stars(width, height);
    }

    /// Update the parallax target; the actual offset eases towards it.
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.target_pointer = (x, y);
    }

    pub fn star_count(&self) -> usize {
        self.stars.len()
    }

    /// Advance drift/twinkle and paint connections then stars.
    pub fn tick(&mut self, surface: &mut dyn Surface) {
        self.pointer.0 += (self.target_pointer.0 - self.pointer.0) * POINTER_SMOOTHING;
        self.pointer.1 += (self.target_pointer.1 - self.pointer.1) * POINTER_SMOOTHING;

        for star in &mut self.stars {
            star.x += star.vx;
            star.y += star.vy;

            star.twinkle_phase += star.twinkle_speed;
            star.alpha = (star.base_alpha + star.twinkle_phase.sin() * 0.2).clamp(0.1, 1.0);

            if star.x < -WRAP_MARGIN {
                star.x = self.width + WRAP_MARGIN;
            } else if star.x > self.width + WRAP_MARGIN {
                star.x = -WRAP_MARGIN;
            }
            if star.y < -WRAP_MARGIN {
                star.y = self.height + WRAP_MARGIN;
            } else if star.y > self.height + WRAP_MARGIN {
                star.y = -WRAP_MARGIN;
            }
        }

        self.draw_connections(surface);
        self.draw_stars(surface);
    }

    /// Parallax-shifted screen position of a star
    fn parallax(&self, star: &Star) -> (f64, f64) {
        (
            star.x + (self.pointer.0 - self.width / 2.0) * (PARALLAX * star.z),
            star.y + (self.pointer.1 - self.height / 2.0) * (PARALLAX * star.z),
        )
    }

    /// Connective lines between nearby pairs, behind the stars
    fn draw_connections(&self, surface: &mut dyn Surface) {
        for i in 0..self.stars.len() {
            let a = &self.stars[i];
            let (ax, ay) = self.parallax(a);
            if ax < -50.0 || ax > self.width + 50.0 || ay < -50.0 || ay > self.height + 50.0 {
                continue;
            }

            for b in &self.stars[i + 1..] {
                // Cheap axis-distance reject before the parallax math
                if (a.x - b.x).abs() > CONNECTION_DISTANCE
                    || (a.y - b.y).abs() > CONNECTION_DISTANCE
                {
                    continue;
                }

                let (bx, by) = self.parallax(b);
                let dist = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt();
                if dist >= CONNECTION_DISTANCE {
                    continue;
                }

                let combined = a.alpha.min(b.alpha);
                let opacity = (1.0 - dist / CONNECTION_DISTANCE) * 0.3 * combined;
                // Very close pairs pick up a brand tint
                let color = if dist < CONNECTION_DISTANCE * 0.3 {
                    LIME.with_alpha(opacity * 1.5)
                } else {
                    Rgba::new(255, 255, 255, opacity)
                };
                surface.line(ax, ay, bx, by, 0.5, color);
            }
        }
    }

    fn draw_stars(&self, surface: &mut dyn Surface) {
        for star in &self.stars {
            let (x, y) = self.parallax(star);
            if x < -50.0 || x > self.width + 50.0 || y < -50.0 || y > self.height + 50.0 {
                continue;
            }
            let size = star.size * star.z * 0.8;
            surface.fill_circle(x, y, size, STAR_WHITE.with_alpha(star.alpha));
        }
    }
}

fn init_stars(width: f64, height: f64) -> Vec<Star> {
    let mut rng = rand::thread_rng();
    let count = ((width * height / PIXELS_PER_STAR) as usize).min(STAR_COUNT);

    (0..count)
        .map(|_| Star {
            x: rng.gen::<f64>() * width,
            y: rng.gen::<f64>() * height,
            z: rng.gen::<f64>() * 1.5 + 0.5,
            size: rng.gen::<f64>() * 2.0,
            base_alpha: rng.gen::<f64>() * 0.6 + 0.2,
            alpha: 0.0,
            twinkle_phase: rng.gen::<f64>() * std::f64::consts::TAU,
            twinkle_speed: rng.gen::<f64>() * 0.02 + 0.005,
            vx: (rng.gen::<f64>() - 0.5) * DRIFT_SPEED,
            vy: (rng.gen::<f64>() - 0.5) * DRIFT_SPEED,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::NullSurface;

    #[test]
    fn star_count_scales_with_area_and_caps() {
        let small = Starfield::new(100.0, 80.0);
        assert_eq!(small.star_count(), 1);
        let large = Starfield::new(4000.0, 4000.0);
        assert_eq!(large.star_count(), STAR_COUNT);
    }

    #[test]
    fn stars_wrap_at_margins() {
        let mut field = Starfield::new(200.0, 160.0);
        for star in &mut field.stars {
            star.x = -WRAP_MARGIN - 1.0;
            star.vx = -1.0;
        }
        let mut surface = NullSurface::new(200.0, 160.0);
        field.tick(&mut surface);
        for star in &field.stars {
            assert!(star.x > 200.0);
        }
    }

    #[test]
    fn twinkle_keeps_alpha_in_bounds() {
        let mut field = Starfield::new(400.0, 400.0);
        let mut surface = NullSurface::new(400.0, 400.0);
        for _ in 0..100 {
            field.tick(&mut surface);
        }
        for star in &field.stars {
            assert!((0.1..=1.0).contains(&star.alpha));
        }
    }

    #[test]
    fn pointer_eases_towards_target() {
        let mut field = Starfield::new(400.0, 400.0);
        field.set_pointer(400.0, 0.0);
        let mut surface = NullSurface::new(400.0, 400.0);
        field.tick(&mut surface);
        // One tick moves 5% of the way from the center
        assert!((field.pointer.0 - (200.0 + 200.0 * POINTER_SMOOTHING)).abs() < 1e-9);
    }

    #[test]
    fn tick_emits_draw_calls() {
        let mut field = Starfield::new(800.0, 600.0);
        let mut surface = NullSurface::new(800.0, 600.0);
        field.tick(&mut surface);
        assert!(surface.circles > 0);
    }
}
