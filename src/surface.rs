use crate::braille::BrailleCanvas;
use crate::hash::{hash2, rand_simple};

/// RGBA color with a separate floating-point alpha, matching the
/// variable-opacity strokes the compositor emits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

/// Brand lime used for the globe's glow, land points, arcs and markers.
pub const LIME: Rgba = Rgba::new(191, 253, 17, 1.0);
/// Faint white used for the lat/lon grid.
pub const GRID_WHITE: Rgba = Rgba::new(255, 255, 255, 0.03);
/// Near-black navy used in the inner fill gradient.
pub const DEEP_NAVY: Rgba = Rgba::new(11, 13, 19, 1.0);
/// Slightly blue white used for stars.
pub const STAR_WHITE: Rgba = Rgba::new(220, 230, 255, 1.0);

/// Host drawing surface: the engine's only output boundary. Strokes,
/// fills and gradients with RGBA color; everything the compositor
/// paints goes through this trait so backends (braille terminal, test
/// doubles) are interchangeable.
pub trait Surface {
    /// Logical pixel dimensions
    fn size(&self) -> (f64, f64);

    /// Erase the whole surface
    fn clear(&mut self);

    /// Stroke a line segment
    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, width: f64, color: Rgba);

    /// Fill a circle
    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgba);

    /// Stroke a circle outline
    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, width: f64, color: Rgba);

    /// Fill a disk of radius `r1` around (cx, cy) with a radial
    /// gradient; `stops` are (offset in 0..=1, color) pairs from the
    /// inner radius `r0` outwards.
    fn radial_gradient(&mut self, cx: f64, cy: f64, r0: f64, r1: f64, stops: &[(f64, Rgba)]);
}

/// Map alpha to a braille intensity level (0 = skip the draw).
fn level_for(a: f64) -> u8 {
    if a < 0.02 {
        0
    } else if a < 0.12 {
        1
    } else if a < 0.35 {
        2
    } else if a < 0.7 {
        3
    } else {
        4
    }
}

/// Terminal backend: rasterizes into a braille canvas. Alpha becomes
/// an intensity level; large translucent fills are dithered (stable
/// per-pixel hash, so frames don't shimmer).
pub struct BrailleSurface {
    canvas: BrailleCanvas,
}

impl BrailleSurface {
    /// Create a surface backed by a `width` x `height` character canvas.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            canvas: BrailleCanvas::new(width, height),
        }
    }

    pub fn canvas(&self) -> &BrailleCanvas {
        &self.canvas
    }

    /// Reallocate the backing canvas (terminal resize)
    pub fn resize(&mut self, width: usize, height: usize) {
        self.canvas = BrailleCanvas::new(width, height);
    }

    /// Deterministic coverage test for translucent fills: a pixel is
    /// kept with probability proportional to alpha.
    fn dither_keep(x: i32, y: i32, probability: f64) -> bool {
        probability >= 1.0 || rand_simple(hash2(x as u64, y as u64)) < probability
    }

    /// Bresenham raster of a line segment
    fn raster_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, level: u8) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let mut x = x0;
        let mut y = y0;

        loop {
            self.canvas.set_pixel_signed(x, y, level);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;

            if e2 >= dy {
                if x == x1 {
                    break;
                }
                err += dy;
                x += sx;
            }

            if e2 <= dx {
                if y == y1 {
                    break;
                }
                err += dx;
                y += sy;
            }
        }
    }
}

impl Surface for BrailleSurface {
    fn size(&self) -> (f64, f64) {
        (
            self.canvas.pixel_width() as f64,
            self.canvas.pixel_height() as f64,
        )
    }

    fn clear(&mut self) {
        self.canvas.clear();
    }

    fn line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, _width: f64, color: Rgba) {
        // Braille dots are single-width; stroke width is a no-op here.
        let level = level_for(color.a);
        if level == 0 {
            return;
        }
        self.raster_line(
            x0.round() as i32,
            y0.round() as i32,
            x1.round() as i32,
            y1.round() as i32,
            level,
        );
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgba) {
        let level = level_for(color.a);
        if level == 0 {
            return;
        }
        let icx = cx.round() as i32;
        let icy = cy.round() as i32;
        let ir = r.ceil().max(0.0) as i32;
        let r2 = r * r;
        // Translucent halos cover wide areas; thin them out instead of
        // painting solid blobs.
        let coverage = if color.a < 0.25 { color.a * 4.0 } else { 1.0 };

        for dy in -ir..=ir {
            for dx in -ir..=ir {
                if (dx * dx + dy * dy) as f64 <= r2.max(0.25)
                    && Self::dither_keep(icx + dx, icy + dy, coverage)
                {
                    self.canvas.set_pixel_signed(icx + dx, icy + dy, level);
                }
            }
        }
    }

    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, _width: f64, color: Rgba) {
        let level = level_for(color.a);
        if level == 0 || r <= 0.0 {
            return;
        }
        let steps = ((std::f64::consts::TAU * r) as usize).max(8);
        for i in 0..steps {
            let angle = i as f64 / steps as f64 * std::f64::consts::TAU;
            let x = cx + r * angle.cos();
            let y = cy + r * angle.sin();
            self.canvas
                .set_pixel_signed(x.round() as i32, y.round() as i32, level);
        }
    }

    fn radial_gradient(&mut self, cx: f64, cy: f64, r0: f64, r1: f64, stops: &[(f64, Rgba)]) {
        if stops.is_empty() || r1 <= r0 {
            return;
        }
        let icx = cx.round() as i32;
        let icy = cy.round() as i32;
        let ir = r1.ceil() as i32;

        for dy in -ir..=ir {
            for dx in -ir..=ir {
                let d = ((dx * dx + dy * dy) as f64).sqrt();
                if d > r1 {
                    continue;
                }
                let t = ((d - r0) / (r1 - r0)).clamp(0.0, 1.0);
                let a = alpha_at(stops, t);
                // Gradients are near-transparent washes; coverage is
                // boosted so they read at all in a two-tone medium.
                if a > 0.0 && Self::dither_keep(icx + dx, icy + dy, (a * 8.0).min(1.0)) {
                    self.canvas.set_pixel_signed(icx + dx, icy + dy, 1);
                }
            }
        }
    }
}

/// Interpolate gradient alpha at offset `t`
fn alpha_at(stops: &[(f64, Rgba)], t: f64) -> f64 {
    let first = stops[0];
    if t <= first.0 {
        return first.1.a;
    }
    for pair in stops.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 1.0 };
            return c0.a + (c1.a - c0.a) * f;
        }
    }
    stops[stops.len() - 1].1.a
}

/// Surface double that records draw calls without producing pixels.
/// Used by lifecycle tests (dispose must halt all drawing) and by the
/// frame benchmarks.
#[derive(Debug, Default)]
pub struct NullSurface {
    width: f64,
    height: f64,
    /// Total draw calls, clears included
    pub draw_calls: usize,
    pub clears: usize,
    pub lines: usize,
    pub circles: usize,
    pub gradients: usize,
}

impl NullSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl Surface for NullSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.draw_calls += 1;
    }

    fn line(&mut self, _x0: f64, _y0: f64, _x1: f64, _y1: f64, _width: f64, _color: Rgba) {
        self.lines += 1;
        self.draw_calls += 1;
    }

    fn fill_circle(&mut self, _cx: f64, _cy: f64, _r: f64, _color: Rgba) {
        self.circles += 1;
        self.draw_calls += 1;
    }

    fn stroke_circle(&mut self, _cx: f64, _cy: f64, _r: f64, _width: f64, _color: Rgba) {
        self.circles += 1;
        self.draw_calls += 1;
    }

    fn radial_gradient(
        &mut self,
        _cx: f64,
        _cy: f64,
        _r0: f64,
        _r1: f64,
        _stops: &[(f64, Rgba)],
    ) {
        self.gradients += 1;
        self.draw_calls += 1;
    }
}
