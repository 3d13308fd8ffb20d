use crate::globe::{GlobeEngine, Phase, SharedVisibility};
use crate::starfield::Starfield;
use crate::surface::{BrailleSurface, Surface};
use std::time::Instant;

/// Host application state: one globe engine, one starfield background,
/// and the braille surfaces they paint into.
pub struct App {
    pub engine: GlobeEngine,
    pub starfield: Starfield,
    pub globe_surface: BrailleSurface,
    pub background_surface: BrailleSurface,
    pub show_starfield: bool,
    pub show_labels: bool,
    pub should_quit: bool,
    visibility: SharedVisibility,
    /// Terminal focus, one half of the visibility signal
    focused: bool,
    /// Space key simulates the visualization scrolling off-screen
    simulated_offscreen: bool,
    started: Instant,
}

/// Inner character dimensions once the border and status bar are taken
/// out (2 chars horizontal, 2 for border + 1 for status bar vertical).
fn inner_dims(width: usize, height: usize) -> (usize, usize) {
    (width.saturating_sub(2), height.saturating_sub(3))
}

impl App {
    pub fn new(width: usize, height: usize) -> Self {
        let (inner_w, inner_h) = inner_dims(width, height);
        let globe_surface = BrailleSurface::new(inner_w, inner_h);
        let background_surface = BrailleSurface::new(inner_w, inner_h);

        let visibility = SharedVisibility::new(true);
        let mut engine = GlobeEngine::new();
        engine.attach(&globe_surface, Box::new(visibility.clone()));

        let (px_w, px_h) = globe_surface.size();

        Self {
            engine,
            starfield: Starfield::new(px_w, px_h),
            globe_surface,
            background_surface,
            show_starfield: true,
            show_labels: true,
            should_quit: false,
            visibility,
            focused: true,
            simulated_offscreen: false,
            started: Instant::now(),
        }
    }

    /// One frame callback: tick the starfield and the engine. The
    /// engine decides internally whether it actually paints.
    pub fn frame(&mut self) {
        let elapsed = self.started.elapsed().as_secs_f64();

        if self.is_visible() {
            self.background_surface.clear();
            if self.show_starfield {
                self.starfield.tick(&mut self.background_surface);
            }
        }

        self.engine.tick(&mut self.globe_surface, elapsed);
    }

    /// Rebuild surfaces on terminal resize
    pub fn resize(&mut self, width: usize, height: usize) {
        let (inner_w, inner_h) = inner_dims(width, height);
        self.globe_surface.resize(inner_w, inner_h);
        self.background_surface.resize(inner_w, inner_h);

        let (px_w, px_h) = self.globe_surface.size();
        self.engine.resize(px_w, px_h);
        self.starfield.resize(px_w, px_h);
    }

    /// Terminal focus doubles as the on-screen signal
    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        self.update_visibility();
    }

    /// Toggle the simulated off-screen state (space key)
    pub fn toggle_offscreen(&mut self) {
        self.simulated_offscreen = !self.simulated_offscreen;
        self.update_visibility();
    }

    pub fn toggle_starfield(&mut self) {
        self.show_starfield = !self.show_starfield;
    }

    pub fn toggle_labels(&mut self) {
        self.show_labels = !self.show_labels;
    }

    /// Pointer position in terminal cells -> starfield parallax target
    pub fn set_pointer(&mut self, col: u16, row: u16) {
        // Convert terminal coords to braille pixel coords
        // Account for border (1 cell offset)
        let px = (col.saturating_sub(1)) as f64 * 2.0;
        let py = (row.saturating_sub(1)) as f64 * 4.0;
        self.starfield.set_pointer(px, py);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
        self.engine.dispose();
    }

    pub fn is_visible(&self) -> bool {
        self.focused && !self.simulated_offscreen
    }

    fn update_visibility(&self) {
        self.visibility.set(self.is_visible());
    }

    /// Status bar text for the current lifecycle phase
    pub fn phase_label(&self) -> &'static str {
        match self.engine.phase() {
            Phase::Uninitialized => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Disposed => "disposed",
        }
    }

    /// Current yaw in degrees for the status bar
    pub fn yaw_degrees(&self) -> f64 {
        self.engine
            .rotation()
            .map(|r| r.yaw.to_degrees() % 360.0)
            .unwrap_or(0.0)
    }
}
