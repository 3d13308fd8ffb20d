use crate::globe::compositor::Compositor;
use crate::globe::projection::RotationState;
use crate::surface::Surface;
use std::cell::Cell;
use std::rc::Rc;

/// On-screen visibility of the visualization, injected by the host.
/// Polled once per tick; the engine pauses itself while off-screen.
pub trait VisibilitySignal {
    fn is_on_screen(&self) -> bool;
}

/// Shared visibility flag: the host flips it from its event loop, the
/// engine polls it each tick. Single-threaded by design.
#[derive(Clone)]
pub struct SharedVisibility(Rc<Cell<bool>>);

impl SharedVisibility {
    pub fn new(visible: bool) -> Self {
        Self(Rc::new(Cell::new(visible)))
    }

    pub fn set(&self, visible: bool) {
        self.0.set(visible);
    }
}

impl VisibilitySignal for SharedVisibility {
    fn is_on_screen(&self) -> bool {
        self.0.get()
    }
}

/// Engine lifecycle. `Disposed` is the only terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Running,
    Paused,
    Disposed,
}

/// Lifecycle controller wiring the compositor to the host's frame
/// cadence. The host's frame loop is the scheduling primitive: each
/// `tick` call is one scheduled callback, and the engine decides per
/// call whether any work happens.
///
/// Decorative visuals must never take down the host: a missing or
/// degenerate surface at attach time leaves the engine inert instead
/// of failing.
pub struct GlobeEngine {
    phase: Phase,
    compositor: Option<Compositor>,
    visibility: Option<Box<dyn VisibilitySignal>>,
}

impl GlobeEngine {
    pub fn new() -> Self {
        Self {
            phase: Phase::Uninitialized,
            compositor: None,
            visibility: None,
        }
    }

    /// First attach: size the compositor from the surface and register
    /// the visibility signal. A zero-area surface is a silent no-op;
    /// the engine stays Uninitialized and every later tick is inert.
    pub fn attach(&mut self, surface: &dyn Surface, visibility: Box<dyn VisibilitySignal>) {
        if self.phase != Phase::Uninitialized {
            return;
        }
        let (width, height) = surface.size();
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.compositor = Some(Compositor::new(width, height));
        self.visibility = Some(visibility);
        self.phase = Phase::Running;
    }

    /// Rebuild projection geometry after the host surface resizes.
    pub fn resize(&mut self, width: f64, height: f64) {
        if let Some(compositor) = &mut self.compositor {
            compositor.resize(width, height);
        }
    }

    /// One scheduled frame callback. Polls visibility, transitions
    /// Running <-> Paused, and paints when Running. Paused ticks keep
    /// the loop armed (resume latency stays near zero) but do no
    /// drawing and no state advancement. Returns whether a frame was
    /// painted.
    pub fn tick(&mut self, surface: &mut dyn Surface, elapsed: f64) -> bool {
        match self.phase {
            Phase::Uninitialized | Phase::Disposed => return false,
            Phase::Running | Phase::Paused => {}
        }

        let on_screen = self
            .visibility
            .as_ref()
            .map_or(true, |v| v.is_on_screen());
        self.phase = if on_screen {
            Phase::Running
        } else {
            Phase::Paused
        };

        if self.phase != Phase::Running {
            return false;
        }

        let Some(compositor) = &mut self.compositor else {
            return false;
        };
        compositor.render_frame(surface, elapsed);
        true
    }

    /// Terminal teardown. No draw call can reach any surface through
    /// this engine afterwards.
    pub fn dispose(&mut self) {
        self.phase = Phase::Disposed;
        self.visibility = None;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current rotation, if the engine ever attached.
    pub fn rotation(&self) -> Option<RotationState> {
        self.compositor.as_ref().map(|c| c.rotation())
    }
}

impl Default for GlobeEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::NullSurface;

    fn running_engine(surface: &NullSurface) -> (GlobeEngine, SharedVisibility) {
        let visibility = SharedVisibility::new(true);
        let mut engine = GlobeEngine::new();
        engine.attach(surface, Box::new(visibility.clone()));
        (engine, visibility)
    }

    #[test]
    fn attach_transitions_to_running() {
        let surface = NullSurface::new(700.0, 700.0);
        let (engine, _) = running_engine(&surface);
        assert_eq!(engine.phase(), Phase::Running);
    }

    #[test]
    fn degenerate_surface_is_a_silent_noop() {
        let mut surface = NullSurface::new(0.0, 0.0);
        let visibility = SharedVisibility::new(true);
        let mut engine = GlobeEngine::new();
        engine.attach(&surface, Box::new(visibility));
        assert_eq!(engine.phase(), Phase::Uninitialized);
        assert!(!engine.tick(&mut surface, 0.0));
        assert_eq!(surface.draw_calls, 0);
    }

    #[test]
    fn yaw_monotone_while_running_frozen_while_paused() {
        let mut surface = NullSurface::new(700.0, 700.0);
        let (mut engine, visibility) = running_engine(&surface);

        let mut last_yaw = engine.rotation().unwrap().yaw;
        for i in 1..=3 {
            assert!(engine.tick(&mut surface, i as f64 * 0.016));
            let yaw = engine.rotation().unwrap().yaw;
            assert!(yaw > last_yaw);
            last_yaw = yaw;
        }

        visibility.set(false);
        assert!(!engine.tick(&mut surface, 0.1));
        assert_eq!(engine.phase(), Phase::Paused);
        assert_eq!(engine.rotation().unwrap().yaw, last_yaw);
        assert!(!engine.tick(&mut surface, 0.2));
        assert_eq!(engine.rotation().unwrap().yaw, last_yaw);

        visibility.set(true);
        assert!(engine.tick(&mut surface, 0.3));
        assert_eq!(engine.phase(), Phase::Running);
        assert!(engine.rotation().unwrap().yaw > last_yaw);
    }

    #[test]
    fn paused_ticks_do_not_draw() {
        let mut surface = NullSurface::new(700.0, 700.0);
        let (mut engine, visibility) = running_engine(&surface);
        visibility.set(false);
        engine.tick(&mut surface, 0.0);
        assert_eq!(surface.draw_calls, 0);
    }

    #[test]
    fn dispose_halts_all_drawing() {
        let mut surface = NullSurface::new(700.0, 700.0);
        let (mut engine, _visibility) = running_engine(&surface);
        engine.tick(&mut surface, 0.0);
        let calls_at_dispose = surface.draw_calls;
        assert!(calls_at_dispose > 0);

        engine.dispose();
        assert_eq!(engine.phase(), Phase::Disposed);
        for i in 0..5 {
            assert!(!engine.tick(&mut surface, i as f64 * 0.016));
        }
        assert_eq!(surface.draw_calls, calls_at_dispose);
    }

    #[test]
    fn dispose_is_terminal() {
        let surface = NullSurface::new(700.0, 700.0);
        let (mut engine, visibility) = running_engine(&surface);
        engine.dispose();
        // Neither visibility changes nor re-attach revive the engine
        visibility.set(true);
        engine.attach(&surface, Box::new(visibility));
        assert_eq!(engine.phase(), Phase::Disposed);
    }
}
