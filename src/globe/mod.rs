pub mod arc;
pub mod compositor;
pub mod engine;
pub mod projection;
pub mod scene;

pub use compositor::Compositor;
pub use engine::{GlobeEngine, Phase, SharedVisibility, VisibilitySignal};
pub use projection::{ProjectedPoint, Projector, RotationState};
