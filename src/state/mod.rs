pub mod camera;
pub mod clock;
pub mod daylight;
pub mod gesture;
pub mod globe;
pub mod inertia;
pub mod projector;
pub mod scale;

pub use camera::SceneCamera;
pub use daylight::{TimeAction, TimeOfDay};
pub use globe::GlobeController;
