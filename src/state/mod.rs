pub mod camera;
pub mod collide;
pub mod contacts;
pub mod gesture;
pub mod indicator;
pub mod placement;
pub mod session;
pub mod surface;

pub use camera::ArCamera;
pub use contacts::ContactTracker;
pub use session::{ArSession, SceneEvent, UiRegions};
pub use surface::{CameraProbe, PlaneField, TrackedPlane};
