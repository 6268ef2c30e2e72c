//! Everything about the scene that can be simulated without a window: the
//! bodies and their orbits, the clock, the camera controller, picking, and the
//! tick that ties them together.

pub mod belt;
pub mod body;
pub mod camera;
pub mod clock;
pub mod driver;
pub mod facts;
pub mod moon;
pub mod orrery;
pub mod selection;

pub use body::{BodyID, BodyInfo};
pub use camera::{CameraController, CameraPose, Cycle, FollowState};
pub use clock::{Pacing, SimulationClock};
pub use driver::{Command, Driver, Frame, PlayState, SceneGraph};
pub use facts::FactSheet;
pub use orrery::Orrery;
pub use selection::{resolve_selection, InfoPopup, Ray, SelectionEvent, SelectionListener};
