use log::{debug, info};
use nalgebra::{Point3, Vector3};

use super::body::BodyID;
use super::clock::Pacing;
use super::orrery::Orrery;
use crate::math::geometry::{approach, safe_normalize};

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub eye: Point3<f64>,
    pub target: Point3<f64>,
}

impl CameraPose {
    pub fn distance(&self) -> f64 {
        (self.eye - self.target).norm()
    }
}

/// The overview of the whole system: slightly above the orbital plane,
/// looking at the Sun.
impl Default for CameraPose {
    fn default() -> Self {
        CameraPose {
            eye: Point3::new(0.0, 50.0, 250.0),
            target: Point3::origin(),
        }
    }
}

/// Offset of the first vantage point, in the followed body's local frame:
/// above and behind.
pub const ENTRY_OFFSET: [f64; 3] = [0.0, 10.0, 20.0];
/// How far from the followed body the camera settles.
pub const FOLLOW_DISTANCE: f64 = 20.0;
/// Fraction of the remaining distance covered each frame.
pub const FOLLOW_SMOOTHING: f64 = 0.1;

const DIRECTION_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowState {
    /// The user has free control of the camera.
    Idle,
    /// A body was picked; the camera jumps to it on the next update.
    Selecting(BodyID),
    /// The camera chases the body every update.
    Following(BodyID),
}

impl FollowState {
    pub fn target(self) -> Option<BodyID> {
        match self {
            FollowState::Idle => None,
            FollowState::Selecting(id) | FollowState::Following(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    Next,
    Prev,
}

/// Decides, each frame, where the camera should be. In `Idle` the pose is
/// left to whoever is dragging the camera around.
#[derive(Debug, Clone)]
pub struct CameraController {
    state: FollowState,
    pacing: Pacing,
}

impl CameraController {
    pub fn new(pacing: Pacing) -> Self {
        CameraController {
            state: FollowState::Idle,
            pacing,
        }
    }

    pub fn state(&self) -> FollowState {
        self.state
    }

    pub fn followed(&self) -> Option<BodyID> {
        self.state.target()
    }

    /// Starts following `body`. Bodies that can't be followed (the Sun, whose
    /// outward direction is undefined) are refused and nothing changes.
    pub fn request_follow(&mut self, body: BodyID) -> bool {
        if !body.is_selectable() {
            debug!("Refusing to follow {}", body);
            return false;
        }
        info!("Following {}", body);
        self.state = FollowState::Selecting(body);
        true
    }

    /// Moves focus to the next or previous followable body, wrapping around.
    /// From idle, starts at the first (or last) one.
    pub fn cycle(&mut self, direction: Cycle) {
        let bodies: Vec<BodyID> = BodyID::selectable().collect();
        let num_bodies = bodies.len();
        let idx = match self.followed().and_then(|b| bodies.iter().position(|&x| x == b)) {
            Some(idx) => match direction {
                Cycle::Next => (idx + 1) % num_bodies,
                Cycle::Prev => (idx + num_bodies - 1) % num_bodies,
            },
            None => match direction {
                Cycle::Next => 0,
                Cycle::Prev => num_bodies - 1,
            },
        };
        self.request_follow(bodies[idx]);
    }

    /// Drops follow mode and hands back the default pose.
    pub fn reset(&mut self) -> CameraPose {
        if let Some(body) = self.followed() {
            info!("No longer following {}", body);
        }
        self.state = FollowState::Idle;
        CameraPose::default()
    }

    /// Updates `pose` for this frame. Must run after the orrery has been
    /// advanced, or the camera lags a frame behind its target.
    pub fn update(&mut self, orrery: &Orrery, delta: f64, pose: &mut CameraPose) {
        let body = match self.state {
            FollowState::Idle => return,
            FollowState::Selecting(body) => {
                *pose = entry_pose(orrery, body);
                self.state = FollowState::Following(body);
                body
            }
            FollowState::Following(body) => body,
        };

        let fraction = self.pacing.fraction(FOLLOW_SMOOTHING, delta);
        *pose = follow_step(pose, orrery.position(body), fraction);
    }
}

/// The pose the camera jumps to when it starts following `body`.
pub fn entry_pose(orrery: &Orrery, body: BodyID) -> CameraPose {
    let position = orrery.position(body);
    CameraPose {
        eye: position + orrery.rotation(body) * Vector3::from(ENTRY_OFFSET),
        target: position,
    }
}

/// One smoothing step towards the stand-off point for a body at `position`.
///
/// The stand-off point is on the line through the origin and the body, on the
/// Sun's side of it. A body at the origin has no such line, so we fall back to
/// looking along -z.
pub fn follow_step(pose: &CameraPose, position: Point3<f64>, fraction: f64) -> CameraPose {
    let direction = safe_normalize(&-position.coords, DIRECTION_TOLERANCE, Vector3::z_axis());
    let desired = position + direction.into_inner() * FOLLOW_DISTANCE;
    CameraPose {
        eye: approach(&pose.eye, &desired, fraction),
        target: position,
    }
}
