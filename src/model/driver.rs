use log::{debug, info, warn};

use super::body::BodyID;
use super::camera::{CameraController, CameraPose, Cycle};
use super::clock::SimulationClock;
use super::facts::FactSheet;
use super::orrery::Orrery;
use super::selection::{resolve_selection, InfoPopup, Ray};
use crate::config::Config;
use crate::model::belt::AsteroidBelt;

pub const MIN_SPEED: f64 = 0.0;
pub const MAX_SPEED: f64 = 10.0;

/// Something the user asked for between ticks. Commands are queued and only
/// take effect at the start of the next tick, in the order they arrived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    TogglePlay,
    SetSpeed(f64),
    ToggleOrbits,
    ResetView,
    Pick(Ray),
    DismissPopup,
    Follow(BodyID),
    CycleFocus(Cycle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    Playing,
    Paused,
}

impl PlayState {
    pub fn toggled(self) -> Self {
        match self {
            PlayState::Playing => PlayState::Paused,
            PlayState::Paused => PlayState::Playing,
        }
    }
}

/// Everything the scene needs to draw one frame, besides the orrery itself.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub pose: CameraPose,
    pub popup: Option<&'static FactSheet>,
    pub followed: Option<BodyID>,
    pub speed: f64,
    pub play_state: PlayState,
    pub orbits_visible: bool,
}

/// The render side of the world. Each tick calls `apply_transforms` once the
/// orrery is up to date, then `present` once the camera is too.
pub trait SceneGraph {
    fn apply_transforms(&mut self, orrery: &Orrery);
    fn present(&mut self, frame: &Frame);
}

/// Owns the simulation and runs one tick at a time. Nothing else writes to
/// the orrery or the camera pose; input goes through `push`.
pub struct Driver {
    orrery: Orrery,
    camera: CameraController,
    pose: CameraPose,
    popup: InfoPopup,
    clock: SimulationClock,
    // Input
    commands: Vec<Command>,
    speed: f64,
    play_state: PlayState,
    orbits_visible: bool,
}

impl Driver {
    pub fn new(config: &Config) -> Self {
        let belt = AsteroidBelt::generate(config.asteroid_count, config.seed);
        let mut driver = Driver {
            orrery: Orrery::new(belt, config.pacing),
            camera: CameraController::new(config.pacing),
            pose: CameraPose::default(),
            popup: InfoPopup::new(),
            clock: SimulationClock::new(config.max_frame_delta),
            commands: Vec::with_capacity(8),
            speed: clamp_speed(config.speed),
            play_state: if config.paused {
                PlayState::Paused
            } else {
                PlayState::Playing
            },
            orbits_visible: config.show_orbits,
        };

        if let Some(name) = &config.focus {
            match name.parse::<BodyID>() {
                Ok(body) => driver.push(Command::Follow(body)),
                Err(e) => warn!("Ignoring startup focus: {}", e),
            }
        }
        driver
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn orrery(&self) -> &Orrery {
        &self.orrery
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    /// The drag camera writes the user's changes back through here before
    /// each tick.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
    }

    pub fn popup(&self) -> &InfoPopup {
        &self.popup
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn play_state(&self) -> PlayState {
        self.play_state
    }

    pub fn orbits_visible(&self) -> bool {
        self.orbits_visible
    }

    /// Samples the wall clock and runs a tick.
    pub fn tick<S: SceneGraph>(&mut self, scene: &mut S) {
        let delta = self.clock.tick();
        self.tick_by(delta, scene);
    }

    /// Runs one tick with an explicit elapsed time, which is clamped the same
    /// way a clock sample would be.
    pub fn tick_by<S: SceneGraph>(&mut self, delta: f64, scene: &mut S) {
        let delta = self.clock.clamp(delta);

        self.apply_commands();

        if self.play_state == PlayState::Playing {
            self.orrery.advance(delta, self.speed);
        }
        scene.apply_transforms(&self.orrery);

        // The camera keeps chasing its target even while paused
        self.camera.update(&self.orrery, delta, &mut self.pose);

        scene.present(&Frame {
            pose: self.pose,
            popup: self.popup.shown(),
            followed: self.camera.followed(),
            speed: self.speed,
            play_state: self.play_state,
            orbits_visible: self.orbits_visible,
        });
    }

    fn apply_commands(&mut self) {
        for command in std::mem::take(&mut self.commands) {
            match command {
                Command::TogglePlay => {
                    self.play_state = self.play_state.toggled();
                    info!("Simulation {:?}", self.play_state);
                }
                Command::SetSpeed(speed) => {
                    self.speed = clamp_speed(speed);
                    info!("Speed is {:.2}x", self.speed);
                }
                Command::ToggleOrbits => {
                    self.orbits_visible = !self.orbits_visible;
                    debug!("Orbit rings visible: {}", self.orbits_visible);
                }
                Command::ResetView => {
                    self.pose = self.camera.reset();
                }
                Command::Pick(ray) => {
                    resolve_selection(
                        &ray,
                        &self.orrery,
                        &mut [&mut self.camera, &mut self.popup],
                    );
                }
                Command::DismissPopup => {
                    self.popup.dismiss();
                }
                Command::Follow(body) => {
                    self.camera.request_follow(body);
                }
                Command::CycleFocus(direction) => {
                    self.camera.cycle(direction);
                }
            }
        }
    }
}

pub fn clamp_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        return MIN_SPEED;
    }
    nalgebra::clamp(speed, MIN_SPEED, MAX_SPEED)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::camera::FollowState;

    #[derive(Default)]
    struct CountingScene {
        applied: usize,
        presented: Vec<Frame>,
    }

    impl SceneGraph for CountingScene {
        fn apply_transforms(&mut self, _: &Orrery) {
            assert_eq!(self.applied, self.presented.len());
            self.applied += 1;
        }

        fn present(&mut self, frame: &Frame) {
            assert_eq!(self.applied, self.presented.len() + 1);
            self.presented.push(*frame);
        }
    }

    #[test]
    fn test_tick_order() {
        let mut driver = Driver::new(&Config::default());
        let mut scene = CountingScene::default();
        for _ in 0..5 {
            driver.tick_by(0.016, &mut scene);
        }
        assert_eq!(scene.applied, 5);
        assert_eq!(scene.presented.len(), 5);
    }

    #[test]
    fn test_commands_wait_for_tick() {
        let mut driver = Driver::new(&Config::default());
        let mut scene = CountingScene::default();

        driver.push(Command::SetSpeed(3.0));
        driver.push(Command::TogglePlay);
        assert_eq!(driver.speed(), 1.0);
        assert_eq!(driver.play_state(), PlayState::Playing);

        driver.tick_by(0.0, &mut scene);
        assert_eq!(driver.speed(), 3.0);
        assert_eq!(driver.play_state(), PlayState::Paused);
        assert_eq!(scene.presented[0].speed, 3.0);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut driver = Driver::new(&Config::default());
        let mut scene = CountingScene::default();

        driver.push(Command::SetSpeed(100.0));
        driver.tick_by(0.0, &mut scene);
        assert_eq!(driver.speed(), MAX_SPEED);

        driver.push(Command::SetSpeed(-2.0));
        driver.tick_by(0.0, &mut scene);
        assert_eq!(driver.speed(), MIN_SPEED);

        driver.push(Command::SetSpeed(f64::NAN));
        driver.tick_by(0.0, &mut scene);
        assert_eq!(driver.speed(), MIN_SPEED);
    }

    #[test]
    fn test_delta_is_clamped() {
        let config = Config::default();
        let mut driver = Driver::new(&config);
        let mut scene = CountingScene::default();

        driver.tick_by(3600.0, &mut scene);
        let expected = config.max_frame_delta * BodyID::Earth.info().angular_rate;
        approx::assert_relative_eq!(driver.orrery().phase_angle(BodyID::Earth), expected);

        driver.tick_by(-1.0, &mut scene);
        approx::assert_relative_eq!(driver.orrery().phase_angle(BodyID::Earth), expected);
    }

    #[test]
    fn test_dismiss_popup() {
        let mut driver = Driver::new(&Config::default());
        let mut scene = CountingScene::default();

        let mars = driver.orrery().position(BodyID::Mars);
        let origin = mars + nalgebra::Vector3::new(0.0, 200.0, 0.0);
        driver.push(Command::Pick(Ray::new(origin, mars - origin).unwrap()));
        driver.tick_by(0.0, &mut scene);
        assert_eq!(driver.popup().shown().map(|f| f.name), Some("Mars"));

        driver.push(Command::DismissPopup);
        assert!(driver.popup().shown().is_some());
        driver.tick_by(0.0, &mut scene);
        assert_eq!(driver.popup().shown(), None);
        assert!(scene.presented[1].popup.is_none());
        // Closing the popup doesn't stop the camera
        assert_eq!(driver.camera().followed(), Some(BodyID::Mars));
    }

    #[test]
    fn test_toggle_orbits() {
        let mut driver = Driver::new(&Config::default());
        let mut scene = CountingScene::default();
        assert!(driver.orbits_visible());
        driver.push(Command::ToggleOrbits);
        driver.tick_by(0.0, &mut scene);
        assert!(!scene.presented[0].orbits_visible);
    }

    #[test]
    fn test_startup_focus() {
        let config = Config {
            focus: Some("Saturn".to_owned()),
            ..Config::default()
        };
        let mut driver = Driver::new(&config);
        let mut scene = CountingScene::default();
        driver.tick_by(0.0, &mut scene);
        assert_eq!(driver.camera().state(), FollowState::Following(BodyID::Saturn));

        let config = Config {
            focus: Some("Vulcan".to_owned()),
            ..Config::default()
        };
        let mut driver = Driver::new(&config);
        driver.tick_by(0.0, &mut scene);
        assert_eq!(driver.camera().state(), FollowState::Idle);
    }
}
