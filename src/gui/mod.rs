use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::camera::OrbitCamera;
use self::controller::Controller;
use self::view::View;
use crate::config::Config;
use crate::model::{Driver, Frame, Orrery, SceneGraph};

mod camera;
mod controller;
mod renderers;
mod view;

pub use self::view::AssetError;

pub struct Simulation {
    driver: Driver,
    view: View,
    camera: OrbitCamera,
    controller: Controller,
}

// One frame's worth of access to the window, for the driver to draw through.
struct WindowScene<'a> {
    view: &'a mut View,
    camera: &'a mut OrbitCamera,
    window: &'a mut Window,
    fps: f64,
}

impl SceneGraph for WindowScene<'_> {
    fn apply_transforms(&mut self, orrery: &Orrery) {
        self.view.apply_transforms(orrery);
    }

    fn present(&mut self, frame: &Frame) {
        self.camera.set_pose(&frame.pose);
        self.view.draw(self.window, frame, self.fps);
    }
}

impl Simulation {
    pub fn new(config: &Config, window: &mut Window) -> Self {
        let driver = Driver::new(config);
        let view = View::new(window, driver.orrery(), config.assets.as_deref());
        let camera = OrbitCamera::new(driver.pose());
        Self {
            driver,
            view,
            camera,
            controller: Controller::new(),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        // Process events
        for event in events.iter() {
            self.controller
                .process_event(event, &mut self.driver, &self.camera);
        }

        // Dragging and zooming happen in the camera; hand them to the driver
        if let Some(pose) = self.camera.take_user_pose() {
            self.driver.set_pose(pose);
        }
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (
            Some(&mut self.camera),
            None,
            Some(self.view.renderer_mut()),
            None,
        )
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());

        let mut scene = WindowScene {
            view: &mut self.view,
            camera: &mut self.camera,
            window,
            fps: self.controller.fps(),
        };
        self.driver.tick(&mut scene);

        self.controller.increment_frame_counter();
    }
}
