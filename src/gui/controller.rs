use std::time::Instant;

use kiss3d::event::{Action, Event, Key, MouseButton, WindowEvent};
use log::debug;
use nalgebra::Point2;

use super::camera::OrbitCamera;
use crate::model::{Command, Cycle, Driver};

// Key config, all in one place
const KEY_PREV_FOCUS: Key = Key::Q;
const KEY_NEXT_FOCUS: Key = Key::E;
const KEY_SPEED_UP: Key = Key::Period;
const KEY_SLOW_DOWN: Key = Key::Comma;
const KEY_RESET_VIEW: Key = Key::R;
const KEY_TOGGLE_PAUSE: Key = Key::Space;
const KEY_TOGGLE_ORBITS: Key = Key::O;
const KEY_CLOSE_POPUP: Key = Key::X;

const SPEED_STEP: f64 = 0.25;
// A press and release further apart than this is a drag, not a click
const CLICK_SLOP_PIXELS: f32 = 4.0;

/// Turns window events into driver commands.
pub struct Controller {
    cursor_pos: Point2<f32>,
    press_pos: Option<Point2<f32>>,
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            cursor_pos: Point2::origin(),
            press_pos: None,
            fps_counter: FpsCounter::new(1000),
        }
    }

    pub fn process_event(&mut self, event: Event, driver: &mut Driver, camera: &OrbitCamera) {
        match event.value {
            WindowEvent::Key(KEY_NEXT_FOCUS, Action::Press, _) => {
                driver.push(Command::CycleFocus(Cycle::Next));
            }
            WindowEvent::Key(KEY_PREV_FOCUS, Action::Press, _) => {
                driver.push(Command::CycleFocus(Cycle::Prev));
            }
            WindowEvent::Key(KEY_SPEED_UP, Action::Press, _) => {
                driver.push(Command::SetSpeed(driver.speed() + SPEED_STEP));
            }
            WindowEvent::Key(KEY_SLOW_DOWN, Action::Press, _) => {
                driver.push(Command::SetSpeed(driver.speed() - SPEED_STEP));
            }
            WindowEvent::Key(KEY_RESET_VIEW, Action::Press, _) => {
                driver.push(Command::ResetView);
            }
            WindowEvent::Key(KEY_TOGGLE_PAUSE, Action::Press, _) => {
                driver.push(Command::TogglePlay);
            }
            WindowEvent::Key(KEY_TOGGLE_ORBITS, Action::Press, _) => {
                driver.push(Command::ToggleOrbits);
            }
            WindowEvent::Key(KEY_CLOSE_POPUP, Action::Press, _) => {
                driver.push(Command::DismissPopup);
            }
            WindowEvent::CursorPos(x, y, _) => {
                self.cursor_pos = Point2::new(x as f32, y as f32);
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Press, _) => {
                self.press_pos = Some(self.cursor_pos);
            }
            WindowEvent::MouseButton(MouseButton::Button1, Action::Release, _) => {
                let press_pos = match self.press_pos.take() {
                    Some(p) => p,
                    None => return,
                };
                if (self.cursor_pos - press_pos).norm() > CLICK_SLOP_PIXELS {
                    return;
                }
                match camera.ray_through(&self.cursor_pos) {
                    Some(ray) => driver.push(Command::Pick(ray)),
                    None => debug!("No pick ray through {}", self.cursor_pos),
                }
            }
            _ => {}
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}
